//! Patient and medication records.
//!
//! A `Patient` is always written whole: the store replaces any existing
//! record with the same `patient_id` and never patches individual fields.

use serde::{Deserialize, Serialize};

/// A tracked patient and the medications they are currently taking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Unique key in the store's patient mapping.
    pub patient_id: String,
    /// Display name.
    pub name: String,
    pub age: u32,
    /// Medications in the order the caller supplied them.
    #[serde(default)]
    pub medications: Vec<Medication>,
    /// Free-form caregiver contact (email, phone); used only for display.
    #[serde(default)]
    pub caregiver_contact: Option<String>,
}

impl Patient {
    /// Medication names in record order, as supplied by the caller.
    pub fn medication_names(&self) -> Vec<String> {
        self.medications.iter().map(|m| m.name.clone()).collect()
    }
}

/// A single medication owned by a `Patient`.
///
/// `time_slots` distinguishes "not specified" (`None`) from "no reminders"
/// (`Some(vec![])`). The orchestrator substitutes its configured default
/// slots only in the first case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    /// Times of day as `"HH:MM"` strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slots: Option<Vec<String>>,
}

impl Medication {
    /// Build a medication with explicit time slots.
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency: impl Into<String>,
        time_slots: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
            time_slots: Some(time_slots),
        }
    }
}
