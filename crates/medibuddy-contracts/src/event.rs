//! Append-only patient events.
//!
//! Events are never modified or deleted once the store has accepted them.
//! Their position in the store's event list is their chronological order;
//! "recent" queries slice from the end of that list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::triage::Severity;

/// Something that happened to a patient.
///
/// On disk every event is a flat JSON object carrying at least `type` and
/// `patient_id`; the remaining fields depend on `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Foreign key into the patient mapping. Not enforced by the store.
    pub patient_id: String,
    /// Assigned by the store when the caller leaves it empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Type-specific event payload, discriminated by the `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// A dose that was due and/or taken.
    Dose {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        medication: Option<String>,
        #[serde(default)]
        scheduled: bool,
        #[serde(default)]
        taken: bool,
    },
    /// A reported symptom and the level the triage classifier assigned it.
    Symptom {
        symptom: String,
        severity: i64,
        triage_level: Severity,
    },
    /// A detected medication interaction, as a formatted warning.
    Interaction { interaction: String },
}

impl Event {
    pub fn dose(
        patient_id: impl Into<String>,
        medication: Option<String>,
        scheduled: bool,
        taken: bool,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            timestamp: None,
            kind: EventKind::Dose { medication, scheduled, taken },
        }
    }

    pub fn symptom(
        patient_id: impl Into<String>,
        symptom: impl Into<String>,
        severity: i64,
        triage_level: Severity,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            timestamp: None,
            kind: EventKind::Symptom {
                symptom: symptom.into(),
                severity,
                triage_level,
            },
        }
    }

    pub fn interaction(patient_id: impl Into<String>, interaction: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            timestamp: None,
            kind: EventKind::Interaction {
                interaction: interaction.into(),
            },
        }
    }

    /// Set an explicit timestamp, overriding store assignment.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// The wire name of this event's `type` tag.
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            EventKind::Dose { .. } => "dose",
            EventKind::Symptom { .. } => "symptom",
            EventKind::Interaction { .. } => "interaction",
        }
    }
}
