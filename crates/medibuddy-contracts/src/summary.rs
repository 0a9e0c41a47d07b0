//! Clinician-facing adherence summary.

use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Aggregate view of one patient's event history.
///
/// `adherence_rate` is a percentage rounded to one decimal place and is
/// defined as `100.0` when no doses were scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub patient_id: String,
    pub patient_name: String,
    pub adherence_rate: f64,
    /// Dose events flagged `scheduled`.
    pub total_doses: usize,
    /// Dose events flagged `taken`.
    pub taken_doses: usize,
    pub missed_doses: usize,
    /// Warning texts of every interaction event, in append order.
    pub interactions_detected: Vec<String>,
    /// Up to the five most recent symptom events, oldest first.
    pub recent_symptoms: Vec<Event>,
    /// Informational alert strings, in evaluation order.
    pub alerts: Vec<String>,
    pub medication_count: usize,
}
