//! Adherence metrics and alert generation.
//!
//! Everything here is derived by scanning one patient's event list; nothing
//! is cached or written back.

use tracing::info;

use medibuddy_contracts::{
    error::{MediError, MediResult},
    event::{Event, EventKind},
    patient::Patient,
    summary::Summary,
};

use crate::traits::PatientStore;

/// How many symptom events `Summary::recent_symptoms` keeps.
pub const RECENT_SYMPTOM_LIMIT: usize = 5;

/// Adherence below this percentage raises a low-adherence alert.
pub const LOW_ADHERENCE_THRESHOLD: f64 = 80.0;

/// Percentage of scheduled doses that were taken.
///
/// Defined as `100.0` when nothing was scheduled.
pub fn adherence_rate(taken: usize, scheduled: usize) -> f64 {
    if scheduled == 0 {
        return 100.0;
    }
    taken as f64 / scheduled as f64 * 100.0
}

/// Round to one decimal place (66.666… → 66.7).
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Build the summary for `patient` from its events.
///
/// `events` must already be filtered to this patient and in append order.
pub fn build_summary(patient: &Patient, events: &[Event]) -> Summary {
    let mut total_doses = 0;
    let mut taken_doses = 0;
    let mut symptoms: Vec<&Event> = Vec::new();
    let mut interactions_detected = Vec::new();

    for event in events {
        match &event.kind {
            EventKind::Dose { scheduled, taken, .. } => {
                if *scheduled {
                    total_doses += 1;
                }
                if *taken {
                    taken_doses += 1;
                }
            }
            EventKind::Symptom { .. } => symptoms.push(event),
            EventKind::Interaction { interaction } => {
                interactions_detected.push(interaction.clone())
            }
        }
    }

    let rate = adherence_rate(taken_doses, total_doses);

    let mut alerts = Vec::new();
    if rate < LOW_ADHERENCE_THRESHOLD {
        alerts.push(format!("Low adherence rate: {:.1}%", rate));
    }
    let urgent_symptom = symptoms.iter().any(|e| {
        matches!(&e.kind, EventKind::Symptom { triage_level, .. } if triage_level.is_urgent())
    });
    if urgent_symptom {
        alerts.push("High severity symptoms reported".to_string());
    }
    if !interactions_detected.is_empty() {
        alerts.push(format!(
            "{} medication interactions detected",
            interactions_detected.len()
        ));
    }

    let recent_start = symptoms.len().saturating_sub(RECENT_SYMPTOM_LIMIT);
    let recent_symptoms = symptoms[recent_start..].iter().map(|e| (*e).clone()).collect();

    Summary {
        patient_id: patient.patient_id.clone(),
        patient_name: patient.name.clone(),
        adherence_rate: round_one_decimal(rate),
        total_doses,
        taken_doses,
        missed_doses: total_doses.saturating_sub(taken_doses),
        interactions_detected,
        recent_symptoms,
        alerts,
        medication_count: patient.medications.len(),
    }
}

/// Load the patient and its events from `store` and summarize them.
///
/// Returns `MediError::PatientNotFound` when the patient does not exist.
pub fn summarize(store: &dyn PatientStore, patient_id: &str) -> MediResult<Summary> {
    let patient = store
        .get_patient(patient_id)?
        .ok_or_else(|| MediError::PatientNotFound { patient_id: patient_id.to_string() })?;
    let events = store.events_for_patient(patient_id)?;

    let summary = build_summary(&patient, &events);
    info!(
        patient_id = %patient_id,
        adherence_rate = summary.adherence_rate,
        alerts = summary.alerts.len(),
        "generated summary"
    );
    Ok(summary)
}

// ── Tests ────────────────────────────────────────────────────────────────────
