//! Component trait definitions for the MediBuddy orchestrator.
//!
//! These traits are the seams between the orchestrator and its collaborators:
//!
//! - `PatientStore`:       the single durable source of truth
//! - `InteractionLookup`:  pairwise medication interaction table
//! - `TriageClassifier`:   symptom severity classification
//! - `ReminderRegistry`:   in-memory reminder bookkeeping
//! - `CaregiverNotifier`:  caregiver notification log
//! - `PayloadValidator`:   boundary schema checks for caller-supplied data
//!
//! The orchestrator owns one implementation of each and sequences them per
//! action. All methods take `&self`; implementations that hold mutable state
//! guard it internally.

use serde_json::Value;

use medibuddy_contracts::{
    care::{Notification, ReminderJob},
    error::MediResult,
    event::Event,
    outcome::Action,
    patient::Patient,
    triage::{Severity, TriageResult},
    validate::ValidationReport,
};

/// Persistent storage for patients and their event history.
///
/// Every mutating call persists the whole state before returning. The store
/// is the only component whose state survives a restart.
pub trait PatientStore: Send + Sync {
    /// Insert `patient`, or replace the record sharing its `patient_id`.
    fn upsert_patient(&self, patient: Patient) -> MediResult<()>;

    /// Fetch a patient by identifier. `Ok(None)` when absent.
    fn get_patient(&self, patient_id: &str) -> MediResult<Option<Patient>>;

    /// All patients in first-insertion order.
    fn list_patients(&self) -> MediResult<Vec<Patient>>;

    /// Append `event`, stamping the current time if it has none.
    ///
    /// Returns the event exactly as stored.
    fn append_event(&self, event: Event) -> MediResult<Event>;

    /// Events whose `patient_id` matches, in append order.
    fn events_for_patient(&self, patient_id: &str) -> MediResult<Vec<Event>>;

    /// Every event in append order.
    fn all_events(&self) -> MediResult<Vec<Event>>;
}

/// A symmetric, case-insensitive medication interaction table.
pub trait InteractionLookup: Send + Sync {
    /// The stored reason for the pair, regardless of order or casing.
    fn check_interaction(&self, drug_a: &str, drug_b: &str) -> Option<String>;

    /// Check every unordered pair in `names` exactly once.
    ///
    /// Returns one `"<a> + <b>: <reason>"` entry per interacting pair, with
    /// the names in the caller's casing. Fewer than two names yields nothing.
    fn check_all_pairs(&self, names: &[String]) -> Vec<String>;
}

/// Maps a reported symptom and its 1–10 severity to a triage level.
///
/// Implementations must be pure and total. Range checking of `severity`
/// belongs to the `PayloadValidator`, not here.
pub trait TriageClassifier: Send + Sync {
    fn triage(&self, symptom: &str, severity: i64) -> TriageResult;
}

/// Bookkeeping for intended medication reminders. Nothing is ever fired.
pub trait ReminderRegistry: Send + Sync {
    /// Record a new job and return its freshly generated identifier.
    fn schedule_job(&self, patient_id: &str, medication: &str, time: &str) -> MediResult<String>;

    /// Jobs for `patient_id` in scheduling order.
    fn jobs_for_patient(&self, patient_id: &str) -> MediResult<Vec<ReminderJob>>;

    /// Mark a job cancelled. `Ok(false)` when no such job exists.
    fn cancel_job(&self, job_id: &str) -> MediResult<bool>;
}

/// Records caregiver notifications. There is no delivery mechanism.
pub trait CaregiverNotifier: Send + Sync {
    fn notify_caregiver(
        &self,
        patient_id: &str,
        message: &str,
        severity: Severity,
    ) -> MediResult<Notification>;
}

/// Schema checks for data arriving from outside the core.
pub trait PayloadValidator: Send + Sync {
    /// Validate a patient record before it is deserialized and upserted.
    fn validate_patient(&self, payload: &Value) -> MediResult<ValidationReport>;

    /// Validate the free-form data mapping supplied with `action`.
    fn validate_action_data(&self, action: Action, data: &Value) -> MediResult<ValidationReport>;
}
