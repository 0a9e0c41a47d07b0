//! The MediBuddy orchestrator: a fixed dispatch over four named actions.
//!
//! Every call follows the same shape:
//!
//!   Load patient → Parse action → Dispatch → Append events / notify → Outcome
//!
//! A missing patient short-circuits before any dispatch, so no event is
//! appended and no notification is sent for an unknown patient. Not-found
//! and validation conditions become `status = "error"` outcomes; only storage
//! faults escape as `Err`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use medibuddy_contracts::{
    care::ScheduledReminder,
    error::{MediError, MediResult},
    event::{Event, EventKind},
    outcome::{
        Action, ActionReport, FullCheckReport, InteractionReport, OrchestrationOutcome,
        ReminderReport, SymptomReport,
    },
    patient::Patient,
    summary::Summary,
    triage::Severity,
};

use crate::{
    analytics,
    traits::{
        CaregiverNotifier, InteractionLookup, PatientStore, PayloadValidator, ReminderRegistry,
        TriageClassifier,
    },
};

/// Time slots used for a medication that does not specify its own.
pub const DEFAULT_TIME_SLOTS: [&str; 2] = ["09:00", "21:00"];

/// Symptom text recorded when `log_symptom` data carries none.
const DEFAULT_SYMPTOM: &str = "unknown";

/// Severity recorded when `log_symptom` data carries none.
const DEFAULT_SEVERITY: i64 = 5;

/// Composes the store, rule components, and logs per requested action.
///
/// The store, reminder registry, and notifier are shared (`Arc`) so the
/// hosting application can read them directly; the rule components are owned.
pub struct Orchestrator {
    store: Arc<dyn PatientStore>,
    interactions: Box<dyn InteractionLookup>,
    triage: Box<dyn TriageClassifier>,
    reminders: Arc<dyn ReminderRegistry>,
    notifier: Arc<dyn CaregiverNotifier>,
    validator: Option<Arc<dyn PayloadValidator>>,
    default_time_slots: Vec<String>,
}

impl Orchestrator {
    /// Create an orchestrator with the default time slots and no validator.
    pub fn new(
        store: Arc<dyn PatientStore>,
        interactions: Box<dyn InteractionLookup>,
        triage: Box<dyn TriageClassifier>,
        reminders: Arc<dyn ReminderRegistry>,
        notifier: Arc<dyn CaregiverNotifier>,
    ) -> Self {
        Self {
            store,
            interactions,
            triage,
            reminders,
            notifier,
            validator: None,
            default_time_slots: DEFAULT_TIME_SLOTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Validate action data with `validator` before dispatching.
    pub fn with_validator(mut self, validator: Arc<dyn PayloadValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Replace the slots applied to medications without `time_slots`.
    pub fn with_default_time_slots(mut self, slots: Vec<String>) -> Self {
        self.default_time_slots = slots;
        self
    }

    /// Run `action` for `patient_id`.
    ///
    /// # Pipeline
    ///
    /// 1. Load the patient; absent → error outcome, nothing else happens
    /// 2. Parse `action`; unknown → error outcome
    /// 3. Dispatch to the action handler
    /// 4. Recoverable handler errors (validation) → error outcome
    ///
    /// # Errors
    ///
    /// Returns `Err` only for storage, notification-log, or registry faults.
    pub fn orchestrate(
        &self,
        patient_id: &str,
        action: &str,
        data: Option<&Value>,
    ) -> MediResult<OrchestrationOutcome> {
        info!(patient_id = %patient_id, action = %action, "orchestrating action");

        // ── Step 1: Load the patient ─────────────────────────────────────────
        let patient = match self.store.get_patient(patient_id)? {
            Some(p) => p,
            None => {
                warn!(patient_id = %patient_id, action = %action, "patient not found");
                let err = MediError::PatientNotFound { patient_id: patient_id.to_string() };
                return Ok(OrchestrationOutcome::error(action, patient_id, err.to_string()));
            }
        };

        // ── Step 2: Resolve the action name ──────────────────────────────────
        let parsed = match action.parse::<Action>() {
            Ok(a) => a,
            Err(err) => {
                warn!(patient_id = %patient_id, action = %action, "unknown action");
                return Ok(OrchestrationOutcome::error(action, patient_id, err.to_string()));
            }
        };

        // ── Step 3: Dispatch ─────────────────────────────────────────────────
        let result = match parsed {
            Action::CheckInteractions => {
                self.check_interactions(&patient).map(ActionReport::Interactions)
            }
            Action::ScheduleReminders => {
                self.schedule_reminders(&patient).map(ActionReport::Reminders)
            }
            Action::LogSymptom => self.log_symptom(&patient, data).map(ActionReport::Symptom),
            Action::FullCheck => self.full_check(&patient).map(ActionReport::FullCheck),
        };

        // ── Step 4: Shape the outcome ────────────────────────────────────────
        match result {
            Ok(report) => Ok(OrchestrationOutcome::success(parsed, patient_id, report)),
            Err(err) if err.is_recoverable() => {
                warn!(
                    patient_id = %patient_id,
                    action = %parsed,
                    error = %err,
                    "action rejected"
                );
                Ok(OrchestrationOutcome::error(action, patient_id, err.to_string()))
            }
            Err(err) => Err(err),
        }
    }

    /// Summarize a patient's history. `PatientNotFound` when absent.
    pub fn summarize(&self, patient_id: &str) -> MediResult<Summary> {
        analytics::summarize(self.store.as_ref(), patient_id)
    }

    /// The current adherence percentage for a patient.
    pub fn adherence_rate(&self, patient_id: &str) -> MediResult<f64> {
        Ok(self.summarize(patient_id)?.adherence_rate)
    }

    /// Access the underlying store.
    pub fn store(&self) -> &Arc<dyn PatientStore> {
        &self.store
    }

    /// Access the reminder registry.
    pub fn reminders(&self) -> &Arc<dyn ReminderRegistry> {
        &self.reminders
    }

    // ── Action handlers ──────────────────────────────────────────────────────

    fn check_interactions(&self, patient: &Patient) -> MediResult<InteractionReport> {
        let names = patient.medication_names();
        let interactions = self.interactions.check_all_pairs(&names);

        if !interactions.is_empty() {
            warn!(
                patient_id = %patient.patient_id,
                count = interactions.len(),
                "medication interactions found"
            );
            // Record each warning once per patient; repeat checks only notify.
            let recorded: Vec<String> = self
                .store
                .events_for_patient(&patient.patient_id)?
                .into_iter()
                .filter_map(|e| match e.kind {
                    EventKind::Interaction { interaction } => Some(interaction),
                    _ => None,
                })
                .collect();
            for warning in interactions.iter().filter(|w| !recorded.contains(w)) {
                self.store
                    .append_event(Event::interaction(patient.patient_id.clone(), warning.clone()))?;
            }
            self.notifier.notify_caregiver(
                &patient.patient_id,
                &format!("Medication interactions detected: {}", interactions.join(", ")),
                Severity::High,
            )?;
        }

        Ok(InteractionReport {
            interactions,
            medication_count: names.len(),
        })
    }

    fn schedule_reminders(&self, patient: &Patient) -> MediResult<ReminderReport> {
        let mut jobs = Vec::new();

        for medication in &patient.medications {
            let slots = medication
                .time_slots
                .as_deref()
                .unwrap_or(self.default_time_slots.as_slice());

            for slot in slots {
                let job_id =
                    self.reminders
                        .schedule_job(&patient.patient_id, &medication.name, slot)?;
                info!(
                    patient_id = %patient.patient_id,
                    job_id = %job_id,
                    medication = %medication.name,
                    time = %slot,
                    "scheduled reminder"
                );
                jobs.push(ScheduledReminder {
                    job_id,
                    medication: medication.name.clone(),
                    time: slot.clone(),
                });
            }
        }

        Ok(ReminderReport {
            reminders_scheduled: jobs.len(),
            jobs,
        })
    }

    fn log_symptom(&self, patient: &Patient, data: Option<&Value>) -> MediResult<SymptomReport> {
        let empty = Value::Object(Map::new());
        let data = data.unwrap_or(&empty);

        if let Some(validator) = &self.validator {
            let report = validator.validate_action_data(Action::LogSymptom, data)?;
            if !report.passed {
                return Err(MediError::Validation { reason: report.describe() });
            }
        }

        let request = SymptomRequest::from_data(data)?;
        let triage = self.triage.triage(&request.symptom, request.severity);
        debug!(
            patient_id = %patient.patient_id,
            level = %triage.level,
            "symptom triaged"
        );

        let mut event = Event::symptom(
            patient.patient_id.clone(),
            request.symptom.clone(),
            request.severity,
            triage.level,
        );
        if let Some(ts) = request.timestamp {
            event = event.at(ts);
        }
        self.store.append_event(event)?;

        if triage.level.is_urgent() {
            self.notifier.notify_caregiver(
                &patient.patient_id,
                &format!(
                    "High severity symptom: {} (level: {})",
                    request.symptom, request.severity
                ),
                triage.level,
            )?;
        }

        Ok(SymptomReport {
            triage,
            symptom: request.symptom,
        })
    }

    fn full_check(&self, patient: &Patient) -> MediResult<FullCheckReport> {
        let interactions = self.check_interactions(patient)?;
        let reminders = self.schedule_reminders(patient)?;
        let summary = analytics::summarize(self.store.as_ref(), &patient.patient_id)?;

        Ok(FullCheckReport {
            interactions,
            reminders,
            summary,
        })
    }
}

/// An integer, or a float with no fractional part (`9.0`), as JSON Schema's
/// `integer` type accepts both.
fn whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// The fields `log_symptom` reads from its free-form data mapping.
struct SymptomRequest {
    symptom: String,
    severity: i64,
    timestamp: Option<DateTime<Utc>>,
}

impl SymptomRequest {
    fn from_data(data: &Value) -> MediResult<Self> {
        let obj = data.as_object().ok_or_else(|| MediError::Validation {
            reason: "action data must be a JSON object".to_string(),
        })?;

        let symptom = match obj.get("symptom") {
            None | Some(Value::Null) => DEFAULT_SYMPTOM.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(MediError::Validation {
                    reason: "symptom must be a string".to_string(),
                })
            }
        };

        let severity = match obj.get("severity") {
            None | Some(Value::Null) => DEFAULT_SEVERITY,
            Some(v) => whole_number(v).ok_or_else(|| MediError::Validation {
                reason: "severity must be an integer".to_string(),
            })?,
        };

        let timestamp = match obj.get("timestamp") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(
                DateTime::parse_from_rfc3339(s)
                    .map_err(|e| MediError::Validation {
                        reason: format!("timestamp '{}' is not RFC 3339: {}", s, e),
                    })?
                    .with_timezone(&Utc),
            ),
            Some(_) => {
                return Err(MediError::Validation {
                    reason: "timestamp must be a string".to_string(),
                })
            }
        };

        Ok(Self { symptom, severity, timestamp })
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
