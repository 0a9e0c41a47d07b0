//! The assembled MediBuddy runtime.
//!
//! `MediBuddy` opens the durable files named by a `MediConfig`, builds the
//! interaction table and triage classifier, and hands all of them to an
//! `Orchestrator`. It is the entry point the CLI and library callers use.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use medibuddy_contracts::{
    care::{Notification, ReminderJob},
    error::{MediError, MediResult},
    event::Event,
    outcome::OrchestrationOutcome,
    patient::Patient,
    summary::Summary,
};
use medibuddy_core::{
    traits::{PatientStore, PayloadValidator, ReminderRegistry},
    Orchestrator,
};
use medibuddy_rules::{InteractionTable, KeywordTriage};
use medibuddy_store::{InMemoryReminderRegistry, JsonStore, NotificationLog};
use medibuddy_validate::SchemaValidator;

use crate::config::MediConfig;

pub const SERVICE_NAME: &str = "MediBuddy";

/// Reported by `MediBuddy::status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceStatus {
    pub service: String,
    pub version: String,
    pub status: String,
    pub patients: usize,
}

pub struct MediBuddy {
    config: MediConfig,
    store: Arc<JsonStore>,
    notifications: Arc<NotificationLog>,
    reminders: Arc<InMemoryReminderRegistry>,
    validator: Arc<SchemaValidator>,
    orchestrator: Orchestrator,
}

impl MediBuddy {
    /// Open the runtime described by `config`.
    ///
    /// Fails when either storage file is corrupt, the interaction table
    /// cannot be loaded, or the embedded schemas do not compile.
    pub fn open(config: MediConfig) -> MediResult<Self> {
        let interactions = match &config.interactions.table {
            Some(path) => InteractionTable::from_file(path)?,
            None => InteractionTable::builtin()?,
        };

        let store = Arc::new(JsonStore::open(&config.storage.data_file)?);
        let notifications = Arc::new(NotificationLog::open(&config.storage.notifications_file)?);
        let reminders = Arc::new(InMemoryReminderRegistry::new());
        let validator = Arc::new(SchemaValidator::new()?);

        let orchestrator = Orchestrator::new(
            store.clone(),
            Box::new(interactions),
            Box::new(KeywordTriage::new()),
            reminders.clone(),
            notifications.clone(),
        )
        .with_validator(validator.clone())
        .with_default_time_slots(config.reminders.default_time_slots.clone());

        info!(
            data_file = %config.storage.data_file.display(),
            notifications_file = %config.storage.notifications_file.display(),
            "runtime ready"
        );

        Ok(Self {
            config,
            store,
            notifications,
            reminders,
            validator,
            orchestrator,
        })
    }

    pub fn config(&self) -> &MediConfig {
        &self.config
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    // ── Patients ─────────────────────────────────────────────────────────────

    /// Validate a raw JSON patient record, then insert or replace it.
    pub fn upsert_patient_json(&self, payload: &Value) -> MediResult<Patient> {
        self.check_patient(payload)?;
        let patient: Patient =
            serde_json::from_value(payload.clone()).map_err(|e| MediError::Validation {
                reason: format!("malformed patient record: {}", e),
            })?;
        self.store.upsert_patient(patient.clone())?;
        Ok(patient)
    }

    /// Validate and store an already-typed patient record.
    pub fn upsert_patient(&self, patient: Patient) -> MediResult<()> {
        let payload = serde_json::to_value(&patient).map_err(|e| MediError::Validation {
            reason: format!("unserializable patient record: {}", e),
        })?;
        self.check_patient(&payload)?;
        self.store.upsert_patient(patient)
    }

    fn check_patient(&self, payload: &Value) -> MediResult<()> {
        let report = self.validator.validate_patient(payload)?;
        if report.passed {
            Ok(())
        } else {
            Err(MediError::Validation { reason: report.describe() })
        }
    }

    pub fn get_patient(&self, patient_id: &str) -> MediResult<Option<Patient>> {
        self.store.get_patient(patient_id)
    }

    pub fn list_patients(&self) -> MediResult<Vec<Patient>> {
        self.store.list_patients()
    }

    // ── Actions and history ──────────────────────────────────────────────────

    pub fn orchestrate(
        &self,
        patient_id: &str,
        action: &str,
        data: Option<&Value>,
    ) -> MediResult<OrchestrationOutcome> {
        self.orchestrator.orchestrate(patient_id, action, data)
    }

    pub fn summary(&self, patient_id: &str) -> MediResult<Summary> {
        self.orchestrator.summarize(patient_id)
    }

    pub fn adherence_rate(&self, patient_id: &str) -> MediResult<f64> {
        self.orchestrator.adherence_rate(patient_id)
    }

    pub fn events(&self, patient_id: &str) -> MediResult<Vec<Event>> {
        self.store.events_for_patient(patient_id)
    }

    /// Record a scheduled dose as taken or missed.
    ///
    /// Unlike raw event appends, this requires the patient to exist.
    pub fn record_dose(&self, patient_id: &str, medication: &str, taken: bool) -> MediResult<Event> {
        if self.store.get_patient(patient_id)?.is_none() {
            return Err(MediError::PatientNotFound { patient_id: patient_id.to_string() });
        }
        let event = Event::dose(patient_id, Some(medication.to_string()), true, taken);
        self.store.append_event(event)
    }

    /// Notifications for one patient, or all of them.
    pub fn notifications(&self, patient_id: Option<&str>) -> MediResult<Vec<Notification>> {
        match patient_id {
            Some(id) => self.notifications.for_patient(id),
            None => self.notifications.all(),
        }
    }

    pub fn reminder_jobs(&self, patient_id: &str) -> MediResult<Vec<ReminderJob>> {
        self.reminders.jobs_for_patient(patient_id)
    }

    pub fn status(&self) -> MediResult<ServiceStatus> {
        Ok(ServiceStatus {
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            status: "running".to_string(),
            patients: self.store.list_patients()?.len(),
        })
    }
}
