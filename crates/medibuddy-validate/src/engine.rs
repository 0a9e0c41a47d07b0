//! Schema-based payload validator.
//!
//! `SchemaValidator` implements `PayloadValidator` from `medibuddy-core`.
//! Schemas are compiled once at construction. Every violation is collected
//! into the report so callers see the full failure set in one pass.
//!
//! Actions other than `log_symptom` take no structured data and accept
//! anything.

use jsonschema::Validator;
use serde_json::Value;
use tracing::{debug, warn};

use medibuddy_contracts::{
    error::{MediError, MediResult},
    outcome::Action,
    validate::{ValidationFailure, ValidationReport},
};
use medibuddy_core::traits::PayloadValidator;

use crate::schemas::{patient_schema, symptom_schema};

pub const SCHEMA_RULE_ID: &str = "json-schema";

fn compile(name: &str, schema: &Value) -> MediResult<Validator> {
    jsonschema::validator_for(schema).map_err(|e| MediError::SchemaValidation {
        reason: format!("invalid {} schema: {}", name, e),
    })
}

pub struct SchemaValidator {
    patient: Validator,
    symptom: Validator,
}

impl SchemaValidator {
    /// Compile the embedded schemas.
    pub fn new() -> MediResult<Self> {
        Ok(Self {
            patient: compile("patient", &patient_schema())?,
            symptom: compile("log_symptom", &symptom_schema())?,
        })
    }

    fn run(&self, subject: &str, validator: &Validator, payload: &Value) -> ValidationReport {
        let failures: Vec<ValidationFailure> = validator
            .iter_errors(payload)
            .map(|error| {
                let message = format!("JSON Schema violation at {}: {}", error.instance_path, error);
                warn!(subject = %subject, %message, "payload validation failure");
                ValidationFailure {
                    rule_id: SCHEMA_RULE_ID.to_string(),
                    message,
                }
            })
            .collect();

        debug!(subject = %subject, failures = failures.len(), "payload validated");
        ValidationReport::from_failures(failures)
    }
}

impl PayloadValidator for SchemaValidator {
    fn validate_patient(&self, payload: &Value) -> MediResult<ValidationReport> {
        Ok(self.run("patient", &self.patient, payload))
    }

    fn validate_action_data(&self, action: Action, data: &Value) -> MediResult<ValidationReport> {
        match action {
            Action::LogSymptom => Ok(self.run(action.as_str(), &self.symptom, data)),
            Action::CheckInteractions | Action::ScheduleReminders | Action::FullCheck => {
                Ok(ValidationReport::pass())
            }
        }
    }
}
