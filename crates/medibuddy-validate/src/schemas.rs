//! Embedded JSON Schema documents for boundary payloads.

use serde_json::{json, Value};

/// `HH:MM`, 24-hour clock.
pub const TIME_SLOT_PATTERN: &str = "^([01][0-9]|2[0-3]):[0-5][0-9]$";

/// A patient record as accepted by `upsert_patient`.
pub fn patient_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Patient",
        "type": "object",
        "required": ["patient_id", "name", "age"],
        "properties": {
            "patient_id": { "type": "string", "minLength": 1 },
            "name": { "type": "string" },
            "age": { "type": "integer", "minimum": 0 },
            "medications": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["name", "dosage", "frequency"],
                    "properties": {
                        "name": { "type": "string", "minLength": 1 },
                        "dosage": { "type": "string" },
                        "frequency": { "type": "string" },
                        "time_slots": {
                            "type": ["array", "null"],
                            "items": { "type": "string", "pattern": TIME_SLOT_PATTERN }
                        }
                    }
                }
            },
            "caregiver_contact": { "type": ["string", "null"] }
        }
    })
}

/// Data accepted by the `log_symptom` action. Every field is optional; the
/// orchestrator fills in defaults for absent ones.
pub fn symptom_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "SymptomReport",
        "type": "object",
        "properties": {
            "symptom": { "type": ["string", "null"] },
            "severity": { "type": ["integer", "null"], "minimum": 1, "maximum": 10 },
            "timestamp": { "type": ["string", "null"] }
        }
    })
}
