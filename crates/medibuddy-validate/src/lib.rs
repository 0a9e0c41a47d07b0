//! medibuddy-validate: boundary schema checks for the MediBuddy runtime.
//!
//! Patient records and `log_symptom` data arrive as raw JSON from the CLI or
//! a library caller. `SchemaValidator` checks them against embedded JSON
//! Schema documents before they are deserialized or acted on.

pub mod engine;
pub mod schemas;

pub use engine::SchemaValidator;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use medibuddy_contracts::outcome::Action;
    use medibuddy_core::traits::PayloadValidator;

    use super::*;

    fn validator() -> SchemaValidator {
        SchemaValidator::new().expect("embedded schemas must compile")
    }

    fn valid_patient() -> serde_json::Value {
        json!({
            "patient_id": "p1",
            "name": "Ada",
            "age": 70,
            "medications": [
                { "name": "Aspirin", "dosage": "81mg", "frequency": "daily", "time_slots": ["09:00", "21:30"] },
                { "name": "Warfarin", "dosage": "5mg", "frequency": "daily" }
            ],
            "caregiver_contact": null
        })
    }

    // ── Patient records ──────────────────────────────────────────────────────

    #[test]
    fn valid_patient_passes() {
        let report = validator().validate_patient(&valid_patient()).unwrap();
        assert!(report.passed, "unexpected failures: {}", report.describe());
        assert!(report.failures.is_empty());
    }

    #[test]
    fn minimal_patient_passes() {
        let report = validator()
            .validate_patient(&json!({ "patient_id": "p2", "name": "Bo", "age": 0 }))
            .unwrap();
        assert!(report.passed);
    }

    /// Every violation is reported, not just the first.
    #[test]
    fn all_patient_failures_are_collected() {
        let payload = json!({
            "patient_id": "",
            "name": "Ada",
            "age": -3,
            "medications": [
                { "name": "Aspirin", "dosage": "81mg", "frequency": "daily", "time_slots": ["25:00"] }
            ]
        });
        let report = validator().validate_patient(&payload).unwrap();
        assert!(!report.passed);
        assert_eq!(report.failures.len(), 3);
        assert!(report.failures.iter().all(|f| f.rule_id == "json-schema"));
        assert!(report.describe().contains("/medications/0/time_slots/0"));
    }

    #[test]
    fn missing_required_fields_fail() {
        let report = validator().validate_patient(&json!({ "name": "Ada" })).unwrap();
        assert!(!report.passed);
        assert!(report.describe().contains("patient_id"));
    }

    #[test]
    fn non_integer_age_fails() {
        let mut payload = valid_patient();
        payload["age"] = json!("seventy");
        assert!(!validator().validate_patient(&payload).unwrap().passed);
    }

    // ── Action data ──────────────────────────────────────────────────────────

    #[test]
    fn symptom_severity_range_is_enforced() {
        let v = validator();
        for severity in [1, 5, 10] {
            let data = json!({ "symptom": "Cough", "severity": severity });
            assert!(v.validate_action_data(Action::LogSymptom, &data).unwrap().passed);
        }
        for severity in [0, 11, 42, -1] {
            let data = json!({ "symptom": "Cough", "severity": severity });
            assert!(
                !v.validate_action_data(Action::LogSymptom, &data).unwrap().passed,
                "severity {} should fail",
                severity
            );
        }
    }

    #[test]
    fn empty_symptom_data_passes() {
        let report = validator()
            .validate_action_data(Action::LogSymptom, &json!({}))
            .unwrap();
        assert!(report.passed);
    }

    #[test]
    fn symptom_wrong_types_fail() {
        let data = json!({ "symptom": 12, "severity": "high", "timestamp": 5 });
        let report = validator()
            .validate_action_data(Action::LogSymptom, &data)
            .unwrap();
        assert_eq!(report.failures.len(), 3);
    }

    #[test]
    fn other_actions_accept_anything() {
        let v = validator();
        for action in [Action::CheckInteractions, Action::ScheduleReminders, Action::FullCheck] {
            assert!(v.validate_action_data(action, &json!("anything")).unwrap().passed);
        }
    }
}
