//! medibuddy-store: durable and in-memory state for the MediBuddy runtime.
//!
//! - `JsonStore`: the patient and event store, one JSON document on disk.
//! - `NotificationLog`: caregiver notifications, a JSON array on disk.
//! - `InMemoryReminderRegistry`: reminder jobs, process memory only.
//!
//! Each component guards its state with one `Mutex` and performs the whole
//! read-modify-write of a mutation while holding it.

pub mod document;
pub mod json_store;
pub mod notification_log;
pub mod reminders;

pub use document::StoreDocument;
pub use json_store::JsonStore;
pub use notification_log::NotificationLog;
pub use reminders::InMemoryReminderRegistry;

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;
    use std::sync::Arc;
    use std::thread;

    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    use medibuddy_contracts::{
        care::{JobStatus, NotificationStatus},
        error::MediError,
        event::{Event, EventKind},
        patient::{Medication, Patient},
        triage::Severity,
    };
    use medibuddy_core::traits::{CaregiverNotifier, PatientStore, ReminderRegistry};

    use super::*;

    // ── Helpers ──────────────────────────────────────────────────────────────

    fn patient(id: &str, name: &str) -> Patient {
        Patient {
            patient_id: id.to_string(),
            name: name.to_string(),
            age: 70,
            medications: vec![Medication::new("Aspirin", "81mg", "daily", vec!["09:00".into()])],
            caregiver_contact: Some("caregiver@example.com".to_string()),
        }
    }

    fn ids(patients: &[Patient]) -> Vec<String> {
        patients.iter().map(|p| p.patient_id.clone()).collect()
    }

    // ── JsonStore ────────────────────────────────────────────────────────────

    /// Opening a store at a missing path creates the parent directory and
    /// starts empty without writing the file.
    #[test]
    fn open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("memory.json");

        let store = JsonStore::open(&path).unwrap();
        assert!(store.list_patients().unwrap().is_empty());
        assert!(store.all_events().unwrap().is_empty());
        assert!(path.parent().unwrap().is_dir());
        assert!(!path.exists());
    }

    #[test]
    fn corrupt_file_fails_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("memory.json");
        fs::write(&path, "{ not json").unwrap();

        match JsonStore::open(&path) {
            Err(MediError::StorageCorrupt { path: p, .. }) => assert!(p.ends_with("memory.json")),
            Err(other) => panic!("expected StorageCorrupt, got {:?}", other),
            Ok(_) => panic!("expected StorageCorrupt, got a store"),
        }
    }

    #[test]
    fn upsert_replaces_in_place_and_keeps_order() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::open(dir.path().join("memory.json")).unwrap();

        store.upsert_patient(patient("p2", "Bo")).unwrap();
        store.upsert_patient(patient("p1", "Ada")).unwrap();
        store.upsert_patient(patient("p3", "Cy")).unwrap();
        store.upsert_patient(patient("p2", "Bo Updated")).unwrap();

        let listed = store.list_patients().unwrap();
        assert_eq!(ids(&listed), vec!["p2", "p1", "p3"]);
        assert_eq!(listed[0].name, "Bo Updated");
        assert_eq!(store.get_patient("p2").unwrap().unwrap().name, "Bo Updated");
        assert!(store.get_patient("nobody").unwrap().is_none());
    }

    /// Patients, their order, and events survive closing and reopening.
    #[test]
    fn state_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("memory.json");
        {
            let store = JsonStore::open(&path).unwrap();
            store.upsert_patient(patient("zed", "Zed")).unwrap();
            store.upsert_patient(patient("amy", "Amy")).unwrap();
            store
                .append_event(Event::dose("zed", Some("Aspirin".into()), true, true))
                .unwrap();
        }

        let reopened = JsonStore::open(&path).unwrap();
        assert_eq!(ids(&reopened.list_patients().unwrap()), vec!["zed", "amy"]);
        let events = reopened.events_for_patient("zed").unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].timestamp.is_some());
    }

    #[test]
    fn document_layout_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("memory.json");
        let store = JsonStore::open(&path).unwrap();
        store.upsert_patient(patient("p1", "Ada")).unwrap();
        store.append_event(Event::interaction("p1", "A + B: reason")).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["patients"]["p1"]["name"], "Ada");
        assert_eq!(raw["events"][0]["type"], "interaction");
        assert_eq!(raw["events"][0]["patient_id"], "p1");
        assert_eq!(raw["events"][0]["interaction"], "A + B: reason");
    }

    #[test]
    fn append_event_keeps_explicit_timestamp() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::open(dir.path().join("memory.json")).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();

        let stored = store
            .append_event(Event::symptom("p1", "Headache", 3, Severity::Low).at(at))
            .unwrap();
        assert_eq!(stored.timestamp, Some(at));
    }

    #[test]
    fn events_are_filtered_per_patient_in_append_order() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::open(dir.path().join("memory.json")).unwrap();
        store.append_event(Event::interaction("p1", "first")).unwrap();
        store.append_event(Event::interaction("p2", "other")).unwrap();
        store.append_event(Event::interaction("p1", "second")).unwrap();

        let texts: Vec<String> = store
            .events_for_patient("p1")
            .unwrap()
            .into_iter()
            .map(|e| match e.kind {
                EventKind::Interaction { interaction } => interaction,
                other => panic!("expected interaction, got {:?}", other),
            })
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(store.all_events().unwrap().len(), 3);
    }

    /// Events may reference patients the store has never seen.
    #[test]
    fn events_for_unknown_patient_are_accepted() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::open(dir.path().join("memory.json")).unwrap();
        store.append_event(Event::dose("ghost", None, true, false)).unwrap();
        assert_eq!(store.events_for_patient("ghost").unwrap().len(), 1);
        assert!(store.get_patient("ghost").unwrap().is_none());
    }

    #[test]
    fn hand_written_file_order_is_preserved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("memory.json");
        fs::write(
            &path,
            r#"{
                "patients": {
                    "b": {"patient_id": "b", "name": "B", "age": 1},
                    "a": {"patient_id": "a", "name": "A", "age": 2}
                },
                "events": []
            }"#,
        )
        .unwrap();

        let store = JsonStore::open(&path).unwrap();
        let listed = store.list_patients().unwrap();
        assert_eq!(ids(&listed), vec!["b", "a"]);
        assert!(listed[1].medications.is_empty());
    }

    const WRITERS: usize = 8;
    const WRITES_EACH: usize = 25;

    /// Concurrent appends from many threads all land, in memory and on disk.
    #[test]
    fn concurrent_appends_are_not_lost() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("memory.json");
        let store = Arc::new(JsonStore::open(&path).unwrap());

        let handles: Vec<_> = (0..WRITERS)
            .map(|w| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..WRITES_EACH {
                        store
                            .append_event(Event::interaction(format!("p{w}"), format!("event {i}")))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.all_events().unwrap().len(), WRITERS * WRITES_EACH);
        drop(store);

        let reopened = JsonStore::open(&path).unwrap();
        assert_eq!(reopened.all_events().unwrap().len(), WRITERS * WRITES_EACH);
        for w in 0..WRITERS {
            assert_eq!(reopened.events_for_patient(&format!("p{w}")).unwrap().len(), WRITES_EACH);
        }
    }

    // ── NotificationLog ──────────────────────────────────────────────────────

    #[test]
    fn concurrent_notifications_are_not_lost() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notifications.json");
        let log = Arc::new(NotificationLog::open(&path).unwrap());

        let handles: Vec<_> = (0..WRITERS)
            .map(|w| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    for i in 0..WRITES_EACH {
                        log.notify_caregiver(&format!("p{w}"), &format!("message {i}"), Severity::High)
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        drop(log);

        let reopened = NotificationLog::open(&path).unwrap();
        assert_eq!(reopened.all().unwrap().len(), WRITERS * WRITES_EACH);
        assert_eq!(reopened.for_patient("p0").unwrap().len(), WRITES_EACH);
    }

    #[test]
    fn notifications_are_recorded_and_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notifications.json");
        {
            let log = NotificationLog::open(&path).unwrap();
            let n = log
                .notify_caregiver("p1", "Critical symptom: Chest pain", Severity::Critical)
                .unwrap();
            assert_eq!(n.status, NotificationStatus::Sent);
            log.notify_caregiver("p2", "Interactions", Severity::High).unwrap();
        }

        let reopened = NotificationLog::open(&path).unwrap();
        assert_eq!(reopened.all().unwrap().len(), 2);
        let p1 = reopened.for_patient("p1").unwrap();
        assert_eq!(p1.len(), 1);
        assert_eq!(p1[0].severity, Severity::Critical);

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[0]["status"], "sent");
        assert_eq!(raw[1]["severity"], "high");
    }

    #[test]
    fn corrupt_notification_log_fails_open() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notifications.json");
        fs::write(&path, "{}").unwrap();
        assert!(matches!(
            NotificationLog::open(&path),
            Err(MediError::StorageCorrupt { .. })
        ));
    }

    // ── Reminder registry ────────────────────────────────────────────────────

    #[test]
    fn job_ids_are_unique_and_well_formed() {
        let registry = InMemoryReminderRegistry::new();
        let mut seen = HashSet::new();
        for i in 0..200 {
            let id = registry.schedule_job("p1", "Aspirin", &format!("{:02}:00", i % 24)).unwrap();
            assert!(id.starts_with("job_"));
            assert_eq!(id.len(), 12);
            assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
            assert!(seen.insert(id));
        }
        assert_eq!(registry.all_jobs().unwrap().len(), 200);
    }

    #[test]
    fn jobs_are_listed_per_patient_and_cancellable() {
        let registry = InMemoryReminderRegistry::new();
        let first = registry.schedule_job("p1", "Aspirin", "09:00").unwrap();
        registry.schedule_job("p2", "Metformin", "08:00").unwrap();
        let second = registry.schedule_job("p1", "Aspirin", "21:00").unwrap();

        let jobs = registry.jobs_for_patient("p1").unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].job_id, first);
        assert_eq!(jobs[1].job_id, second);
        assert!(jobs.iter().all(|j| j.status == JobStatus::Scheduled));

        assert!(registry.cancel_job(&first).unwrap());
        assert!(!registry.cancel_job("job_missing").unwrap());
        let jobs = registry.jobs_for_patient("p1").unwrap();
        assert_eq!(jobs[0].status, JobStatus::Cancelled);
        assert_eq!(jobs[1].status, JobStatus::Scheduled);
    }
}
