//! File-backed `PatientStore`.
//!
//! The whole `StoreDocument` lives in memory behind a single `Mutex`. Every
//! mutation builds the next document, rewrites the file, and only then
//! replaces the in-memory copy, so a failed write leaves the store as it was.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, info};

use medibuddy_contracts::{
    error::{MediError, MediResult},
    event::Event,
    patient::Patient,
};
use medibuddy_core::traits::PatientStore;

use crate::document::StoreDocument;

/// Read `path` as JSON of type `T`.
///
/// A missing file yields `T::default()`; an unreadable or unparseable file
/// is a `StorageCorrupt` error.
pub(crate) fn load_json<T>(path: &Path) -> MediResult<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }
    let contents = fs::read_to_string(path).map_err(|e| MediError::StorageCorrupt {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|e| MediError::StorageCorrupt {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Pretty-print `value` and overwrite `path` with it.
pub(crate) fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> MediResult<()> {
    let body = serde_json::to_string_pretty(value).map_err(|e| MediError::StorageFailed {
        reason: format!("failed to serialize '{}': {}", path.display(), e),
    })?;
    fs::write(path, body).map_err(|e| MediError::StorageFailed {
        reason: format!("failed to write '{}': {}", path.display(), e),
    })
}

/// Create the parent directory of `path` if it has one.
pub(crate) fn ensure_parent(path: &Path) -> MediResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| MediError::StorageFailed {
                reason: format!("failed to create '{}': {}", parent.display(), e),
            })
        }
        _ => Ok(()),
    }
}

/// A `PatientStore` persisted as one pretty-printed JSON document.
pub struct JsonStore {
    path: PathBuf,
    state: Mutex<StoreDocument>,
}

impl JsonStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// Parent directories are created. The file itself is not written until
    /// the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> MediResult<Self> {
        let path = path.into();
        ensure_parent(&path)?;
        let document: StoreDocument = load_json(&path)?;

        info!(
            path = %path.display(),
            patients = document.patients.len(),
            events = document.events.len(),
            "opened patient store"
        );

        Ok(Self {
            path,
            state: Mutex::new(document),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MediResult<MutexGuard<'_, StoreDocument>> {
        self.state.lock().map_err(|e| MediError::StorageFailed {
            reason: format!("store lock poisoned: {}", e),
        })
    }

    /// Apply `mutate` to a copy of the document, persist it, then commit.
    fn commit<R>(&self, mutate: impl FnOnce(&mut StoreDocument) -> R) -> MediResult<R> {
        let mut state = self.lock()?;
        let mut next = state.clone();
        let result = mutate(&mut next);
        write_json(&self.path, &next)?;
        *state = next;
        Ok(result)
    }
}

impl PatientStore for JsonStore {
    fn upsert_patient(&self, patient: Patient) -> MediResult<()> {
        let patient_id = patient.patient_id.clone();
        let replaced = self.commit(|doc| doc.upsert(patient))?;
        info!(patient_id = %patient_id, replaced, "saved patient");
        Ok(())
    }

    fn get_patient(&self, patient_id: &str) -> MediResult<Option<Patient>> {
        let state = self.lock()?;
        let found = state.patient(patient_id).cloned();
        debug!(patient_id = %patient_id, found = found.is_some(), "patient lookup");
        Ok(found)
    }

    fn list_patients(&self) -> MediResult<Vec<Patient>> {
        Ok(self.lock()?.patients.clone())
    }

    fn append_event(&self, mut event: Event) -> MediResult<Event> {
        if event.timestamp.is_none() {
            event.timestamp = Some(Utc::now());
        }
        let stored = event.clone();
        self.commit(|doc| doc.events.push(event))?;
        info!(
            patient_id = %stored.patient_id,
            event_type = stored.type_name(),
            "appended event"
        );
        Ok(stored)
    }

    fn events_for_patient(&self, patient_id: &str) -> MediResult<Vec<Event>> {
        let state = self.lock()?;
        Ok(state
            .events
            .iter()
            .filter(|e| e.patient_id == patient_id)
            .cloned()
            .collect())
    }

    fn all_events(&self) -> MediResult<Vec<Event>> {
        Ok(self.lock()?.events.clone())
    }
}
