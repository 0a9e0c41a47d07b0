//! Append-only caregiver notification log.
//!
//! Notifications are kept as a flat JSON array on disk. There is no delivery
//! channel: recording the entry and emitting the `warn!` line is the whole
//! effect.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::{info, warn};

use medibuddy_contracts::{
    care::{Notification, NotificationStatus},
    error::{MediError, MediResult},
    triage::Severity,
};
use medibuddy_core::traits::CaregiverNotifier;

use crate::json_store::{ensure_parent, load_json, write_json};

pub struct NotificationLog {
    path: PathBuf,
    entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
    /// Open the log at `path`. A missing file is an empty log.
    pub fn open(path: impl Into<PathBuf>) -> MediResult<Self> {
        let path = path.into();
        ensure_parent(&path)?;
        let entries: Vec<Notification> = load_json(&path)?;
        info!(path = %path.display(), notifications = entries.len(), "opened notification log");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MediResult<MutexGuard<'_, Vec<Notification>>> {
        self.entries.lock().map_err(|e| MediError::StorageFailed {
            reason: format!("notification log lock poisoned: {}", e),
        })
    }

    /// Every notification in the order it was recorded.
    pub fn all(&self) -> MediResult<Vec<Notification>> {
        Ok(self.lock()?.clone())
    }

    pub fn for_patient(&self, patient_id: &str) -> MediResult<Vec<Notification>> {
        Ok(self
            .lock()?
            .iter()
            .filter(|n| n.patient_id == patient_id)
            .cloned()
            .collect())
    }
}

impl CaregiverNotifier for NotificationLog {
    fn notify_caregiver(
        &self,
        patient_id: &str,
        message: &str,
        severity: Severity,
    ) -> MediResult<Notification> {
        let notification = Notification {
            patient_id: patient_id.to_string(),
            message: message.to_string(),
            severity,
            timestamp: Utc::now(),
            status: NotificationStatus::Sent,
        };

        let mut entries = self.lock()?;
        let mut next = entries.clone();
        next.push(notification.clone());
        write_json(&self.path, &next)?;
        *entries = next;

        warn!(
            "[CAREGIVER NOTIFICATION] {} - Patient {}: {}",
            severity.as_str().to_uppercase(),
            patient_id,
            message
        );
        Ok(notification)
    }
}
