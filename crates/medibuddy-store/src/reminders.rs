//! In-memory reminder registry.
//!
//! Jobs are bookkeeping only: nothing fires them, and they do not survive a
//! restart.

use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use medibuddy_contracts::{
    care::{JobStatus, ReminderJob},
    error::{MediError, MediResult},
};
use medibuddy_core::traits::ReminderRegistry;

/// `job_` followed by the first 8 hex digits of a v4 UUID.
fn new_job_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("job_{}", &hex[..8])
}

#[derive(Default)]
pub struct InMemoryReminderRegistry {
    jobs: Mutex<Vec<ReminderJob>>,
}

impl InMemoryReminderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MediResult<MutexGuard<'_, Vec<ReminderJob>>> {
        self.jobs.lock().map_err(|e| MediError::StorageFailed {
            reason: format!("reminder registry lock poisoned: {}", e),
        })
    }

    /// Every job in scheduling order, cancelled ones included.
    pub fn all_jobs(&self) -> MediResult<Vec<ReminderJob>> {
        Ok(self.lock()?.clone())
    }
}

impl ReminderRegistry for InMemoryReminderRegistry {
    fn schedule_job(&self, patient_id: &str, medication: &str, time: &str) -> MediResult<String> {
        let mut jobs = self.lock()?;

        // Ids are only 32 bits wide; retry until unique.
        let mut job_id = new_job_id();
        while jobs.iter().any(|j| j.job_id == job_id) {
            job_id = new_job_id();
        }

        jobs.push(ReminderJob {
            job_id: job_id.clone(),
            patient_id: patient_id.to_string(),
            medication: medication.to_string(),
            time: time.to_string(),
            created_at: Utc::now(),
            status: JobStatus::Scheduled,
        });

        info!(job_id = %job_id, patient_id = %patient_id, medication = %medication, time = %time, "scheduled reminder");
        Ok(job_id)
    }

    fn jobs_for_patient(&self, patient_id: &str) -> MediResult<Vec<ReminderJob>> {
        Ok(self
            .lock()?
            .iter()
            .filter(|j| j.patient_id == patient_id)
            .cloned()
            .collect())
    }

    fn cancel_job(&self, job_id: &str) -> MediResult<bool> {
        let mut jobs = self.lock()?;
        match jobs.iter_mut().find(|j| j.job_id == job_id) {
            Some(job) => {
                job.status = JobStatus::Cancelled;
                info!(job_id = %job_id, "cancelled reminder");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
