//! Caregiver notifications and reminder jobs.
//!
//! Neither record carries delivery semantics: a `Notification` is a log
//! entry with a fixed `sent` status, and a `ReminderJob` is bookkeeping for
//! a reminder that nothing ever fires.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::triage::Severity;

/// Status of a notification record. Only `sent` exists; there is no retry
/// or delivery confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Sent,
}

/// One caregiver notification, appended to the notification log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub patient_id: String,
    pub message: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub status: NotificationStatus,
}

/// Lifecycle state of a reminder job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Scheduled,
    Cancelled,
}

/// A reminder job held by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderJob {
    /// Generated identifier of the form `job_<8 hex digits>`.
    pub job_id: String,
    pub patient_id: String,
    pub medication: String,
    /// Time of day as `"HH:MM"`.
    pub time: String,
    pub created_at: DateTime<Utc>,
    pub status: JobStatus,
}

/// The short job descriptor returned by the `schedule_reminders` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledReminder {
    pub job_id: String,
    pub medication: String,
    pub time: String,
}
