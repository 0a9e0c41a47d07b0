//! Orchestration actions and their outcomes.
//!
//! `Action` is the fixed dispatch table the orchestrator understands.
//! `OrchestrationOutcome` is what every call to `orchestrate()` returns,
//! including not-found and validation failures, which are reported as
//! `status = "error"` outcomes rather than as `Err`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    care::ScheduledReminder,
    error::MediError,
    summary::Summary,
    triage::TriageResult,
};

/// The four actions the orchestrator dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    CheckInteractions,
    ScheduleReminders,
    LogSymptom,
    FullCheck,
}

impl Action {
    /// Every action, in dispatch-table order.
    pub const ALL: [Action; 4] = [
        Action::CheckInteractions,
        Action::ScheduleReminders,
        Action::LogSymptom,
        Action::FullCheck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::CheckInteractions => "check_interactions",
            Action::ScheduleReminders => "schedule_reminders",
            Action::LogSymptom => "log_symptom",
            Action::FullCheck => "full_check",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = MediError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| MediError::UnknownAction { action: s.to_string() })
    }
}

/// Top-level status of an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Error,
}

/// Result of `check_interactions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionReport {
    /// One formatted warning per interacting pair.
    pub interactions: Vec<String>,
    pub medication_count: usize,
}

/// Result of `schedule_reminders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderReport {
    pub reminders_scheduled: usize,
    pub jobs: Vec<ScheduledReminder>,
}

/// Result of `log_symptom`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomReport {
    pub triage: TriageResult,
    pub symptom: String,
}

/// Result of `full_check`: the three sub-results nested under named keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullCheckReport {
    pub interactions: InteractionReport,
    pub reminders: ReminderReport,
    pub summary: Summary,
}

/// Action-specific fields, flattened into the outcome mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ActionReport {
    FullCheck(FullCheckReport),
    Interactions(InteractionReport),
    Reminders(ReminderReport),
    Symptom(SymptomReport),
}

/// The structured result of one orchestration call.
///
/// Serializes to a flat mapping: `status`, `action`, `patient_id`, an
/// optional `message`, plus the fields of the action's report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrchestrationOutcome {
    pub status: OutcomeStatus,
    /// The action name as requested, even when it was not recognized.
    pub action: String,
    pub patient_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub report: Option<ActionReport>,
}

impl OrchestrationOutcome {
    /// A successful outcome carrying `report`.
    pub fn success(action: Action, patient_id: impl Into<String>, report: ActionReport) -> Self {
        Self {
            status: OutcomeStatus::Success,
            action: action.as_str().to_string(),
            patient_id: patient_id.into(),
            message: None,
            report: Some(report),
        }
    }

    /// An error outcome with a human-readable `message` and no report.
    pub fn error(
        action: impl Into<String>,
        patient_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status: OutcomeStatus::Error,
            action: action.into(),
            patient_id: patient_id.into(),
            message: Some(message.into()),
            report: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }

    /// The interaction report, whether direct or nested in a full check.
    pub fn interactions(&self) -> Option<&InteractionReport> {
        match &self.report {
            Some(ActionReport::Interactions(r)) => Some(r),
            Some(ActionReport::FullCheck(r)) => Some(&r.interactions),
            _ => None,
        }
    }

    /// The reminder report, whether direct or nested in a full check.
    pub fn reminders(&self) -> Option<&ReminderReport> {
        match &self.report {
            Some(ActionReport::Reminders(r)) => Some(r),
            Some(ActionReport::FullCheck(r)) => Some(&r.reminders),
            _ => None,
        }
    }

    pub fn symptom(&self) -> Option<&SymptomReport> {
        match &self.report {
            Some(ActionReport::Symptom(r)) => Some(r),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&Summary> {
        match &self.report {
            Some(ActionReport::FullCheck(r)) => Some(&r.summary),
            _ => None,
        }
    }
}
