//! Severity levels and triage results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete severity classification.
///
/// Used both as the triage level attached to symptom events and as the
/// severity of caregiver notifications. Variants are ordered from least to
/// most severe, so `Severity::High < Severity::Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Lowercase wire name (`"low"`, `"medium"`, `"high"`, `"critical"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// True for levels that warrant a caregiver notification.
    pub fn is_urgent(&self) -> bool {
        matches!(self, Severity::High | Severity::Critical)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the triage classifier for one reported symptom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResult {
    pub level: Severity,
    /// The severity number exactly as reported.
    pub severity: i64,
    pub recommendation: String,
    pub symptom: String,
}
