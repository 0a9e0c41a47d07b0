//! Boundary payload validation report types.
//!
//! Inputs arriving from outside the core (patient records, action data) are
//! checked against a schema before they are trusted. A report collects every
//! failure so the caller sees the whole picture in one pass.

use serde::{Deserialize, Serialize};

/// The result of validating one payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True only if no failures were recorded.
    pub passed: bool,
    pub failures: Vec<ValidationFailure>,
}

impl ValidationReport {
    /// A passing report with no failures.
    pub fn pass() -> Self {
        Self { passed: true, failures: Vec::new() }
    }

    /// Build a report from collected failures; passes when empty.
    pub fn from_failures(failures: Vec<ValidationFailure>) -> Self {
        Self { passed: failures.is_empty(), failures }
    }

    /// All failure messages joined as `"[rule] message; ..."`.
    pub fn describe(&self) -> String {
        self.failures
            .iter()
            .map(|f| format!("[{}] {}", f.rule_id, f.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A single failure within a `ValidationReport`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Identifier of the check that failed (e.g. `"json-schema"`).
    pub rule_id: String,
    pub message: String,
}
