//! Keyword and threshold symptom triage.

use tracing::info;

use medibuddy_contracts::triage::{Severity, TriageResult};
use medibuddy_core::traits::TriageClassifier;

/// Symptoms that are always critical, whatever severity was reported.
/// Matched as case-insensitive substrings of the symptom text.
pub const CRITICAL_KEYWORDS: [&str; 4] =
    ["chest pain", "difficulty breathing", "seizure", "unconscious"];

pub const EMERGENCY_RECOMMENDATION: &str =
    "SEEK IMMEDIATE MEDICAL ATTENTION - Call emergency services";
pub const CRITICAL_RECOMMENDATION: &str = "Contact healthcare provider immediately";
pub const HIGH_RECOMMENDATION: &str = "Schedule appointment with healthcare provider soon";
pub const MEDIUM_RECOMMENDATION: &str = "Monitor and report at next scheduled visit";
pub const LOW_RECOMMENDATION: &str = "Continue monitoring";

/// Rule order, first match wins:
///
/// 1. A critical keyword appears in the symptom → `Critical`, emergency advice.
/// 2. severity ≥ 8 → `Critical`
/// 3. severity ≥ 6 → `High`
/// 4. severity ≥ 4 → `Medium`
/// 5. otherwise → `Low`
#[derive(Debug, Clone)]
pub struct KeywordTriage {
    critical_keywords: Vec<String>,
}

impl KeywordTriage {
    pub fn new() -> Self {
        Self::with_keywords(CRITICAL_KEYWORDS)
    }

    /// Replace the keyword list. Keywords are lowercased on the way in.
    pub fn with_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            critical_keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    fn matches_keyword(&self, symptom: &str) -> bool {
        let lowered = symptom.to_lowercase();
        self.critical_keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

impl Default for KeywordTriage {
    fn default() -> Self {
        Self::new()
    }
}

impl TriageClassifier for KeywordTriage {
    fn triage(&self, symptom: &str, severity: i64) -> TriageResult {
        let (level, recommendation) = if self.matches_keyword(symptom) {
            (Severity::Critical, EMERGENCY_RECOMMENDATION)
        } else if severity >= 8 {
            (Severity::Critical, CRITICAL_RECOMMENDATION)
        } else if severity >= 6 {
            (Severity::High, HIGH_RECOMMENDATION)
        } else if severity >= 4 {
            (Severity::Medium, MEDIUM_RECOMMENDATION)
        } else {
            (Severity::Low, LOW_RECOMMENDATION)
        };

        info!(symptom = %symptom, severity, level = %level, "triaged symptom");

        TriageResult {
            level,
            severity,
            recommendation: recommendation.to_string(),
            symptom: symptom.to_string(),
        }
    }
}
