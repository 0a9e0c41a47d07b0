//! Interaction table configuration schema.
//!
//! An `InteractionConfig` is deserialized from TOML and holds a flat list of
//! `InteractionEntry`s. Each entry names an unordered pair of medications;
//! listing a pair once covers both orderings.

use serde::{Deserialize, Serialize};

/// A single known interaction loaded from TOML.
///
/// Example in TOML:
/// ```toml
/// [[interactions]]
/// drug_a = "aspirin"
/// drug_b = "warfarin"
/// reason = "Increased bleeding risk"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEntry {
    /// One medication of the pair. Matched case-insensitively.
    pub drug_a: String,

    /// The other medication of the pair. Matched case-insensitively.
    pub drug_b: String,

    /// Warning text reported verbatim when the pair is found.
    pub reason: String,
}

/// The top-level structure deserialized from an interaction table file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionConfig {
    #[serde(default)]
    pub interactions: Vec<InteractionEntry>,
}
