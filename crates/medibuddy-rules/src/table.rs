//! Immutable, symmetric medication interaction table.
//!
//! `InteractionTable` is built once at startup (from the embedded default,
//! a TOML string, or a file) and then handed to the orchestrator, which only
//! ever reads it.
//!
//! Lookup algorithm:
//!
//! 1. Lowercase both names.
//! 2. Sort the pair so `(a, b)` and `(b, a)` share one key.
//! 3. Look the key up in a `HashMap`.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, warn};

use medibuddy_contracts::error::{MediError, MediResult};
use medibuddy_core::traits::InteractionLookup;

use crate::entry::{InteractionConfig, InteractionEntry};

/// The interaction table shipped with the runtime.
const DEFAULT_TABLE: &str = include_str!("../interactions/default.toml");

/// Normalized, order-independent key for a medication pair.
fn pair_key(drug_a: &str, drug_b: &str) -> (String, String) {
    let a = drug_a.to_lowercase();
    let b = drug_b.to_lowercase();
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// An `InteractionLookup` backed by an in-memory map of normalized pairs.
///
/// ```rust,ignore
/// use medibuddy_rules::InteractionTable;
///
/// let table = InteractionTable::builtin()?;
/// assert!(table.check_interaction("Warfarin", "ASPIRIN").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InteractionTable {
    entries: HashMap<(String, String), String>,
}

impl InteractionTable {
    /// An empty table. Every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// The embedded default table.
    pub fn builtin() -> MediResult<Self> {
        Self::from_toml_str(DEFAULT_TABLE)
    }

    /// Parse `s` as TOML and build a table from its `[[interactions]]`.
    ///
    /// Returns `MediError::ConfigError` if the TOML is malformed, or if the
    /// same pair is listed twice with different reasons.
    pub fn from_toml_str(s: &str) -> MediResult<Self> {
        let config: InteractionConfig = toml::from_str(s).map_err(|e| MediError::ConfigError {
            reason: format!("failed to parse interaction TOML: {}", e),
        })?;
        Self::from_entries(config.interactions)
    }

    /// Read the file at `path` and parse it as an interaction table.
    pub fn from_file(path: &Path) -> MediResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| MediError::ConfigError {
            reason: format!("failed to read interaction table '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Build a table from already-parsed entries.
    pub fn from_entries(entries: Vec<InteractionEntry>) -> MediResult<Self> {
        let mut table = Self::new();
        for entry in entries {
            let key = pair_key(&entry.drug_a, &entry.drug_b);
            match table.entries.get(&key) {
                Some(existing) if *existing != entry.reason => {
                    warn!(drug_a = %entry.drug_a, drug_b = %entry.drug_b, "conflicting interaction entries");
                    return Err(MediError::ConfigError {
                        reason: format!(
                            "interaction '{} + {}' listed twice with different reasons",
                            entry.drug_a, entry.drug_b
                        ),
                    });
                }
                Some(_) => continue,
                None => {
                    table.entries.insert(key, entry.reason);
                }
            }
        }
        info!(pairs = table.entries.len(), "interaction table loaded");
        Ok(table)
    }

    /// Add or replace an interaction. Only affects this table instance.
    pub fn add_interaction(&mut self, drug_a: &str, drug_b: &str, reason: impl Into<String>) {
        self.entries.insert(pair_key(drug_a, drug_b), reason.into());
        info!(drug_a = %drug_a, drug_b = %drug_b, "added interaction");
    }

    /// Number of distinct unordered pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl InteractionLookup for InteractionTable {
    fn check_interaction(&self, drug_a: &str, drug_b: &str) -> Option<String> {
        let found = self.entries.get(&pair_key(drug_a, drug_b)).cloned();
        debug!(drug_a = %drug_a, drug_b = %drug_b, hit = found.is_some(), "interaction lookup");
        found
    }

    fn check_all_pairs(&self, names: &[String]) -> Vec<String> {
        if names.len() < 2 {
            return Vec::new();
        }

        let mut warnings = Vec::new();
        for (i, first) in names.iter().enumerate() {
            for second in &names[i + 1..] {
                if let Some(reason) = self.check_interaction(first, second) {
                    let warning = format!("{} + {}: {}", first, second, reason);
                    warn!(warning = %warning, "interaction detected");
                    warnings.push(warning);
                }
            }
        }
        warnings
    }
}
