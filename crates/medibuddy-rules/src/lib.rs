//! medibuddy-rules: the knowledge tables the orchestrator consults.
//!
//! Two pure components live here:
//!
//! - `InteractionTable`: a symmetric, case-insensitive medication
//!   interaction lookup loaded from TOML (an embedded default ships with the
//!   crate).
//! - `KeywordTriage`: maps a symptom description and reported severity to a
//!   triage level and recommendation.
//!
//! Neither component performs I/O after construction.

pub mod entry;
pub mod table;
pub mod triage;

pub use entry::{InteractionConfig, InteractionEntry};
pub use table::InteractionTable;
pub use triage::KeywordTriage;
