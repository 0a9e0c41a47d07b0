//! # medibuddy-runtime
//!
//! The configured MediBuddy service: a JSON patient store, caregiver
//! notification log, in-memory reminder registry, the built-in (or
//! configured) interaction table, keyword triage, and boundary schema
//! validation, all composed behind one `MediBuddy` handle.

pub mod config;
pub mod runtime;

pub use config::MediConfig;
pub use runtime::{MediBuddy, ServiceStatus};
