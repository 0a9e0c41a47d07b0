//! # medibuddy-core
//!
//! The orchestration layer of the MediBuddy runtime.
//!
//! This crate provides:
//! - The component traits (`PatientStore`, `InteractionLookup`,
//!   `TriageClassifier`, `ReminderRegistry`, `CaregiverNotifier`,
//!   `PayloadValidator`)
//! - The `Orchestrator` that dispatches the four named actions over them
//! - Adherence analytics derived from a patient's event history
//!
//! ## Usage
//!
//! ```rust,ignore
//! use medibuddy_core::{Orchestrator, traits::{PatientStore, InteractionLookup}};
//! ```

pub mod analytics;
pub mod orchestrator;
pub mod traits;

pub use orchestrator::{Orchestrator, DEFAULT_TIME_SLOTS};
