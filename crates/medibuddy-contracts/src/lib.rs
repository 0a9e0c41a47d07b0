//! # medibuddy-contracts
//!
//! Shared records, outcomes, and error types for the MediBuddy runtime.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions and error types.

pub mod care;
pub mod error;
pub mod event;
pub mod outcome;
pub mod patient;
pub mod summary;
pub mod triage;
pub mod validate;
