//! Error types for the MediBuddy runtime.
//!
//! Not-found and validation conditions normally surface as error *outcomes*
//! from the orchestrator; they exist here so lower layers (the CLI, analytics,
//! action parsing) can report them with the same wording. Storage faults are
//! the only errors that propagate out of `orchestrate()`.

use thiserror::Error;

/// The unified error type for the MediBuddy crates.
#[derive(Debug, Error)]
pub enum MediError {
    /// No patient with this identifier exists in the store.
    #[error("Patient {patient_id} not found")]
    PatientNotFound { patient_id: String },

    /// The requested action name is not in the dispatch table.
    #[error("Unknown action: {action}")]
    UnknownAction { action: String },

    /// Caller-supplied data is malformed.
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    /// The backing document exists but cannot be parsed.
    ///
    /// Fatal at startup: the store never falls back to partial state.
    #[error("storage document '{path}' is corrupt: {reason}")]
    StorageCorrupt { path: String, reason: String },

    /// Reading, writing, or locking the backing document failed.
    #[error("storage failure: {reason}")]
    StorageFailed { reason: String },

    /// A configuration file or interaction table is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A JSON Schema document could not be compiled.
    #[error("schema validation error: {reason}")]
    SchemaValidation { reason: String },
}

impl MediError {
    /// True for the conditions the orchestrator reports as error outcomes.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MediError::PatientNotFound { .. }
                | MediError::UnknownAction { .. }
                | MediError::Validation { .. }
        )
    }
}

/// Convenience alias used throughout the MediBuddy crates.
pub type MediResult<T> = Result<T, MediError>;
