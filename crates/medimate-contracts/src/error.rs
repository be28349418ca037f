//! Error types for the MediMate triage service.
//!
//! All fallible operations in the workspace return `TriageResult<T>`.
//! Variants follow the four failure classes of an assessment: validation,
//! remote analysis, authorization and unexpected internal failures.

use thiserror::Error;

/// The unified error type for the triage crates.
#[derive(Debug, Error)]
pub enum TriageError {
    /// A required wizard field or request field is missing or invalid.
    ///
    /// Surfaced to the user as-is; never retried.
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    /// The caller presented no bearer token, or one that is not recognised.
    #[error("unauthorized")]
    Unauthorized,

    /// An analysis for this wizard is already running.
    #[error("an analysis is already in progress")]
    AnalysisInFlight,

    /// The remote analysis backend failed. Callers fall back to local analysis.
    #[error("remote analysis failed: {reason}")]
    RemoteAnalysisFailed { reason: String },

    /// A wizard command is not legal in the current state.
    #[error("illegal wizard transition: {reason}")]
    IllegalTransition { reason: String },

    /// A catalog or service configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The history store could not persist or read an assessment.
    #[error("history write failed: {reason}")]
    HistoryWriteFailed { reason: String },

    /// A request or result failed verification.
    #[error("verification failed: {reason}")]
    VerificationFailed { reason: String },
}

impl TriageError {
    pub fn validation(reason: impl Into<String>) -> Self {
        TriageError::Validation { reason: reason.into() }
    }
}

/// Convenience alias used throughout the MediMate crates.
pub type TriageResult<T> = Result<T, TriageError>;
