//! # Error Types
//!
//! Structured error types for pile_core. Every fallible operation returns a
//! [`CalcResult`], and each [`CalcError`] variant carries enough context for a
//! caller (human or program) to locate the offending field.
//!
//! Non-fatal conditions that still deserve the engineer's attention are
//! reported separately as [`DomainWarning`] values attached to results.
//!
//! ## Example
//!
//! ```rust
//! use pile_core::errors::{CalcError, CalcResult};
//!
//! fn validate_increment(increment_ft: f64) -> CalcResult<()> {
//!     if increment_ft <= 0.0 {
//!         return Err(CalcError::invalid_profile(
//!             "increment_ft",
//!             increment_ft.to_string(),
//!             "Sublayer increment must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_increment(0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pile_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for capacity calculations and project handling.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// The soil profile cannot be discretized (misaligned depths, bad layer data)
    #[error("Invalid soil profile at '{field}': {value} - {reason}")]
    InvalidProfile {
        field: String,
        value: String,
        reason: String,
    },

    /// A foundation configuration does not fit the profile or is unsupported
    #[error("Invalid foundation configuration at '{field}': {value} - {reason}")]
    InvalidConfiguration {
        field: String,
        value: String,
        reason: String,
    },

    /// A project record field is invalid (empty lists, out-of-range values)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidProfile error
    pub fn invalid_profile(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidProfile {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfiguration error
    pub fn invalid_configuration(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidConfiguration {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(
        path: impl Into<String>,
        locked_by: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidProfile { .. } => "INVALID_PROFILE",
            CalcError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Non-fatal condition reported alongside a result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum DomainWarning {
    /// Effective stress was frozen below 20 pile widths (the 20B rule)
    EffectiveStressLimited { limiting_depth_ft: f64 },
}

impl std::fmt::Display for DomainWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainWarning::EffectiveStressLimited { limiting_depth_ft } => write!(
                f,
                "Effective stress limited below {:.2} ft (20B rule)",
                limiting_depth_ft
            ),
        }
    }
}
