//! # Error Types
//!
//! Structured error types for risk_core. Configuration problems are reported
//! with the offending field path (e.g. `zones[0].fire.occupancy.nt`) so a
//! caller can point the user at the exact input to fix.
//!
//! ## Example
//!
//! ```rust
//! use risk_core::errors::{CalcError, CalcResult};
//!
//! fn validate_flash_density(ng: f64) -> CalcResult<()> {
//!     if ng <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "structure.ng",
//!             ng.to_string(),
//!             "Ground flash density must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for risk_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for risk calculations and assessment files.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Two zones share a name, so their breakdowns could not be told apart
    #[error("Duplicate zone name: {zone}")]
    DuplicateZone { zone: String },

    /// A risk evaluation produced a non-finite value
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
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
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a DuplicateZone error
    pub fn duplicate_zone(zone: impl Into<String>) -> Self {
        CalcError::DuplicateZone { zone: zone.into() }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(path: impl Into<String>, locked_by: impl Into<String>, locked_at: impl Into<String>) -> Self {
        CalcError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Create a SerializationError from any displayable cause
    pub fn serialization(reason: impl std::fmt::Display) -> Self {
        CalcError::SerializationError {
            reason: reason.to_string(),
        }
    }

    /// Whether the error comes from bad input rather than the environment
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. } | CalcError::MissingField { .. } | CalcError::DuplicateZone { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::DuplicateZone { .. } => "DUPLICATE_ZONE",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::FileLocked { .. } => "FILE_LOCKED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

/// Reject NaN/Inf and negative values for a coefficient.
pub(crate) fn ensure_non_negative(field: impl Into<String>, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be finite"));
    }
    if value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value cannot be negative"));
    }
    Ok(())
}

/// Reject NaN/Inf and values that are zero or negative.
pub(crate) fn ensure_positive(field: impl Into<String>, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be finite"));
    }
    if value <= 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("zones[0].shock.nt", "0", "Value must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("test").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::duplicate_zone("Z1").error_code(), "DUPLICATE_ZONE");
        assert!(CalcError::duplicate_zone("Z1").is_configuration_error());
        assert!(!CalcError::serialization("bad").is_configuration_error());
    }

    #[test]
    fn test_value_guards() {
        assert!(ensure_positive("nt", 1.0).is_ok());
        assert!(ensure_positive("nt", 0.0).is_err());
        assert!(ensure_positive("nt", f64::NAN).is_err());
        assert!(ensure_non_negative("ct", 0.0).is_ok());
        assert!(ensure_non_negative("ct", -1.0).is_err());
        assert!(ensure_non_negative("ct", f64::INFINITY).is_err());
    }
}
