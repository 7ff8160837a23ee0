//! # Error Types
//!
//! Structured error types for bulkflow_core. These errors are designed to be
//! informative for both humans and LLMs, providing enough context to
//! understand and fix issues programmatically.
//!
//! Rejected user input is reported as [`CalcError::ValidationFailed`] carrying
//! every violation message, never just the first one. Table and conversion
//! misses ([`CalcError::KeyNotFound`], [`CalcError::UnknownQuantityKind`]) are
//! internal-consistency faults: validation already constrains inputs to the
//! tabulated keys, so they should not be reachable from a validated request.
//!
//! ## Example
//!
//! ```rust
//! use bulkflow_core::errors::{CalcError, CalcResult};
//!
//! fn check_speed(belt_speed_fpm: f64) -> CalcResult<()> {
//!     if belt_speed_fpm <= 0.0 {
//!         return Err(CalcError::validation_failed(
//!             "belt_horsepower",
//!             vec!["Belt speed must be greater than 0".to_string()],
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_speed(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for bulkflow_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// One or more input values were rejected by the calculator's validation
    #[error("Invalid input for '{calculator}': {}", .violations.join("; "))]
    ValidationFailed {
        calculator: String,
        violations: Vec<String>,
    },

    /// An exact-match table lookup missed
    #[error("Key not found in table '{table}': {key}")]
    KeyNotFound { table: String, key: String },

    /// A conversion was requested for a quantity with no linear factor
    #[error("Unknown quantity kind: {kind}")]
    UnknownQuantityKind { kind: String },

    /// No calculator is registered under this id
    #[error("Unknown calculator: {id}")]
    UnknownCalculator { id: String },

    /// Material not found in the catalog
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create a ValidationFailed error
    pub fn validation_failed(calculator: impl Into<String>, violations: Vec<String>) -> Self {
        CalcError::ValidationFailed {
            calculator: calculator.into(),
            violations,
        }
    }

    /// Create a KeyNotFound error
    pub fn key_not_found(table: impl Into<String>, key: impl ToString) -> Self {
        CalcError::KeyNotFound {
            table: table.into(),
            key: key.to_string(),
        }
    }

    /// Create an UnknownQuantityKind error
    pub fn unknown_quantity_kind(kind: impl Into<String>) -> Self {
        CalcError::UnknownQuantityKind { kind: kind.into() }
    }

    /// Create an UnknownCalculator error
    pub fn unknown_calculator(id: impl Into<String>) -> Self {
        CalcError::UnknownCalculator { id: id.into() }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
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

    /// Create a SerializationError
    pub fn serialization(reason: impl ToString) -> Self {
        CalcError::SerializationError {
            reason: reason.to_string(),
        }
    }

    /// Violation messages carried by a validation rejection (empty otherwise)
    pub fn violations(&self) -> &[String] {
        match self {
            CalcError::ValidationFailed { violations, .. } => violations,
            _ => &[],
        }
    }

    /// True for faults that indicate inconsistent tables rather than bad input
    pub fn is_internal_fault(&self) -> bool {
        matches!(
            self,
            CalcError::KeyNotFound { .. } | CalcError::UnknownQuantityKind { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::ValidationFailed { .. } => "VALIDATION_FAILED",
            CalcError::KeyNotFound { .. } => "KEY_NOT_FOUND",
            CalcError::UnknownQuantityKind { .. } => "UNKNOWN_QUANTITY_KIND",
            CalcError::UnknownCalculator { .. } => "UNKNOWN_CALCULATOR",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err)
    }
}
