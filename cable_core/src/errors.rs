//! # Error Types
//!
//! Structured error types for cable_core. These errors are designed to be
//! informative for both humans and calling applications, providing enough
//! context to understand and fix issues programmatically.
//!
//! Hard errors are reserved for structurally invalid requests and true
//! arithmetic impossibilities. Non-ideal-but-usable configurations are
//! reported as [`crate::validation::ValidationWarning`] entries on the
//! result instead of failing the calculation.
//!
//! ## Example
//!
//! ```rust
//! use cable_core::errors::{CalcError, CalcResult};
//!
//! fn check_derating(factor: f64) -> CalcResult<()> {
//!     if factor <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "derating_factor",
//!             factor.to_string(),
//!             "Derating factor must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for cable_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by calling applications.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Material or cable size not found in the reference tables
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// Division by zero in the decimal arithmetic core
    #[error("Division by zero in {operation}")]
    DivisionByZero { operation: String },

    /// A value could not be interpreted as a decimal number
    #[error("Invalid numeric value: '{value}'")]
    InvalidNumber { value: String },

    /// Calculation failed (empty table, unusable configuration, etc.)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
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

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a DivisionByZero error
    pub fn division_by_zero(operation: impl Into<String>) -> Self {
        CalcError::DivisionByZero {
            operation: operation.into(),
        }
    }

    /// Create an InvalidNumber error
    pub fn invalid_number(value: impl Into<String>) -> Self {
        CalcError::InvalidNumber {
            value: value.into(),
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(
        calculation_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            CalcError::InvalidNumber { .. } => "INVALID_NUMBER",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
