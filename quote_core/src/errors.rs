//! # Error and Warning Types
//!
//! Structured error types for quote_core, plus the non-fatal warnings that
//! part selection and the plasma-unit store hand back to callers.
//!
//! Errors stop an operation. Warnings never do: a quote built with a missing
//! 2040 price still comes back, it just carries a [`QuoteWarning`] saying the
//! gantry line was priced at zero.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::errors::{CoreResult, QuoteError};
//!
//! fn validate_cost(cost: f64) -> CoreResult<()> {
//!     if !(cost >= 0.0) {
//!         return Err(QuoteError::invalid_input(
//!             "cost",
//!             cost.to_string(),
//!             "Cost must be a non-negative number",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for quote_core operations
pub type CoreResult<T> = Result<T, QuoteError>;

/// Structured error type for quoting operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum QuoteError {
    /// An input value is invalid (negative price, blank name, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Machine configuration name is not in the catalog
    #[error("Machine configuration not found: {name}")]
    ConfigNotFound { name: String },

    /// Plasma unit name is not in the catalog
    #[error("Plasma unit not found: {name}")]
    PlasmaUnitNotFound { name: String },

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

    /// Typst compilation or PDF export failed
    #[error("Render failed: {reason}")]
    RenderFailed { reason: String },
}

impl QuoteError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        QuoteError::MissingField {
            field: field.into(),
        }
    }

    /// Create a ConfigNotFound error
    pub fn config_not_found(name: impl Into<String>) -> Self {
        QuoteError::ConfigNotFound { name: name.into() }
    }

    /// Create a PlasmaUnitNotFound error
    pub fn plasma_unit_not_found(name: impl Into<String>) -> Self {
        QuoteError::PlasmaUnitNotFound { name: name.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a RenderFailed error
    pub fn render_failed(reason: impl Into<String>) -> Self {
        QuoteError::RenderFailed {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            QuoteError::InvalidInput { .. } => "INVALID_INPUT",
            QuoteError::MissingField { .. } => "MISSING_FIELD",
            QuoteError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            QuoteError::PlasmaUnitNotFound { .. } => "PLASMA_UNIT_NOT_FOUND",
            QuoteError::FileError { .. } => "FILE_ERROR",
            QuoteError::SerializationError { .. } => "SERIALIZATION_ERROR",
            QuoteError::RenderFailed { .. } => "RENDER_FAILED",
        }
    }
}

/// A non-fatal condition surfaced alongside a successful result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum QuoteWarning {
    /// No price configured for a profile at the chosen stock length; the
    /// line was priced at zero.
    MissingPrice {
        part: String,
        profile: String,
        length_mm: u32,
    },

    /// The required length is longer than the largest stock length; the
    /// largest was used and the built machine will come up short.
    StockOverflow {
        part: String,
        required_mm: f64,
        chosen_mm: u32,
    },

    /// The backing store could not be read or written. In-memory state
    /// stays authoritative.
    PersistenceFailed {
        operation: String,
        path: String,
        reason: String,
    },
}

impl QuoteWarning {
    /// Build a PersistenceFailed warning from a store error
    pub fn from_store_error(operation: impl Into<String>, error: &QuoteError) -> Self {
        let operation = operation.into();
        match error {
            QuoteError::FileError { path, reason, .. } => QuoteWarning::PersistenceFailed {
                operation,
                path: path.clone(),
                reason: reason.clone(),
            },
            other => QuoteWarning::PersistenceFailed {
                operation,
                path: String::new(),
                reason: other.to_string(),
            },
        }
    }
}

impl fmt::Display for QuoteWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteWarning::MissingPrice { part, profile, length_mm } => write!(
                f,
                "No {} price for {} mm stock ({}); priced at $0.00",
                profile, length_mm, part
            ),
            QuoteWarning::StockOverflow { part, required_mm, chosen_mm } => write!(
                f,
                "{} needs {:.1} mm but the longest stock is {} mm",
                part, required_mm, chosen_mm
            ),
            QuoteWarning::PersistenceFailed { operation, path, reason } if path.is_empty() => {
                write!(f, "Failed to {} plasma units: {}", operation, reason)
            }
            QuoteWarning::PersistenceFailed { operation, path, reason } => {
                write!(f, "Failed to {} plasma units ({}): {}", operation, path, reason)
            }
        }
    }
}
