//! # Error Types
//!
//! Domain-specific error types for lane-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lane-core errors (this file)                                          │
//! │  ├── CoreError        - Basket mutation failures                       │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── ClassifyWarning  - Non-fatal classifier diagnostics               │
//! │                                                                         │
//! │  lane-session errors (separate crate)                                  │
//! │  ├── ConfigError      - Config file load/parse failures                │
//! │  └── SessionError     - What the shell surfaces                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SessionError → UI shell           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (line number, reference, etc.)
//! 3. Errors are enum variants, never String
//! 4. Classification itself never fails: malformed lines become warnings
//!    that ride alongside the entries instead of being dropped silently

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Core Error
// =============================================================================

/// Basket mutation and domain logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No line with the given number exists in the basket.
    #[error("Line {line_number} not in basket")]
    LineNotFound { line_number: u32 },

    /// A line with the given number is already present.
    ///
    /// ## When This Occurs
    /// Line numbers are unique within one basket snapshot; the engine never
    /// reuses a number until the transaction closes.
    #[error("Line {line_number} already in basket")]
    DuplicateLineNumber { line_number: u32 },

    /// Basket has exceeded maximum allowed lines.
    #[error("Basket cannot have more than {max} lines")]
    BasketTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when engine-supplied or operator-entered values don't meet
/// requirements. Used for early validation before display state changes.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, control characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Classify Warning
// =============================================================================

/// Non-fatal diagnostics produced during classification.
///
/// ## Contract
/// The classifier never raises: lines it cannot place are omitted from the
/// sequence and reported here, so the shell can log or surface them instead
/// of rendering stale or misfiled rows.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, TS)]
#[ts(export)]
#[serde(tag = "warning", rename_all = "camelCase")]
pub enum ClassifyWarning {
    /// More than one distinct offline reference appeared in one basket.
    /// Policy allows a single offline receipt per basket; every offline line
    /// was folded into the bucket keyed by `kept`.
    #[error("Multiple offline return references: kept {kept}, ignored {ignored:?}")]
    #[serde(rename_all = "camelCase")]
    MultipleOfflineReferences { kept: String, ignored: Vec<String> },

    /// A return line referenced a transaction that was not supplied in the
    /// originating-transactions list (or carried no transaction id at all).
    #[error("Line {line_number} references unknown return transaction {transaction_id:?}")]
    #[serde(rename_all = "camelCase")]
    UnresolvedReturnTransaction {
        line_number: u32,
        transaction_id: Option<String>,
    },

    /// A return-typed line carried incomplete provenance and matched no
    /// return classification.
    #[error("Line {line_number} is return-typed but carries no usable provenance")]
    #[serde(rename_all = "camelCase")]
    UnclassifiedReturnLine { line_number: u32 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::DuplicateLineNumber { line_number: 4 };
        assert_eq!(err.to_string(), "Line 4 already in basket");

        let err = CoreError::BasketTooLarge { max: 100 };
        assert_eq!(err.to_string(), "Basket cannot have more than 100 lines");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "reference number".to_string(),
        };
        assert_eq!(err.to_string(), "reference number is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "line number".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_warning_messages() {
        let warning = ClassifyWarning::MultipleOfflineReferences {
            kept: "OFF123".to_string(),
            ignored: vec!["OFF999".to_string()],
        };
        assert_eq!(
            warning.to_string(),
            "Multiple offline return references: kept OFF123, ignored [\"OFF999\"]"
        );
    }

    #[test]
    fn test_warning_serializes_tagged() {
        let warning = ClassifyWarning::UnclassifiedReturnLine { line_number: 9 };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["warning"], "unclassifiedReturnLine");
        assert_eq!(json["lineNumber"], 9);
    }
}
