//! # Validation Module
//!
//! Input validation utilities for the Lane POS display layer.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Business-rules engine (external)                             │
//! │  ├── Item qualification, tender and return policy                     │
//! │  └── Produces the display lines we are handed                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Field-shape checks before lines enter the basket                  │
//! │  └── Keeps the classifier's key namespace well-formed                  │
//! │                                                                         │
//! │  Lines that fail here never reach the classifier, so classification   │
//! │  itself stays total and warning-only                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lane_core::validation::{validate_reference_number, validate_quantity};
//!
//! validate_reference_number("OFF123").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a transaction or offline-return reference number.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 40 characters
/// - Must not contain control characters
///
/// ## Invariant
/// The offline group key is the reference plus a trailing carriage return.
/// Rejecting control characters here is what keeps that key namespace
/// collision-free.
pub fn validate_reference_number(reference: &str) -> ValidationResult<()> {
    let reference = reference.trim();

    if reference.is_empty() {
        return Err(ValidationError::Required {
            field: "reference number".to_string(),
        });
    }

    if reference.len() > 40 {
        return Err(ValidationError::TooLong {
            field: "reference number".to_string(),
            max: 40,
        });
    }

    if reference.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFormat {
            field: "reference number".to_string(),
            reason: "must not contain control characters".to_string(),
        });
    }

    Ok(())
}

/// Validates an employee number.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 20 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use lane_core::validation::validate_employee_number;
///
/// assert!(validate_employee_number("100524").is_ok());
/// assert!(validate_employee_number("").is_err());
/// ```
pub fn validate_employee_number(number: &str) -> ValidationResult<()> {
    let number = number.trim();

    if number.is_empty() {
        return Err(ValidationError::Required {
            field: "employee number".to_string(),
        });
    }

    if number.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "employee number".to_string(),
            max: 20,
        });
    }

    if !number
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "employee number".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a basket line number.
///
/// ## Rules
/// - Must be positive (> 0); line numbers start at 1
pub fn validate_line_number(line_number: u32) -> ValidationResult<()> {
    if line_number == 0 {
        return Err(ValidationError::MustBePositive {
            field: "line number".to_string(),
        });
    }

    Ok(())
}

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use lane_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
