//! # Error Types
//!
//! Domain-specific error types for medstock-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Error Types                           │
//! │                                                              │
//! │  medstock-core errors (this file)                            │
//! │  ├── CoreError        - Business rule violations             │
//! │  └── ValidationError  - Input validation failures            │
//! │                                                              │
//! │  medstock-db errors (separate crate)                         │
//! │  └── DbError          - Database operation failures          │
//! │                                                              │
//! │  store-api errors (in app)                                   │
//! │  └── ApiError         - What HTTP clients see (JSON body)    │
//! │                                                              │
//! │  Flow: ValidationError → CoreError → ApiError → client       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (medicine name, purchase id)
//! 3. Errors are enum variants, never bare Strings
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They are translated to HTTP statuses at the request boundary.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A line item references a medicine that is not in the catalog.
    #[error("Medicine {0} not found")]
    MedicineNotFound(String),

    /// Requested quantity exceeds the on-hand quantity.
    ///
    /// The message mirrors what the counter operator sees: the medicine
    /// name and how many units are actually available.
    #[error("Not enough stock for {name}. Available: {available}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Purchase id does not exist in the ledger.
    #[error("Purchase not found: {0}")]
    PurchaseNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when request input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// A purchase must carry at least one line item.
    #[error("at least one line item is required")]
    EmptyLineItems,

    /// Too many line items on one purchase.
    #[error("a purchase cannot have more than {max} line items")]
    TooManyLineItems { max: usize },

    /// Invalid format (e.g., unparseable date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
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
        let err = CoreError::InsufficientStock {
            name: "Paracetamol".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(err.to_string(), "Not enough stock for Paracetamol. Available: 3");

        let err = CoreError::MedicineNotFound("Crocin".to_string());
        assert_eq!(err.to_string(), "Medicine Crocin not found");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Negative {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::EmptyLineItems;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
