//! # Error Types
//!
//! Domain-specific error types for ritmo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ritmo-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── MoneyError       - Amount string failed to parse                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  ritmo-store errors (separate crate)                                   │
//! │  └── StoreError       - Backing document read/write/lookup failures    │
//! │                                                                         │
//! │  HTTP errors (in app)                                                  │
//! │  └── ApiError         - What the client sees (status + JSON body)      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Client    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A status tag outside the closed set of offer statuses.
    ///
    /// ## When This Occurs
    /// - Client sends `"STATUS_UNKNOWN"` to the status endpoint
    /// - Client tries to move an offer back to PENDING
    #[error("invalid status type: {0}")]
    InvalidStatus(String),

    /// An amount string could not be read as money.
    #[error("bad {field} format: {source}")]
    Amount {
        field: String,
        #[source]
        source: MoneyError,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an amount error for the named field.
    pub fn amount(field: impl Into<String>, source: MoneyError) -> Self {
        CoreError::Amount {
            field: field.into(),
            source,
        }
    }
}

// =============================================================================
// Money Error
// =============================================================================

/// Errors raised by [`crate::money::Money::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("amount is empty")]
    Empty,

    #[error("'{0}' is not a valid amount")]
    InvalidFormat(String),

    /// Cents are the smallest unit; a third decimal cannot be stored exactly.
    #[error("'{0}' has more than two decimals")]
    TooManyDecimals(String),

    #[error("'{0}' is too large")]
    Overflow(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request input doesn't meet requirements.
/// Used for early validation before any repository operation runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
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
        let err = CoreError::InvalidStatus("STATUS_UNKNOWN".to_string());
        assert_eq!(err.to_string(), "invalid status type: STATUS_UNKNOWN");

        let err = CoreError::amount("advance", MoneyError::InvalidFormat("abc".to_string()));
        assert_eq!(err.to_string(), "bad advance format: 'abc' is not a valid amount");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "city".to_string(),
            max: 500,
        };
        assert_eq!(err.to_string(), "city must be at most 500 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "companyId".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
