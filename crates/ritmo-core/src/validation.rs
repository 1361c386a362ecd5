//! # Validation Module
//!
//! Input validation for request payloads, run before any repository call.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP binding (axum + serde)                                  │
//! │  ├── Body is JSON, fields present, types match                         │
//! │  └── Failure → 400                                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Identifying fields are not blank                                  │
//! │  ├── Text fields have a sane length                                    │
//! │  └── Status tags belong to the settable set                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Repository (ritmo-store)                                     │
//! │  ├── Referenced company exists                                         │
//! │  └── One offer per company                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{CompanyFields, OfferStatus};
use crate::MAX_TEXT_FIELD_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Checks that a field is present (non-blank).
///
/// ```rust
/// use ritmo_core::validation::validate_required;
///
/// assert!(validate_required("name", "Acme").is_ok());
/// assert!(validate_required("name", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Checks a free-text field against [`MAX_TEXT_FIELD_LEN`].
pub fn validate_text_len(field: &str, value: &str) -> ValidationResult<()> {
    if value.chars().count() > MAX_TEXT_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_FIELD_LEN,
        });
    }
    Ok(())
}

/// Validates the field set of a company create/update.
///
/// ## Rules
/// - `name` and `fiscalId` must not be blank
/// - every field is at most [`MAX_TEXT_FIELD_LEN`] characters
/// - address, second address line, region and city may be empty
pub fn validate_company_fields(fields: &CompanyFields) -> ValidationResult<()> {
    validate_required("name", &fields.name)?;
    validate_required("fiscalId", &fields.fiscal_id)?;

    for (field, value) in [
        ("name", &fields.name),
        ("fiscalId", &fields.fiscal_id),
        ("address", &fields.address),
        ("addressLineTwo", &fields.address_line_two),
        ("region", &fields.region),
        ("city", &fields.city),
    ] {
        validate_text_len(field, value)?;
    }

    Ok(())
}

// =============================================================================
// Offer Validators
// =============================================================================

/// Parses an amount field, tagging failures with the field name.
///
/// ```rust
/// use ritmo_core::validation::parse_amount;
///
/// assert_eq!(parse_amount("advance", "100.00").unwrap().cents(), 10000);
/// assert!(parse_amount("refund", "ten").is_err());
/// ```
pub fn parse_amount(field: &str, raw: &str) -> CoreResult<Money> {
    Money::parse(raw).map_err(|e| CoreError::amount(field, e))
}

/// Parses a status requested by a client.
///
/// Rejects unknown tags and PENDING, which is only assigned at creation.
pub fn parse_status_update(raw: &str) -> CoreResult<OfferStatus> {
    let status: OfferStatus = raw.parse()?;
    if !status.is_settable() {
        return Err(CoreError::InvalidStatus(raw.to_string()));
    }
    Ok(status)
}

// =============================================================================
// Unit Tests
// =============================================================================
