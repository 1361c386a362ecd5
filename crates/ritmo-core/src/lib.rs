//! # ritmo-core: Pure Domain Logic for the Ritmo Offers API
//!
//! This crate holds the entity model and the money codec as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ritmo Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (axum)                              │   │
//! │  │    /companies ──► /offers ──► /offers/{id}/status               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ritmo-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   money   │  │ validation│                  │   │
//! │  │   │  Company  │  │   Money   │  │   rules   │                  │   │
//! │  │   │   Offer   │  │  parse    │  │  status   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 ritmo-store (Repository Layer)                  │   │
//! │  │           storage.json load, upsert, atomic rewrite             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Company, Offer, OfferStatus)
//! - [`money`] - Money type with integer cents and the decimal-string codec
//! - [`error`] - Domain error types
//! - [`validation`] - Request input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use ritmo_core::{Money, NewOffer, Offer, OfferStatus};
//!
//! let offer = Offer::new(
//!     "offer-1",
//!     NewOffer {
//!         company_id: "company-1".to_string(),
//!         charges: 3,
//!         sales_percentage: 10,
//!         advance: Money::parse("100.00").unwrap(),
//!         refund: Money::zero(),
//!     },
//! );
//!
//! assert_eq!(offer.status, OfferStatus::Pending);
//! assert_eq!(offer.raw_advance, "100.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, MoneyError, ValidationError};
pub use money::{CurrencyProfile, FormatConfig, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of any free-text company field.
///
/// The whole document is rewritten on every change, so unbounded strings
/// would make every write proportionally slower.
pub const MAX_TEXT_FIELD_LEN: usize = 500;
