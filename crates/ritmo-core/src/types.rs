//! # Domain Types
//!
//! Core domain types used throughout the Ritmo offers API.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐          ┌──────────────────────┐                 │
//! │  │    Company      │ 1     0..1│       Offer          │                 │
//! │  │  ─────────────  │◄─────────│  ──────────────────  │                 │
//! │  │  ID             │CompanyID │  ID                  │                 │
//! │  │  Name           │          │  Status              │                 │
//! │  │  FiscalID       │          │  Charges             │                 │
//! │  │  Address        │          │  SalesPercentage     │                 │
//! │  │  AddressLineTwo │          │  Accepted            │                 │
//! │  │  Region, City   │          │  RawAdvance (string) │                 │
//! │  └─────────────────┘          │  RawRefund  (string) │                 │
//! │                               └──────────────────────┘                 │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────┐                     │
//! │  │  OfferStatus                                  │                     │
//! │  │  STATUS_PENDING ──► STATUS_PREAPROVED          │                     │
//! │  │                 ──► STATUS_APROVED             │                     │
//! │  │                 ──► STATUS_REJECTED            │                     │
//! │  └───────────────────────────────────────────────┘                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Storage Field Names
//! Entities serialize with the PascalCase keys of the backing document
//! (`ID`, `FiscalID`, `CompanyID`, `RawAdvance`, ...). Changing a rename here
//! breaks compatibility with existing storage files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{CoreError, MoneyError};
use crate::money::{FormatConfig, Money};

/// Generates a fresh entity ID.
///
/// UUID v7: globally unique and ordered by creation time.
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

// =============================================================================
// Company
// =============================================================================

/// A company that can receive an offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Company {
    /// Unique identifier, never reused.
    #[serde(rename = "ID")]
    pub id: String,

    pub name: String,

    /// Tax identification number.
    #[serde(rename = "FiscalID")]
    pub fiscal_id: String,

    pub address: String,
    pub address_line_two: String,
    pub region: String,
    pub city: String,
}

/// The mutable field set of a [`Company`].
///
/// Updates replace every field at once; there is no partial patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyFields {
    pub name: String,
    pub fiscal_id: String,
    pub address: String,
    pub address_line_two: String,
    pub region: String,
    pub city: String,
}

impl Company {
    /// Creates a company with the given ID.
    pub fn new(id: impl Into<String>, fields: CompanyFields) -> Self {
        let mut company = Company {
            id: id.into(),
            ..Default::default()
        };
        company.apply(fields);
        company
    }

    /// Replaces all mutable fields. The ID is left untouched.
    pub fn apply(&mut self, fields: CompanyFields) {
        self.name = fields.name;
        self.fiscal_id = fields.fiscal_id;
        self.address = fields.address;
        self.address_line_two = fields.address_line_two;
        self.region = fields.region;
        self.city = fields.city;
    }
}

// =============================================================================
// Offer Status
// =============================================================================

/// The lifecycle status of an offer.
///
/// The serialized tags keep the spelling of existing storage files
/// (`STATUS_APROVED`); the correct spellings are accepted when reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfferStatus {
    /// Initial status of every new offer.
    #[default]
    #[serde(rename = "STATUS_PENDING")]
    Pending,

    #[serde(rename = "STATUS_PREAPROVED", alias = "STATUS_PREAPPROVED")]
    PreApproved,

    #[serde(rename = "STATUS_APROVED", alias = "STATUS_APPROVED")]
    Approved,

    #[serde(rename = "STATUS_REJECTED")]
    Rejected,
}

impl OfferStatus {
    /// Returns the wire tag used in storage and HTTP views.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Pending => "STATUS_PENDING",
            OfferStatus::PreApproved => "STATUS_PREAPROVED",
            OfferStatus::Approved => "STATUS_APROVED",
            OfferStatus::Rejected => "STATUS_REJECTED",
        }
    }

    /// Whether a client may move an offer into this status.
    ///
    /// PENDING is only ever assigned at creation.
    pub const fn is_settable(&self) -> bool {
        !matches!(self, OfferStatus::Pending)
    }
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OfferStatus {
    type Err = CoreError;

    /// Accepts the wire tags, their corrected spellings, and bare names,
    /// case-insensitively: `STATUS_APROVED`, `STATUS_APPROVED`, `approved`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let name = upper.strip_prefix("STATUS_").unwrap_or(&upper);

        match name {
            "PENDING" => Ok(OfferStatus::Pending),
            "PREAPROVED" | "PREAPPROVED" | "PRE_APPROVED" => Ok(OfferStatus::PreApproved),
            "APROVED" | "APPROVED" => Ok(OfferStatus::Approved),
            "REJECTED" => Ok(OfferStatus::Rejected),
            _ => Err(CoreError::InvalidStatus(s.to_string())),
        }
    }
}

// =============================================================================
// Offer
// =============================================================================

/// A financial offer extended to a company.
///
/// Monetary amounts are stored as canonical decimal strings and only
/// materialized into [`Money`] on demand. An empty string is a zero amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Offer {
    #[serde(rename = "ID")]
    pub id: String,

    /// The company this offer belongs to.
    #[serde(rename = "CompanyID")]
    pub company_id: String,

    pub status: OfferStatus,
    pub charges: i64,
    pub sales_percentage: i64,

    /// Whether the company accepted the offer.
    pub accepted: bool,

    pub raw_advance: String,
    pub raw_refund: String,
}

/// Input for creating an offer. Amounts are already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOffer {
    pub company_id: String,
    pub charges: i64,
    pub sales_percentage: i64,
    pub advance: Money,
    pub refund: Money,
}

impl Offer {
    /// Creates a PENDING, not-yet-accepted offer.
    pub fn new(id: impl Into<String>, new_offer: NewOffer) -> Self {
        let mut offer = Offer {
            id: id.into(),
            company_id: new_offer.company_id,
            status: OfferStatus::Pending,
            charges: new_offer.charges,
            sales_percentage: new_offer.sales_percentage,
            accepted: false,
            raw_advance: String::new(),
            raw_refund: String::new(),
        };
        offer.set_advance(new_offer.advance);
        offer.set_refund(new_offer.refund);
        offer
    }

    /// Returns the advance amount (zero when none is stored).
    pub fn advance(&self) -> Result<Money, MoneyError> {
        read_amount(&self.raw_advance)
    }

    /// Stores the advance in canonical force-decimals form.
    pub fn set_advance(&mut self, advance: Money) {
        self.raw_advance = advance.format(FormatConfig::FORCE_DECIMALS);
    }

    /// Returns the refund amount (zero when none is stored).
    pub fn refund(&self) -> Result<Money, MoneyError> {
        read_amount(&self.raw_refund)
    }

    /// Stores the refund in canonical force-decimals form.
    pub fn set_refund(&mut self, refund: Money) {
        self.raw_refund = refund.format(FormatConfig::FORCE_DECIMALS);
    }
}

fn read_amount(raw: &str) -> Result<Money, MoneyError> {
    if raw.is_empty() {
        return Ok(Money::zero());
    }
    Money::parse(raw)
}

// =============================================================================
// Unit Tests
// =============================================================================
