//! # Money Module
//!
//! Provides the `Money` type plus the decimal-string codec used for offer
//! amounts (advance and refund).
//!
//! ## Storage vs Display
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where Each Format Is Used                            │
//! │                                                                         │
//! │  HTTP body "1.234,5 €" ──► Money::parse ──► Money(123450 cents)         │
//! │                                                  │                      │
//! │                      ┌───────────────────────────┴──────────┐           │
//! │                      ▼                                      ▼           │
//! │   format(FormatConfig::FORCE_DECIMALS)        format_currency(EUR)      │
//! │            "1234.50"                               "1.234,50 €"         │
//! │      (storage document)                          (HTTP offer view)      │
//! │                                                                         │
//! │  Storage ALWAYS uses the canonical force-decimals form.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ritmo_core::money::{CurrencyProfile, FormatConfig, Money};
//!
//! let advance = Money::parse("1.234,50 €").unwrap();
//! assert_eq!(advance.cents(), 123450);
//! assert_eq!(advance.format(FormatConfig::FORCE_DECIMALS), "1234.50");
//! assert_eq!(advance.format_currency(&CurrencyProfile::EUR), "1.234,50 €");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use crate::error::MoneyError;

/// Currency symbols the parser strips before reading digits.
const CURRENCY_SYMBOLS: &[&str] = &["€", "$", "EUR", "USD"];

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: refunds and corrections may be negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - No float constructor exists; amounts enter either as cents or as
///   decimal strings through [`Money::parse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use ritmo_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (euros, dollars), truncated toward zero.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Parses a decimal currency string into exact cents.
    ///
    /// ## Accepted Input
    /// ```text
    /// "100"          → 10000      "-3.5"        → -350
    /// "100.00"       → 10000      "12,5"        → 1250
    /// "1,234.56"     → 123456     "1.234,56"    → 123456
    /// "€ 10.00"      → 1000       "10,00 €"     → 1000
    /// "1.000.000"    → 100000000  (repeated separator = thousands)
    /// ```
    ///
    /// A lone separator is always the decimal point, so `"12.345"` is
    /// rejected with [`MoneyError::TooManyDecimals`] rather than read as
    /// twelve thousand.
    ///
    /// ## Rejected Input
    /// Empty strings, letters, more than one sign, more than two fractional
    /// digits, malformed thousands grouping, values that overflow i64 cents.
    pub fn parse(input: &str) -> Result<Money, MoneyError> {
        let invalid = || MoneyError::InvalidFormat(input.to_string());

        let (negative, body) = strip_sign_and_symbol(input.trim());
        if body.is_empty() {
            return Err(MoneyError::Empty);
        }
        if !body
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        {
            return Err(invalid());
        }

        let (int_part, frac_part) = split_decimal(body).ok_or_else(invalid)?;
        if frac_part.len() > 2 {
            return Err(MoneyError::TooManyDecimals(input.to_string()));
        }

        let overflow = || MoneyError::Overflow(input.to_string());
        let mut units: i64 = 0;
        for digit in int_part.bytes() {
            units = units
                .checked_mul(10)
                .and_then(|u| u.checked_add(i64::from(digit - b'0')))
                .ok_or_else(overflow)?;
        }

        let minor = match frac_part.len() {
            0 => 0,
            1 => i64::from(frac_part.as_bytes()[0] - b'0') * 10,
            _ => frac_part.parse::<i64>().map_err(|_| invalid())?,
        };

        // Negative values are built downwards so i64::MIN stays reachable.
        let major = units.checked_mul(100).ok_or_else(overflow)?;
        let cents = if negative {
            (-major).checked_sub(minor)
        } else {
            major.checked_add(minor)
        }
        .ok_or_else(overflow)?;

        Ok(Money(cents))
    }

    /// Formats the amount as a plain decimal string.
    ///
    /// ```rust
    /// use ritmo_core::money::{FormatConfig, Money};
    ///
    /// let whole = Money::from_cents(10000);
    /// assert_eq!(whole.format(FormatConfig::FORCE_DECIMALS), "100.00");
    /// assert_eq!(whole.format(FormatConfig::default()), "100");
    /// ```
    pub fn format(&self, config: FormatConfig) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let major = self.major().abs();
        let minor = self.minor();

        if minor == 0 && !config.force_decimals {
            format!("{}{}", sign, major)
        } else {
            format!("{}{}.{:02}", sign, major, minor)
        }
    }

    /// Formats the amount for display in the given currency.
    ///
    /// Always renders two decimals and groups thousands.
    pub fn format_currency(&self, profile: &CurrencyProfile) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let grouped = group_thousands(self.major().abs(), profile.thousands_separator);
        let number = format!(
            "{}{}{:02}",
            grouped,
            profile.decimal_separator,
            self.minor()
        );

        if profile.symbol_after {
            format!("{}{} {}", sign, number, profile.symbol)
        } else {
            format!("{}{}{}", sign, profile.symbol, number)
        }
    }
}

/// Strips at most one sign and the currency symbol, in either order.
///
/// Returns the sign and the remaining numeric body (trimmed). A second sign
/// is left in the body, where it fails the digit check.
fn strip_sign_and_symbol(input: &str) -> (bool, &str) {
    let mut s = input;
    let mut negative = false;
    let mut signed = false;

    for _ in 0..2 {
        if !signed {
            if let Some(rest) = s.strip_prefix('-') {
                negative = true;
                signed = true;
                s = rest.trim_start();
            } else if let Some(rest) = s.strip_prefix('+') {
                signed = true;
                s = rest.trim_start();
            }
        }

        for symbol in CURRENCY_SYMBOLS {
            if let Some(rest) = s.strip_prefix(symbol) {
                s = rest.trim_start();
            }
            if let Some(rest) = s.strip_suffix(symbol) {
                s = rest.trim_end();
            }
        }
    }

    (negative, s)
}

/// Splits a numeric body into integer digits and fractional digits.
///
/// With both separators present the last one is the decimal point. A single
/// separator is the decimal point; a repeated one groups thousands.
/// Thousands separators are removed from the integer part. Returns `None`
/// when the grouping or the separators are malformed.
fn split_decimal(body: &str) -> Option<(String, &str)> {
    let Some(last_idx) = body.rfind(['.', ',']) else {
        return Some((body.to_string(), ""));
    };

    let sep = body[last_idx..].chars().next()?;
    let other = if sep == '.' { ',' } else { '.' };
    let tail = &body[last_idx + 1..];
    let sep_count = body.matches(sep).count();

    let is_decimal = body.contains(other) || sep_count == 1;

    let (int_raw, frac, thousands) = if is_decimal {
        if tail.is_empty() || sep_count > 1 {
            return None;
        }
        (&body[..last_idx], tail, other)
    } else {
        (body, "", sep)
    };

    let int_part = ungroup(int_raw, thousands)?;
    if int_part.is_empty() && frac.is_empty() {
        return None;
    }
    Some((int_part, frac))
}

/// Removes thousands separators, checking 3-digit grouping.
fn ungroup(int_raw: &str, thousands: char) -> Option<String> {
    if !int_raw.contains(thousands) {
        return Some(int_raw.to_string());
    }

    let mut groups = int_raw.split(thousands);
    let first = groups.next()?;
    if first.is_empty() || first.len() > 3 || first.starts_with('0') {
        return None;
    }

    let mut digits = first.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

fn group_thousands(value: i64, separator: char) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, c) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

// =============================================================================
// Formatting Configuration
// =============================================================================

/// Options for [`Money::format`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatConfig {
    /// Always print two decimals, even for whole amounts.
    pub force_decimals: bool,
}

impl FormatConfig {
    /// The canonical storage form: `"100.00"`.
    pub const FORCE_DECIMALS: FormatConfig = FormatConfig {
        force_decimals: true,
    };
}

/// A currency display profile.
///
/// Only used at the HTTP boundary; the storage document never contains
/// currency-decorated strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyProfile {
    /// ISO 4217 code.
    pub code: &'static str,
    pub symbol: &'static str,
    pub thousands_separator: char,
    pub decimal_separator: char,
    /// `true` renders "10,00 €", `false` renders "$10.00".
    pub symbol_after: bool,
}

impl CurrencyProfile {
    pub const EUR: CurrencyProfile = CurrencyProfile {
        code: "EUR",
        symbol: "€",
        thousands_separator: '.',
        decimal_separator: ',',
        symbol_after: true,
    };

    pub const USD: CurrencyProfile = CurrencyProfile {
        code: "USD",
        symbol: "$",
        thousands_separator: ',',
        decimal_separator: '.',
        symbol_after: false,
    };

    /// Looks up a profile by ISO code (case-insensitive).
    pub fn from_code(code: &str) -> Option<CurrencyProfile> {
        match code.trim().to_ascii_uppercase().as_str() {
            "EUR" => Some(CurrencyProfile::EUR),
            "USD" => Some(CurrencyProfile::USD),
            _ => None,
        }
    }
}

impl Default for CurrencyProfile {
    fn default() -> Self {
        CurrencyProfile::EUR
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the canonical force-decimals form.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(FormatConfig::FORCE_DECIMALS))
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
