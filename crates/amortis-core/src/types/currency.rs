//! Currency type with ISO 4217 codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 4217 currency codes.
///
/// Covers the currencies loan products are commonly denominated in.
/// Only the minor-unit scale matters to the schedule engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum Currency {
    /// United States Dollar
    #[default]
    USD,
    /// Euro
    EUR,
    /// British Pound Sterling
    GBP,
    /// Japanese Yen
    JPY,
    /// South Korean Won
    KRW,
    /// Indian Rupee
    INR,
    /// Kenyan Shilling
    KES,
    /// Ugandan Shilling
    UGX,
    /// Nigerian Naira
    NGN,
    /// Philippine Peso
    PHP,
    /// Mexican Peso
    MXN,
    /// Kuwaiti Dinar
    KWD,
    /// Bahraini Dinar
    BHD,
}

impl Currency {
    /// Returns the ISO 4217 3-letter code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::KRW => "KRW",
            Currency::INR => "INR",
            Currency::KES => "KES",
            Currency::UGX => "UGX",
            Currency::NGN => "NGN",
            Currency::PHP => "PHP",
            Currency::MXN => "MXN",
            Currency::KWD => "KWD",
            Currency::BHD => "BHD",
        }
    }

    /// Returns the standard number of decimal places (minor units).
    #[must_use]
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY | Currency::KRW | Currency::UGX => 0,
            Currency::KWD | Currency::BHD => 3,
            _ => 2,
        }
    }

    /// Returns all supported currencies.
    #[must_use]
    pub fn all() -> &'static [Currency] {
        &[
            Currency::USD,
            Currency::EUR,
            Currency::GBP,
            Currency::JPY,
            Currency::KRW,
            Currency::INR,
            Currency::KES,
            Currency::UGX,
            Currency::NGN,
            Currency::PHP,
            Currency::MXN,
            Currency::KWD,
            Currency::BHD,
        ]
    }

    /// Parses a currency from its ISO code (case-insensitive).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::all()
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = CurrencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| CurrencyParseError(s.to_string()))
    }
}

/// Error type for parsing currency codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyParseError(pub String);

impl fmt::Display for CurrencyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown currency code: '{}'", self.0)
    }
}

impl std::error::Error for CurrencyParseError {}
