//! Day count conventions for progressive loan interest.
//!
//! A loan product fixes two conventions:
//!
//! - [`DaysInYearType`]: the year basis used as the denominator of every
//!   rate factor (actual, 360, 364 or 365 days).
//! - [`DaysInMonthType`]: the length assumed for a month when repayments
//!   are monthly (actual or 30 days). Non-monthly products leave it
//!   [`DaysInMonthType::NotApplicable`].
//!
//! # Usage
//!
//! ```rust
//! use amortis_core::daycounts::{DaysInMonthType, DaysInYearType};
//! use amortis_core::types::Date;
//!
//! let date = Date::from_ymd(2024, 2, 10).unwrap();
//! assert_eq!(DaysInYearType::Actual.days_in_year(date), 366);
//! assert_eq!(DaysInYearType::Days360.days_in_year(date), 360);
//! assert_eq!(DaysInMonthType::Actual.days_in_month(date), Some(29));
//! assert_eq!(DaysInMonthType::NotApplicable.days_in_month(date), None);
//! ```

mod days_in_month;
mod days_in_year;

pub use days_in_month::DaysInMonthType;
pub use days_in_year::DaysInYearType;

/// Error type for parsing day count conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCountParseError(pub String);

impl std::fmt::Display for DayCountParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown day count convention: '{}'", self.0)
    }
}

impl std::error::Error for DayCountParseError {}

fn normalize(s: &str) -> String {
    s.trim().to_uppercase().replace(['-', ' '], "_")
}
