//! Date type for schedule calculations.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// A calendar date used for period boundaries and event dates.
///
/// Newtype over `chrono::NaiveDate` with the handful of calendar
/// operations the schedule engine needs.
///
/// # Example
///
/// ```rust
/// use amortis_core::types::Date;
///
/// let date = Date::from_ymd(2024, 1, 31).unwrap();
/// let next = date.add_months(1).unwrap();
/// assert_eq!(next, Date::from_ymd(2024, 2, 29).unwrap());
/// assert_eq!(date.days_between(&next), 29);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.0.month())
    }

    /// Returns the number of days in the date's year.
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        if self.0.leap_year() {
            366
        } else {
            365
        }
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a number of months to the date.
    ///
    /// If the resulting day would be invalid (e.g., Jan 31 + 1 month),
    /// it rolls back to the last valid day of the month.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> CoreResult<Self> {
        let total_months = self.year() * 12 + self.0.month() as i32 - 1 + months;
        let new_year = total_months.div_euclid(12);
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        let new_day = self.0.day().min(days_in_month(new_year, new_month));

        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Calculates the number of calendar days from `self` to `other`.
    ///
    /// Negative when `other` is earlier.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns 31 December of the date's year.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the year is out of range.
    pub fn end_of_year(&self) -> CoreResult<Self> {
        Self::from_ymd(self.year(), 12, 31)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_creation() {
        let date = Date::from_ymd(2024, 6, 15).unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.to_string(), "2024-06-15");
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::from_ymd(2023, 2, 29).is_err());
        assert!(Date::from_ymd(2024, 13, 1).is_err());
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        let date = Date::from_ymd(2024, 1, 31).unwrap();
        assert_eq!(date.add_months(1).unwrap(), Date::from_ymd(2024, 2, 29).unwrap());
        assert_eq!(date.add_months(3).unwrap(), Date::from_ymd(2024, 4, 30).unwrap());
        assert_eq!(date.add_months(12).unwrap(), Date::from_ymd(2025, 1, 31).unwrap());
    }

    #[test]
    fn test_add_negative_months() {
        let date = Date::from_ymd(2024, 1, 15).unwrap();
        assert_eq!(date.add_months(-1).unwrap(), Date::from_ymd(2023, 12, 15).unwrap());
    }

    #[test]
    fn test_days_in_month_and_year() {
        assert_eq!(Date::from_ymd(2024, 2, 1).unwrap().days_in_month(), 29);
        assert_eq!(Date::from_ymd(2023, 2, 1).unwrap().days_in_month(), 28);
        assert_eq!(Date::from_ymd(2024, 4, 1).unwrap().days_in_month(), 30);
        assert_eq!(Date::from_ymd(2024, 1, 1).unwrap().days_in_year(), 366);
        assert_eq!(Date::from_ymd(2100, 1, 1).unwrap().days_in_year(), 365);
    }

    #[test]
    fn test_days_between() {
        let d1 = Date::from_ymd(2024, 1, 1).unwrap();
        let d2 = Date::from_ymd(2024, 3, 1).unwrap();
        assert_eq!(d1.days_between(&d2), 60);
        assert_eq!(d2.days_between(&d1), -60);
        assert_eq!(d1.add_days(60), d2);
    }

    #[test]
    fn test_parse_and_display() {
        let date: Date = "2024-02-15".parse().unwrap();
        assert_eq!(date.to_string(), "2024-02-15");
        assert!(Date::parse("15/02/2024").is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let date = Date::from_ymd(2024, 2, 15).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2024-02-15\"");
        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
    }
}
