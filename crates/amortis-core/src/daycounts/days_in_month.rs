//! Days-in-month conventions.

use serde::{Deserialize, Serialize};

use super::{normalize, DayCountParseError};
use crate::types::Date;

/// Month length assumed by monthly rate factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DaysInMonthType {
    /// Real length of the calendar month.
    Actual,
    /// Every month counts as 30 days.
    #[default]
    Days30,
    /// No month convention; only valid for non-monthly frequencies.
    NotApplicable,
}

impl DaysInMonthType {
    /// Resolves the number of days in the month containing `date`.
    ///
    /// Returns `None` for [`DaysInMonthType::NotApplicable`].
    #[must_use]
    pub fn days_in_month(&self, date: Date) -> Option<u32> {
        match self {
            DaysInMonthType::Actual => Some(date.days_in_month()),
            DaysInMonthType::Days30 => Some(30),
            DaysInMonthType::NotApplicable => None,
        }
    }

    /// Returns true if the convention resolves to a day count.
    #[must_use]
    pub fn is_applicable(&self) -> bool {
        !matches!(self, DaysInMonthType::NotApplicable)
    }

    /// Returns the conventional name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DaysInMonthType::Actual => "ACTUAL",
            DaysInMonthType::Days30 => "DAYS_30",
            DaysInMonthType::NotApplicable => "NOT_APPLICABLE",
        }
    }

    /// Returns all conventions.
    #[must_use]
    pub fn all() -> &'static [DaysInMonthType] {
        &[
            DaysInMonthType::Actual,
            DaysInMonthType::Days30,
            DaysInMonthType::NotApplicable,
        ]
    }
}

impl std::fmt::Display for DaysInMonthType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DaysInMonthType {
    type Err = DayCountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "ACTUAL" | "ACT" => Ok(DaysInMonthType::Actual),
            "DAYS_30" | "30" | "FIXED_30" => Ok(DaysInMonthType::Days30),
            "NOT_APPLICABLE" | "N/A" | "NA" | "INVALID" => Ok(DaysInMonthType::NotApplicable),
            _ => Err(DayCountParseError(s.to_string())),
        }
    }
}
