//! Days-in-year conventions.

use serde::{Deserialize, Serialize};

use super::{normalize, DayCountParseError};
use crate::types::Date;

/// Year basis for rate factor calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DaysInYearType {
    /// Real length of the calendar year (365 or 366).
    Actual,
    /// Fixed 360-day year.
    #[default]
    Days360,
    /// Fixed 364-day year (52 weeks).
    Days364,
    /// Fixed 365-day year.
    Days365,
}

impl DaysInYearType {
    /// Resolves the number of days in the year containing `date`.
    #[must_use]
    pub fn days_in_year(&self, date: Date) -> u32 {
        match self {
            DaysInYearType::Actual => date.days_in_year(),
            DaysInYearType::Days360 => 360,
            DaysInYearType::Days364 => 364,
            DaysInYearType::Days365 => 365,
        }
    }

    /// Returns true for the calendar-accurate convention.
    #[must_use]
    pub fn is_actual(&self) -> bool {
        matches!(self, DaysInYearType::Actual)
    }

    /// Returns the conventional name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DaysInYearType::Actual => "ACTUAL",
            DaysInYearType::Days360 => "DAYS_360",
            DaysInYearType::Days364 => "DAYS_364",
            DaysInYearType::Days365 => "DAYS_365",
        }
    }

    /// Returns all conventions.
    #[must_use]
    pub fn all() -> &'static [DaysInYearType] {
        &[
            DaysInYearType::Actual,
            DaysInYearType::Days360,
            DaysInYearType::Days364,
            DaysInYearType::Days365,
        ]
    }
}

impl std::fmt::Display for DaysInYearType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DaysInYearType {
    type Err = DayCountParseError;

    /// Accepts the conventional names plus bare day counts ("360").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "ACTUAL" | "ACT" => Ok(DaysInYearType::Actual),
            "DAYS_360" | "360" | "FIXED_360" => Ok(DaysInYearType::Days360),
            "DAYS_364" | "364" | "FIXED_364" => Ok(DaysInYearType::Days364),
            "DAYS_365" | "365" | "FIXED_365" => Ok(DaysInYearType::Days365),
            _ => Err(DayCountParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actual_follows_leap_years() {
        let leap = Date::from_ymd(2024, 12, 31).unwrap();
        let common = Date::from_ymd(2023, 12, 31).unwrap();
        assert_eq!(DaysInYearType::Actual.days_in_year(leap), 366);
        assert_eq!(DaysInYearType::Actual.days_in_year(common), 365);
    }

    #[test]
    fn test_fixed_conventions_ignore_date() {
        let leap = Date::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(DaysInYearType::Days360.days_in_year(leap), 360);
        assert_eq!(DaysInYearType::Days364.days_in_year(leap), 364);
        assert_eq!(DaysInYearType::Days365.days_in_year(leap), 365);
    }

    #[test]
    fn test_parse() {
        assert_eq!("360".parse::<DaysInYearType>().unwrap(), DaysInYearType::Days360);
        assert_eq!("actual".parse::<DaysInYearType>().unwrap(), DaysInYearType::Actual);
        assert_eq!("fixed-364".parse::<DaysInYearType>().unwrap(), DaysInYearType::Days364);
        for convention in DaysInYearType::all() {
            assert_eq!(convention.name().parse::<DaysInYearType>().unwrap(), *convention);
        }
        assert!("366".parse::<DaysInYearType>().is_err());
    }
}
