//! Repayment frequency types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit in which the repayment frequency is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PeriodFrequencyType {
    /// Every N days
    Days,
    /// Every N weeks
    Weeks,
    /// Every N months - the usual loan frequency
    #[default]
    Months,
    /// Every N years
    Years,
    /// A single repayment at the end of the term
    WholeTerm,
}

impl PeriodFrequencyType {
    /// Returns the display name of the unit.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            PeriodFrequencyType::Days => "DAYS",
            PeriodFrequencyType::Weeks => "WEEKS",
            PeriodFrequencyType::Months => "MONTHS",
            PeriodFrequencyType::Years => "YEARS",
            PeriodFrequencyType::WholeTerm => "WHOLE_TERM",
        }
    }

    /// Returns all frequency units.
    #[must_use]
    pub fn all() -> &'static [PeriodFrequencyType] {
        &[
            PeriodFrequencyType::Days,
            PeriodFrequencyType::Weeks,
            PeriodFrequencyType::Months,
            PeriodFrequencyType::Years,
            PeriodFrequencyType::WholeTerm,
        ]
    }

    /// Returns true if the progressive rate-factor formula covers this unit.
    ///
    /// Yearly and whole-term schedules have no per-period formula.
    #[must_use]
    pub fn has_rate_factor_formula(&self) -> bool {
        matches!(
            self,
            PeriodFrequencyType::Days | PeriodFrequencyType::Weeks | PeriodFrequencyType::Months
        )
    }

    /// Returns true if the unit is calendar months.
    #[must_use]
    pub fn is_months(&self) -> bool {
        matches!(self, PeriodFrequencyType::Months)
    }
}

impl fmt::Display for PeriodFrequencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for PeriodFrequencyType {
    type Err = FrequencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");

        match normalized.as_str() {
            "DAYS" | "DAY" | "DAILY" => Ok(PeriodFrequencyType::Days),
            "WEEKS" | "WEEK" | "WEEKLY" => Ok(PeriodFrequencyType::Weeks),
            "MONTHS" | "MONTH" | "MONTHLY" => Ok(PeriodFrequencyType::Months),
            "YEARS" | "YEAR" | "YEARLY" | "ANNUAL" => Ok(PeriodFrequencyType::Years),
            "WHOLE_TERM" | "WHOLETERM" => Ok(PeriodFrequencyType::WholeTerm),
            _ => Err(FrequencyParseError(s.to_string())),
        }
    }
}

/// Error type for parsing frequency units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyParseError(pub String);

impl fmt::Display for FrequencyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown repayment frequency: '{}'", self.0)
    }
}

impl std::error::Error for FrequencyParseError {}

/// Repayment frequency: a unit and a "repeat every N units" multiplier.
///
/// # Example
///
/// ```rust
/// use amortis_core::types::{PeriodFrequencyType, RepaymentFrequency};
///
/// let fortnightly = RepaymentFrequency::new(PeriodFrequencyType::Weeks, 2);
/// assert_eq!(fortnightly.to_string(), "every 2 WEEKS");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepaymentFrequency {
    /// Frequency unit.
    pub unit: PeriodFrequencyType,
    /// Number of units between repayments.
    #[serde(default = "default_every")]
    pub every: u32,
}

fn default_every() -> u32 {
    1
}

impl RepaymentFrequency {
    /// Creates a new repayment frequency.
    #[must_use]
    pub fn new(unit: PeriodFrequencyType, every: u32) -> Self {
        Self { unit, every }
    }

    /// Monthly repayments.
    #[must_use]
    pub fn monthly() -> Self {
        Self::new(PeriodFrequencyType::Months, 1)
    }

    /// Weekly repayments.
    #[must_use]
    pub fn weekly() -> Self {
        Self::new(PeriodFrequencyType::Weeks, 1)
    }
}

impl Default for RepaymentFrequency {
    fn default() -> Self {
        Self::monthly()
    }
}

impl fmt::Display for RepaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "every {} {}", self.every, self.unit)
    }
}
