//! Schedule configuration.
//!
//! Every rate, rounding and day-count setting that drives a schedule is
//! carried explicitly in [`ScheduleConfig`]; nothing is read from ambient
//! state. Configurations can be built in code or loaded from TOML/JSON.
//!
//! ```rust
//! use amortis_core::daycounts::{DaysInMonthType, DaysInYearType};
//! use amortis_core::types::RepaymentFrequency;
//! use amortis_schedule::config::ScheduleConfig;
//! use amortis_schedule::Validate;
//! use rust_decimal_macros::dec;
//!
//! let config = ScheduleConfig::new(dec!(9.4822), RepaymentFrequency::monthly())
//!     .with_days_in_year(DaysInYearType::Days360)
//!     .with_days_in_month(DaysInMonthType::Days30);
//! assert!(config.is_valid());
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use amortis_core::daycounts::{DaysInMonthType, DaysInYearType};
use amortis_core::math::{MathContext, DEFAULT_PRECISION};
use amortis_core::types::{Currency, MonetaryContext, RepaymentFrequency, RoundingMode};

use crate::error::{ScheduleError, ScheduleResult, Validate, ValidationError};

/// Largest precision a `Decimal` mantissa can hold.
const MAX_PRECISION: u32 = 28;

/// Loan-product parameters for one schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Nominal annual interest rate as a percentage (9.5 means 9.5%).
    pub annual_interest_rate: Decimal,

    /// Year basis.
    #[serde(default)]
    pub days_in_year: DaysInYearType,

    /// Month length for monthly schedules.
    #[serde(default)]
    pub days_in_month: DaysInMonthType,

    /// Repayment frequency.
    #[serde(default)]
    pub repayment_frequency: RepaymentFrequency,

    /// Loan currency.
    #[serde(default)]
    pub currency: Currency,

    /// Overrides the currency's standard decimal places.
    #[serde(default)]
    pub currency_decimal_places: Option<u32>,

    /// Rounding mode for intermediate and monetary results.
    #[serde(default)]
    pub rounding_mode: RoundingMode,

    /// Significant digits kept after each arithmetic step.
    #[serde(default = "default_precision")]
    pub precision: u32,

    /// Rounds installments up to a multiple of this amount.
    #[serde(default)]
    pub installment_amount_in_multiples_of: Option<Decimal>,

    /// Re-solve the installment after every disbursement.
    ///
    /// When off, only the first disbursement sets the installment and the
    /// last period absorbs later ones.
    #[serde(default = "default_true")]
    pub reamortize_on_disbursement: bool,
}

fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

fn default_true() -> bool {
    true
}

impl ScheduleConfig {
    /// Creates a configuration with default conventions (360/30, USD,
    /// half-even rounding, 12 significant digits).
    #[must_use]
    pub fn new(annual_interest_rate: Decimal, repayment_frequency: RepaymentFrequency) -> Self {
        Self {
            annual_interest_rate,
            days_in_year: DaysInYearType::default(),
            days_in_month: DaysInMonthType::default(),
            repayment_frequency,
            currency: Currency::default(),
            currency_decimal_places: None,
            rounding_mode: RoundingMode::default(),
            precision: default_precision(),
            installment_amount_in_multiples_of: None,
            reamortize_on_disbursement: true,
        }
    }

    /// Sets the year basis.
    #[must_use]
    pub fn with_days_in_year(mut self, days_in_year: DaysInYearType) -> Self {
        self.days_in_year = days_in_year;
        self
    }

    /// Sets the month convention.
    #[must_use]
    pub fn with_days_in_month(mut self, days_in_month: DaysInMonthType) -> Self {
        self.days_in_month = days_in_month;
        self
    }

    /// Sets the currency.
    #[must_use]
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Overrides the currency's decimal places.
    #[must_use]
    pub fn with_currency_decimal_places(mut self, decimal_places: u32) -> Self {
        self.currency_decimal_places = Some(decimal_places);
        self
    }

    /// Sets the rounding mode.
    #[must_use]
    pub fn with_rounding_mode(mut self, rounding_mode: RoundingMode) -> Self {
        self.rounding_mode = rounding_mode;
        self
    }

    /// Sets the significant-digit precision.
    #[must_use]
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Rounds installments up to multiples of `multiple`.
    #[must_use]
    pub fn with_installment_in_multiples_of(mut self, multiple: Decimal) -> Self {
        self.installment_amount_in_multiples_of = Some(multiple);
        self
    }

    /// Enables or disables re-amortization on each disbursement.
    #[must_use]
    pub fn with_reamortize_on_disbursement(mut self, reamortize: bool) -> Self {
        self.reamortize_on_disbursement = reamortize;
        self
    }

    /// Decimal context used for every intermediate step.
    #[must_use]
    pub fn math_context(&self) -> MathContext {
        MathContext::new(self.precision, self.rounding_mode)
    }

    /// Monetary context used to round amounts.
    #[must_use]
    pub fn monetary_context(&self) -> MonetaryContext {
        let ctx = MonetaryContext::new(self.currency, self.rounding_mode);
        match self.currency_decimal_places {
            Some(places) => ctx.with_decimal_places(places),
            None => ctx,
        }
    }

    /// The installment multiple, if one is configured and positive.
    #[must_use]
    pub fn installment_multiple(&self) -> Option<Decimal> {
        self.installment_amount_in_multiples_of
            .filter(|m| *m > Decimal::ZERO)
    }

    /// Parses a configuration from TOML.
    pub fn from_toml_str(content: &str) -> ScheduleResult<Self> {
        toml::from_str(content).map_err(|e| ScheduleError::serialization(e.to_string()))
    }

    /// Parses a configuration from JSON.
    pub fn from_json_str(content: &str) -> ScheduleResult<Self> {
        serde_json::from_str(content).map_err(|e| ScheduleError::serialization(e.to_string()))
    }

    /// Loads a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ScheduleResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScheduleError::serialization(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }
}

impl Validate for ScheduleConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.annual_interest_rate < Decimal::ZERO {
            errors.push(ValidationError::with_rule(
                "annual_interest_rate",
                format!("must not be negative, got {}", self.annual_interest_rate),
                "min:0",
            ));
        }

        if self.repayment_frequency.every == 0 {
            errors.push(ValidationError::with_rule(
                "repayment_frequency.every",
                "must be at least 1",
                "min:1",
            ));
        }

        if !self.repayment_frequency.unit.has_rate_factor_formula() {
            errors.push(ValidationError::with_rule(
                "repayment_frequency.unit",
                format!(
                    "{} repayments have no progressive rate factor formula",
                    self.repayment_frequency.unit
                ),
                "supported-frequency",
            ));
        }

        if self.repayment_frequency.unit.is_months() && !self.days_in_month.is_applicable() {
            errors.push(ValidationError::with_rule(
                "days_in_month",
                "monthly repayments need a days-in-month convention",
                "month-convention",
            ));
        }

        if self.precision == 0 || self.precision > MAX_PRECISION {
            errors.push(ValidationError::with_rule(
                "precision",
                format!("must be between 1 and {MAX_PRECISION}, got {}", self.precision),
                "range:1-28",
            ));
        }

        if let Some(places) = self.currency_decimal_places {
            if places > MAX_PRECISION {
                errors.push(ValidationError::with_rule(
                    "currency_decimal_places",
                    format!("must not exceed {MAX_PRECISION}, got {places}"),
                    "max:28",
                ));
            }
        }

        if let Some(multiple) = self.installment_amount_in_multiples_of {
            if multiple < Decimal::ZERO {
                errors.push(ValidationError::with_rule(
                    "installment_amount_in_multiples_of",
                    format!("must not be negative, got {multiple}"),
                    "min:0",
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amortis_core::types::PeriodFrequencyType;
    use rust_decimal_macros::dec;

    fn monthly() -> ScheduleConfig {
        ScheduleConfig::new(dec!(9.4822), RepaymentFrequency::monthly())
    }

    #[test]
    fn test_defaults() {
        let config = monthly();
        assert_eq!(config.precision, 12);
        assert_eq!(config.rounding_mode, RoundingMode::HalfEven);
        assert_eq!(config.days_in_year, DaysInYearType::Days360);
        assert_eq!(config.days_in_month, DaysInMonthType::Days30);
        assert!(config.reamortize_on_disbursement);
        assert_eq!(config.monetary_context().decimal_places, 2);
        assert!(config.is_valid());
    }

    #[test]
    fn test_builder() {
        let config = monthly()
            .with_currency(Currency::JPY)
            .with_rounding_mode(RoundingMode::HalfUp)
            .with_precision(8)
            .with_installment_in_multiples_of(dec!(100))
            .with_reamortize_on_disbursement(false);

        assert_eq!(config.monetary_context().decimal_places, 0);
        assert_eq!(config.math_context(), MathContext::new(8, RoundingMode::HalfUp));
        assert_eq!(config.installment_multiple(), Some(dec!(100)));
        assert!(!config.reamortize_on_disbursement);
    }

    #[test]
    fn test_zero_multiple_is_ignored() {
        let config = monthly().with_installment_in_multiples_of(Decimal::ZERO);
        assert_eq!(config.installment_multiple(), None);
        assert!(config.is_valid());
    }

    #[test]
    fn test_unsupported_frequencies() {
        for unit in [PeriodFrequencyType::Years, PeriodFrequencyType::WholeTerm] {
            let config = ScheduleConfig::new(dec!(5), RepaymentFrequency::new(unit, 1));
            let errors = config.validate();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "repayment_frequency.unit");
        }
    }

    #[test]
    fn test_monthly_needs_month_convention() {
        let config = monthly().with_days_in_month(DaysInMonthType::NotApplicable);
        let err = config.validate_or_error().unwrap_err();
        assert!(err.is_configuration());

        let daily = ScheduleConfig::new(dec!(5), RepaymentFrequency::new(PeriodFrequencyType::Days, 15))
            .with_days_in_month(DaysInMonthType::NotApplicable);
        assert!(daily.is_valid());
    }

    #[test]
    fn test_invalid_values_are_collected() {
        let mut config = monthly().with_precision(0);
        config.annual_interest_rate = dec!(-1);
        config.repayment_frequency.every = 0;
        assert_eq!(config.validate().len(), 3);
    }

    #[test]
    fn test_from_toml() {
        let config = ScheduleConfig::from_toml_str(
            r#"
            annual_interest_rate = "9.4822"
            days_in_year = "Actual"
            days_in_month = "Actual"
            currency = "EUR"
            installment_amount_in_multiples_of = "5"

            [repayment_frequency]
            unit = "Weeks"
            every = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.annual_interest_rate, dec!(9.4822));
        assert_eq!(config.days_in_year, DaysInYearType::Actual);
        assert_eq!(config.currency, Currency::EUR);
        assert_eq!(config.repayment_frequency, RepaymentFrequency::new(PeriodFrequencyType::Weeks, 2));
        assert_eq!(config.installment_multiple(), Some(dec!(5)));
        assert_eq!(config.precision, 12);
        assert!(config.reamortize_on_disbursement);
    }

    #[test]
    fn test_from_json() {
        let config = ScheduleConfig::from_json_str(
            r#"{"annual_interest_rate": "7", "repayment_frequency": {"unit": "Days", "every": 15}}"#,
        )
        .unwrap();
        assert_eq!(config.annual_interest_rate, dec!(7));
        assert_eq!(config.repayment_frequency.every, 15);
    }

    #[test]
    fn test_parse_failure() {
        let err = ScheduleConfig::from_toml_str("annual_interest_rate = [").unwrap_err();
        assert!(matches!(err, ScheduleError::Serialization { .. }));
    }
}
