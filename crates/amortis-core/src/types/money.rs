//! Monetary amounts bound to a currency scale.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::math::MathContext;
use crate::types::{Currency, RoundingMode};

/// Currency, scale and rounding used to normalise monetary amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonetaryContext {
    /// Currency of every amount built through this context.
    pub currency: Currency,
    /// Decimal places amounts are rounded to.
    pub decimal_places: u32,
    /// Rounding mode for the scale adjustment.
    pub rounding: RoundingMode,
}

impl MonetaryContext {
    /// Creates a context using the currency's standard minor units.
    #[must_use]
    pub fn new(currency: Currency, rounding: RoundingMode) -> Self {
        Self {
            currency,
            decimal_places: currency.decimal_places(),
            rounding,
        }
    }

    /// Overrides the number of decimal places.
    #[must_use]
    pub fn with_decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    /// Rounds a raw amount to the context's scale.
    #[must_use]
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.decimal_places, self.rounding.strategy())
    }

    /// Builds a money value, rounded to the context's scale.
    #[must_use]
    pub fn of(&self, amount: Decimal) -> Money {
        Money {
            amount: self.round(amount),
            currency: self.currency,
        }
    }

    /// The zero amount in this context's currency.
    #[must_use]
    pub fn zero(&self) -> Money {
        Money::zero(self.currency)
    }
}

impl Default for MonetaryContext {
    fn default() -> Self {
        Self::new(Currency::default(), RoundingMode::default())
    }
}

/// An amount of money in a specific currency.
///
/// Amounts built through [`MonetaryContext::of`] are already at the
/// currency scale; arithmetic that can introduce extra digits takes the
/// context and re-rounds.
///
/// # Example
///
/// ```rust
/// use amortis_core::types::{Currency, MonetaryContext, RoundingMode};
/// use rust_decimal_macros::dec;
///
/// let ctx = MonetaryContext::new(Currency::USD, RoundingMode::HalfEven);
/// let emi = ctx.of(dec!(17.1349));
/// assert_eq!(emi.amount(), dec!(17.13));
/// assert_eq!(emi.round_to_multiples_of(dec!(5), &ctx).amount(), dec!(20));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a money value without rounding.
    #[must_use]
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// The zero amount.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Returns the decimal amount.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency.
    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns true if `self` is strictly greater than `other`.
    #[must_use]
    pub fn is_greater_than(&self, other: &Money) -> bool {
        self.amount > other.amount
    }

    /// Adds two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CurrencyMismatch` if the currencies differ and
    /// `CoreError::MathError` if the sum overflows.
    pub fn plus(&self, other: Money) -> CoreResult<Money> {
        self.check_currency(&other)?;
        self.amount
            .checked_add(other.amount)
            .map(|amount| Money::new(amount, self.currency))
            .ok_or_else(|| CoreError::math_error(format!("overflow adding {other} to {self}")))
    }

    /// Subtracts an amount of the same currency.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CurrencyMismatch` if the currencies differ and
    /// `CoreError::MathError` if the difference overflows.
    pub fn minus(&self, other: Money) -> CoreResult<Money> {
        self.check_currency(&other)?;
        self.amount
            .checked_sub(other.amount)
            .map(|amount| Money::new(amount, self.currency))
            .ok_or_else(|| CoreError::math_error(format!("overflow subtracting {other} from {self}")))
    }

    /// Multiplies by a factor under `mc`, then rounds to money scale.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MathError` if the product overflows.
    pub fn multiplied_by(
        &self,
        factor: Decimal,
        mc: &MathContext,
        ctx: &MonetaryContext,
    ) -> CoreResult<Money> {
        Ok(ctx.of(mc.mul(self.amount, factor)?))
    }

    /// Divides by a divisor under `mc`, then rounds to money scale.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MathError` on division by zero.
    pub fn divided_by(
        &self,
        divisor: Decimal,
        mc: &MathContext,
        ctx: &MonetaryContext,
    ) -> CoreResult<Money> {
        Ok(ctx.of(mc.div(self.amount, divisor)?))
    }

    /// Returns the absolute amount.
    #[must_use]
    pub fn abs(&self) -> Money {
        Money::new(self.amount.abs(), self.currency)
    }

    /// Rounds up to the next multiple of `multiple`.
    ///
    /// A non-positive multiple leaves the amount unchanged.
    #[must_use]
    pub fn round_to_multiples_of(&self, multiple: Decimal, ctx: &MonetaryContext) -> Money {
        if multiple <= Decimal::ZERO {
            return *self;
        }
        let units = (self.amount / multiple).ceil();
        ctx.of(units * multiple)
    }

    fn check_currency(&self, other: &Money) -> CoreResult<()> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(CoreError::currency_mismatch(self.currency, other.currency))
        }
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency == other.currency {
            self.amount.partial_cmp(&other.amount)
        } else {
            None
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
