//! Decimal arithmetic under a fixed precision context.
//!
//! Every schedule calculation rounds each intermediate result to a fixed
//! number of significant digits. Rounding only the final value gives
//! different cents, so the evaluation order is part of the contract:
//! callers combine values through [`MathContext`] one operation at a time.
//!
//! ```rust
//! use amortis_core::math::MathContext;
//! use amortis_core::types::RoundingMode;
//! use rust_decimal_macros::dec;
//!
//! let mc = MathContext::new(8, RoundingMode::HalfEven);
//! let ratio = mc.div(dec!(31), dec!(365)).unwrap();
//! assert_eq!(ratio, dec!(0.084931507));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::RoundingMode;

/// Default number of significant digits.
pub const DEFAULT_PRECISION: u32 = 12;

/// Significant-digit precision paired with a rounding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MathContext {
    /// Number of significant digits kept after each operation.
    pub precision: u32,
    /// Rounding applied when digits are dropped.
    pub rounding: RoundingMode,
}

impl Default for MathContext {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION, RoundingMode::HalfEven)
    }
}

impl MathContext {
    /// Creates a new context.
    #[must_use]
    pub const fn new(precision: u32, rounding: RoundingMode) -> Self {
        Self {
            precision,
            rounding,
        }
    }

    /// Rounds a value to the context's significant digits.
    #[must_use]
    pub fn round(&self, value: Decimal) -> Decimal {
        if value.is_zero() {
            return value;
        }
        value
            .round_sf_with_strategy(self.precision, self.rounding.strategy())
            .unwrap_or(value)
    }

    /// Adds two values, rounding the sum.
    #[must_use]
    pub fn add(&self, a: Decimal, b: Decimal) -> Decimal {
        self.round(a + b)
    }

    /// Subtracts `b` from `a`, rounding the difference.
    #[must_use]
    pub fn sub(&self, a: Decimal, b: Decimal) -> Decimal {
        self.round(a - b)
    }

    /// Multiplies two values, rounding the product.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MathError` if the product overflows.
    pub fn mul(&self, a: Decimal, b: Decimal) -> CoreResult<Decimal> {
        a.checked_mul(b)
            .map(|p| self.round(p))
            .ok_or_else(|| CoreError::math_error(format!("overflow multiplying {a} by {b}")))
    }

    /// Divides `a` by `b`, rounding the quotient.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MathError` on division by zero or overflow.
    pub fn div(&self, a: Decimal, b: Decimal) -> CoreResult<Decimal> {
        if b.is_zero() {
            return Err(CoreError::math_error(format!("division by zero: {a} / 0")));
        }
        a.checked_div(b)
            .map(|q| self.round(q))
            .ok_or_else(|| CoreError::math_error(format!("overflow dividing {a} by {b}")))
    }

    /// Rounds a value to a fixed number of decimal places.
    #[must_use]
    pub fn set_scale(&self, value: Decimal, decimal_places: u32) -> Decimal {
        value.round_dp_with_strategy(decimal_places, self.rounding.strategy())
    }
}
