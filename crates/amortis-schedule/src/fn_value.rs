//! Cumulative factor accumulator ("fn value").
//!
//! `fn(0) = 0` and `fn(i) = fn(i-1) * r(i) + 1`. For rate factors that
//! differ per period, `fn(n)` is the denominator of the constant
//! installment that closes the balance after `n` periods.

use rust_decimal::Decimal;

use amortis_core::error::CoreResult;
use amortis_core::math::MathContext;

/// One step of the recurrence: `previous * rate_factor + 1`.
///
/// # Errors
///
/// Returns `CoreError::MathError` if the product overflows.
pub fn fn_value(previous: Decimal, rate_factor: Decimal, mc: &MathContext) -> CoreResult<Decimal> {
    Ok(mc.add(Decimal::ONE, mc.mul(previous, rate_factor)?))
}

/// Values `fn(1)..=fn(n)` for the given rate factors.
///
/// `fn(1)` is always one; the first factor only matters through the
/// product of all factors in the installment formula.
///
/// # Example
///
/// ```rust
/// use amortis_core::math::MathContext;
/// use amortis_core::types::RoundingMode;
/// use amortis_schedule::fn_value::fn_values;
/// use rust_decimal_macros::dec;
///
/// let mc = MathContext::new(8, RoundingMode::HalfEven);
/// let values = fn_values(&[dec!(1.0080532), dec!(1.0075336), dec!(1.0080532)], &mc).unwrap();
/// assert_eq!(values, vec![dec!(1), dec!(2.0075336), dec!(3.0237007)]);
/// ```
pub fn fn_values(rate_factors: &[Decimal], mc: &MathContext) -> CoreResult<Vec<Decimal>> {
    let mut values = Vec::with_capacity(rate_factors.len());
    let mut acc = Decimal::ZERO;
    for factor in rate_factors {
        acc = fn_value(acc, *factor, mc)?;
        values.push(acc);
    }
    Ok(values)
}

/// Final value `fn(n)`; zero for an empty sequence.
pub fn final_fn_value(rate_factors: &[Decimal], mc: &MathContext) -> CoreResult<Decimal> {
    rate_factors
        .iter()
        .try_fold(Decimal::ZERO, |acc, factor| fn_value(acc, *factor, mc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use amortis_core::types::RoundingMode;
    use rust_decimal_macros::dec;

    #[test]
    fn test_recurrence() {
        let mc = MathContext::new(8, RoundingMode::HalfEven);
        let factors = [dec!(1.0080532), dec!(1.0075336), dec!(1.0080532)];
        let values = fn_values(&factors, &mc).unwrap();
        assert_eq!(values, vec![dec!(1.0000000), dec!(2.0075336), dec!(3.0237007)]);
        assert_eq!(final_fn_value(&factors, &mc).unwrap(), dec!(3.0237007));
    }

    #[test]
    fn test_unit_factors_count_periods() {
        let mc = MathContext::default();
        let values = fn_values(&[Decimal::ONE; 4], &mc).unwrap();
        assert_eq!(values, vec![dec!(1), dec!(2), dec!(3), dec!(4)]);
    }

    #[test]
    fn test_empty() {
        let mc = MathContext::default();
        assert!(fn_values(&[], &mc).unwrap().is_empty());
        assert_eq!(final_fn_value(&[], &mc).unwrap(), Decimal::ZERO);
    }
}
