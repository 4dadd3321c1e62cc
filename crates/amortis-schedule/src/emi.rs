//! Equal installment solver.
//!
//! For rate factors `r(1)..r(n)` and an outstanding balance `P`:
//!
//! ```text
//! emi = P * r(1) * ... * r(n) / fn(n)
//! ```
//!
//! rounded to the currency scale and, when configured, up to the next
//! installment multiple. The solver is a pure function of its inputs.

use rust_decimal::Decimal;

use amortis_core::types::Money;

use crate::config::ScheduleConfig;
use crate::error::{ScheduleError, ScheduleResult};
use crate::fn_value::final_fn_value;
use crate::period::RepaymentPeriod;

/// Solves the constant installment that amortizes `outstanding`.
///
/// # Errors
///
/// Returns `InvariantViolation` for an empty factor sequence.
///
/// # Example
///
/// ```rust
/// use amortis_core::types::RepaymentFrequency;
/// use amortis_schedule::config::ScheduleConfig;
/// use amortis_schedule::emi::solve_emi;
/// use rust_decimal_macros::dec;
///
/// let config = ScheduleConfig::new(dec!(9.4822), RepaymentFrequency::monthly());
/// let factors = [dec!(1.007901833333); 6];
/// let emi = solve_emi(dec!(100), &factors, &config).unwrap();
/// assert_eq!(emi.amount(), dec!(17.13));
/// ```
pub fn solve_emi(
    outstanding: Decimal,
    rate_factors: &[Decimal],
    config: &ScheduleConfig,
) -> ScheduleResult<Money> {
    if rate_factors.is_empty() {
        return Err(ScheduleError::invariant(
            "cannot solve an installment over zero periods",
        ));
    }
    let mc = config.math_context();
    let ctx = config.monetary_context();

    let product = rate_factors
        .iter()
        .try_fold(Decimal::ONE, |acc, factor| mc.mul(acc, *factor))?;
    let fn_n = final_fn_value(rate_factors, &mc)?;

    let emi = ctx.of(mc.div(mc.mul(product, outstanding)?, fn_n)?);
    Ok(apply_installment_multiple(emi, config))
}

/// Rounds an installment up to the configured multiple, if any.
#[must_use]
pub fn apply_installment_multiple(emi: Money, config: &ScheduleConfig) -> Money {
    match config.installment_multiple() {
        Some(multiple) => emi.round_to_multiples_of(multiple, &config.monetary_context()),
        None => emi,
    }
}

/// Rate factor of a whole repayment period.
///
/// Each interest period's growth is weighted by the balance in effect
/// during it, so a disbursement late in the period contributes only its
/// share. With no balance at all the plain sum of the sub-periods is used.
pub fn period_rate_factor(period: &RepaymentPeriod, config: &ScheduleConfig) -> ScheduleResult<Decimal> {
    let mc = config.math_context();
    let end_balance = period.outstanding_balance();

    if end_balance.is_zero() {
        let sum = period
            .interest_periods
            .iter()
            .fold(Decimal::ZERO, |acc, ip| mc.add(acc, ip.rate_factor_minus_1));
        return Ok(mc.add(Decimal::ONE, sum));
    }

    let mut balance = period.initial_balance.amount();
    let mut weighted = Decimal::ZERO;
    for ip in &period.interest_periods {
        balance += ip.disbursement_amount.amount();
        weighted = mc.add(weighted, mc.mul(balance, ip.rate_factor_minus_1)?);
    }
    Ok(mc.add(Decimal::ONE, mc.div(weighted, end_balance)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use amortis_core::types::{Date, RepaymentFrequency};
    use rust_decimal_macros::dec;

    use crate::period::{InterestPeriod, PeriodBoundary};

    fn config() -> ScheduleConfig {
        ScheduleConfig::new(dec!(9.4822), RepaymentFrequency::monthly())
    }

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_emi_example() {
        let factors = [dec!(1.007901833333); 6];
        assert_eq!(solve_emi(dec!(100), &factors, &config()).unwrap().amount(), dec!(17.13));
    }

    #[test]
    fn test_zero_interest_splits_evenly() {
        let config = ScheduleConfig::new(Decimal::ZERO, RepaymentFrequency::monthly());
        let emi = solve_emi(dec!(1000), &[Decimal::ONE; 4], &config).unwrap();
        assert_eq!(emi.amount(), dec!(250));
    }

    #[test]
    fn test_installment_multiple_rounds_up() {
        let config = config().with_installment_in_multiples_of(dec!(1));
        let emi = solve_emi(dec!(100), &[dec!(1.007901833333); 6], &config).unwrap();
        assert_eq!(emi.amount(), dec!(18));
    }

    #[test]
    fn test_zero_outstanding() {
        let emi = solve_emi(Decimal::ZERO, &[dec!(1.007901833333); 3], &config()).unwrap();
        assert!(emi.is_zero());
    }

    #[test]
    fn test_empty_factors() {
        assert!(solve_emi(dec!(100), &[], &config())
            .unwrap_err()
            .is_invariant_violation());
    }

    #[test]
    fn test_period_rate_factor_weights_by_balance() {
        let config = config();
        let ctx = config.monetary_context();
        let boundary = PeriodBoundary::new(1, date(2024, 1, 1), date(2024, 2, 1));
        let mut first = InterestPeriod::new(date(2024, 1, 1), date(2024, 1, 8), dec!(0.001784284946), &ctx);
        first.disbursement_amount = ctx.of(dec!(100));
        let mut second = InterestPeriod::new(date(2024, 1, 8), date(2024, 2, 1), dec!(0.006117548387), &ctx);
        second.disbursement_amount = ctx.of(dec!(200));

        let mut period = RepaymentPeriod::new(boundary, vec![first, second], &ctx);
        period.disbursed_amount = ctx.of(dec!(300));

        // (100 * 0.001784284946 + 300 * 0.006117548387) / 300
        assert_eq!(period_rate_factor(&period, &config).unwrap(), dec!(1.00671231004));

        period.disbursed_amount = ctx.zero();
        let mc = config.math_context();
        let unfunded = period_rate_factor(&period, &config).unwrap();
        assert_eq!(unfunded, dec!(1.00790183333));
        assert_eq!(unfunded, mc.add(Decimal::ONE, dec!(0.007901833333)));
    }
}
