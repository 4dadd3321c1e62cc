//! Rate factor calculations.
//!
//! A rate factor is the growth of a balance over one span:
//! `1 + (rate / 100) * (days / days_in_year)`. Every multiplication and
//! division is rounded under the schedule's [`MathContext`], and the
//! rate-factor-minus-one of an interest period is finally rounded to
//! `precision` decimal places.
//!
//! For sub-periods of a repayment period the annual rate is first turned
//! into the full-period rate (a month, a week, N days) and then scaled by
//! the sub-period's share of the period's days. A sub-period spanning a
//! year end under the actual year basis is accrued per calendar year
//! instead.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use amortis_core::math::MathContext;
use amortis_core::types::{Date, PeriodFrequencyType};

use crate::config::ScheduleConfig;
use crate::error::{ScheduleError, ScheduleResult};
use crate::period::PeriodBoundary;

/// Growth factor for one span from the nominal rate and resolved day counts.
///
/// # Example
///
/// ```rust
/// use amortis_core::math::MathContext;
/// use amortis_core::types::RoundingMode;
/// use amortis_schedule::rate_factor::simple_rate_factor;
/// use rust_decimal_macros::dec;
///
/// // 9.482% over a 31-day January on an actual/365 basis
/// let mc = MathContext::new(8, RoundingMode::HalfEven);
/// let factor = simple_rate_factor(dec!(9.482), 31, 365, &mc).unwrap();
/// assert_eq!(factor, dec!(1.0080532));
/// ```
pub fn simple_rate_factor(
    annual_rate_percent: Decimal,
    days_in_span: i64,
    days_in_year: u32,
    mc: &MathContext,
) -> ScheduleResult<Decimal> {
    let rate = mc.div(annual_rate_percent, dec!(100))?;
    let fraction = mc.div(Decimal::from(days_in_span), Decimal::from(days_in_year))?;
    Ok(mc.add(Decimal::ONE, mc.mul(rate, fraction)?))
}

/// Rate factor minus one for the interest period `[from, to)` of `period`.
///
/// # Errors
///
/// Returns `Configuration` when the frequency has no formula or a monthly
/// schedule has no days-in-month convention.
pub fn rate_factor_minus_one(
    config: &ScheduleConfig,
    period: &PeriodBoundary,
    from: Date,
    to: Date,
) -> ScheduleResult<Decimal> {
    let mc = config.math_context();
    let rate = mc.div(config.annual_interest_rate, dec!(100))?;
    let every = Decimal::from(config.repayment_frequency.every);

    let raw = if config.days_in_year.is_actual() && to.year() > from.year() {
        let fraction = mc.mul(every, actual_year_fraction(&mc, from, to)?)?;
        mc.mul(rate, fraction)?
    } else {
        let multiplier = period_length_in_days(config, from)?;
        let days_in_year = Decimal::from(config.days_in_year.days_in_year(from));
        let fraction = mc.div(mc.mul(multiplier, every)?, days_in_year)?;
        let period_rate = mc.mul(rate, fraction)?;
        mc.div(
            mc.mul(period_rate, Decimal::from(from.days_between(&to)))?,
            Decimal::from(period.days()),
        )?
    };

    Ok(mc.set_scale(raw, config.precision))
}

/// Rate factor (`1 + rate_factor_minus_one`) for `[from, to)` of `period`.
pub fn rate_factor(
    config: &ScheduleConfig,
    period: &PeriodBoundary,
    from: Date,
    to: Date,
) -> ScheduleResult<Decimal> {
    let rfm1 = rate_factor_minus_one(config, period, from, to)?;
    Ok(config.math_context().add(Decimal::ONE, rfm1))
}

/// Days in one frequency unit, before the `every` multiplier.
fn period_length_in_days(config: &ScheduleConfig, from: Date) -> ScheduleResult<Decimal> {
    match config.repayment_frequency.unit {
        PeriodFrequencyType::Days => Ok(Decimal::ONE),
        PeriodFrequencyType::Weeks => Ok(dec!(7)),
        PeriodFrequencyType::Months => config
            .days_in_month
            .days_in_month(from)
            .map(Decimal::from)
            .ok_or_else(|| {
                ScheduleError::configuration(format!(
                    "days in month {} cannot be used with monthly repayments",
                    config.days_in_month
                ))
            }),
        unit @ (PeriodFrequencyType::Years | PeriodFrequencyType::WholeTerm) => Err(
            ScheduleError::configuration(format!("no rate factor formula for {unit} repayments")),
        ),
    }
}

/// Sum of per-calendar-year fractions for a span crossing year end.
///
/// Each year's segment closes on 31 December and the next segment is
/// counted from that same day.
fn actual_year_fraction(mc: &MathContext, from: Date, to: Date) -> ScheduleResult<Decimal> {
    let mut fraction = Decimal::ZERO;
    let mut cursor = from;
    for year in from.year()..=to.year() {
        let end = if year == to.year() {
            to
        } else {
            cursor.end_of_year()?
        };
        let year_length = Decimal::from(end.days_in_year());
        fraction = mc.add(
            fraction,
            mc.div(Decimal::from(cursor.days_between(&end)), year_length)?,
        );
        cursor = end;
    }
    Ok(fraction)
}
