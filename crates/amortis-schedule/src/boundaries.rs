//! Period boundary generation and validation.
//!
//! Boundaries are normally supplied by the caller. [`generate_boundaries`]
//! produces the regular case: `count` contiguous periods starting on a
//! given date, with monthly periods anchored on the start day and clamped
//! to month end.
//!
//! ```rust
//! use amortis_core::types::{Date, RepaymentFrequency};
//! use amortis_schedule::boundaries::generate_boundaries;
//!
//! let start = Date::from_ymd(2024, 1, 31).unwrap();
//! let periods = generate_boundaries(start, 3, RepaymentFrequency::monthly()).unwrap();
//! assert_eq!(periods[0].due.to_string(), "2024-02-29");
//! assert_eq!(periods[1].due.to_string(), "2024-03-31");
//! ```

use amortis_core::types::{Date, PeriodFrequencyType, RepaymentFrequency};

use crate::error::{ScheduleError, ScheduleResult};
use crate::period::PeriodBoundary;

/// Generates `count` contiguous period boundaries from `start`.
///
/// # Errors
///
/// - `Configuration` for yearly or whole-term frequencies, or `every == 0`
/// - `InvariantViolation` when `count` is zero
pub fn generate_boundaries(
    start: Date,
    count: u32,
    frequency: RepaymentFrequency,
) -> ScheduleResult<Vec<PeriodBoundary>> {
    if count == 0 {
        return Err(ScheduleError::invariant("a schedule needs at least one period"));
    }
    if frequency.every == 0 {
        return Err(ScheduleError::configuration(
            "repayment frequency multiplier must be at least 1",
        ));
    }

    let mut boundaries = Vec::with_capacity(count as usize);
    for i in 0..count {
        let from = nth_date(start, i, frequency)?;
        let due = nth_date(start, i + 1, frequency)?;
        boundaries.push(PeriodBoundary::new(i + 1, from, due));
    }
    Ok(boundaries)
}

/// Date of the `n`-th repayment, counted from `start`.
fn nth_date(start: Date, n: u32, frequency: RepaymentFrequency) -> ScheduleResult<Date> {
    let steps = i64::from(n) * i64::from(frequency.every);
    match frequency.unit {
        PeriodFrequencyType::Days => Ok(start.add_days(steps)),
        PeriodFrequencyType::Weeks => Ok(start.add_days(steps * 7)),
        PeriodFrequencyType::Months => {
            let months = i32::try_from(steps).map_err(|_| {
                ScheduleError::configuration(format!("{steps} months is out of range"))
            })?;
            Ok(start.add_months(months)?)
        }
        PeriodFrequencyType::Years | PeriodFrequencyType::WholeTerm => {
            Err(ScheduleError::configuration(format!(
                "cannot generate {} periods",
                frequency.unit
            )))
        }
    }
}

/// Checks that boundaries are numbered 1.., non-empty and contiguous.
///
/// # Errors
///
/// Returns `InvariantViolation` describing the first offending period.
pub fn validate_boundaries(boundaries: &[PeriodBoundary]) -> ScheduleResult<()> {
    if boundaries.is_empty() {
        return Err(ScheduleError::invariant("a schedule needs at least one period"));
    }

    let mut previous: Option<&PeriodBoundary> = None;
    for (idx, boundary) in boundaries.iter().enumerate() {
        let expected = idx as u32 + 1;
        if boundary.number != expected {
            return Err(ScheduleError::invariant(format!(
                "period numbers must be contiguous from 1: expected {expected}, got {}",
                boundary.number
            )));
        }
        if boundary.from >= boundary.due {
            return Err(ScheduleError::invariant(format!(
                "period {} is empty or reversed: {} to {}",
                boundary.number, boundary.from, boundary.due
            )));
        }
        if let Some(prev) = previous {
            if prev.due != boundary.from {
                return Err(ScheduleError::invariant(format!(
                    "period {} starts on {} but period {} is due {}",
                    boundary.number, boundary.from, prev.number, prev.due
                )));
            }
        }
        previous = Some(boundary);
    }
    Ok(())
}
