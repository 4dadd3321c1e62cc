//! Interest-period splitter.
//!
//! Partitions a repayment period `[from, due)` into interest periods at
//! every event date strictly inside it. Events dated on a sub-period's
//! start are attached to that sub-period; events on the period's start
//! land in the first one and events on the due date belong to the next
//! period. The split is a pure function of the boundary and the event
//! log, so re-running it never duplicates or drifts.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use amortis_core::types::Date;

use crate::config::ScheduleConfig;
use crate::error::ScheduleResult;
use crate::event::{EventKind, ScheduleEvent};
use crate::period::{InterestPeriod, PeriodBoundary};
use crate::rate_factor::rate_factor_minus_one;

/// Splits `boundary` at the dates of `events`.
pub fn split_period(
    boundary: &PeriodBoundary,
    events: &[ScheduleEvent],
    config: &ScheduleConfig,
) -> ScheduleResult<Vec<InterestPeriod>> {
    split_period_at(boundary, events, &[], config)
}

/// Splits `boundary` at the dates of `events` plus `extra_cuts`.
///
/// Extra cuts create boundaries without carrying any amount; they are used
/// to measure interest up to an arbitrary date.
pub fn split_period_at(
    boundary: &PeriodBoundary,
    events: &[ScheduleEvent],
    extra_cuts: &[Date],
    config: &ScheduleConfig,
) -> ScheduleResult<Vec<InterestPeriod>> {
    let ctx = config.monetary_context();

    let inner: BTreeSet<Date> = events
        .iter()
        .map(|e| e.date)
        .chain(extra_cuts.iter().copied())
        .filter(|d| boundary.from < *d && *d < boundary.due)
        .collect();

    let mut dates = Vec::with_capacity(inner.len() + 2);
    dates.push(boundary.from);
    dates.extend(inner);
    dates.push(boundary.due);

    dates
        .windows(2)
        .map(|w| {
            let (from, due) = (w[0], w[1]);
            let rfm1 = rate_factor_minus_one(config, boundary, from, due)?;
            let mut ip = InterestPeriod::new(from, due, rfm1, &ctx);
            ip.disbursement_amount = ctx.of(sum_on(events, from, EventKind::Disbursement));
            ip.balance_correction_amount =
                ctx.of(sum_on(events, from, EventKind::BalanceCorrection));
            Ok(ip)
        })
        .collect()
}

fn sum_on(events: &[ScheduleEvent], date: Date, kind: EventKind) -> Decimal {
    events
        .iter()
        .filter(|e| e.date == date && e.kind == kind)
        .map(|e| e.amount.amount())
        .sum()
}
