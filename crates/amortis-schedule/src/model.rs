//! The progressive loan schedule aggregate.
//!
//! [`ProgressiveLoanInterestScheduleModel`] owns the repayment periods, the
//! configuration and the append-only event log. Every mutation works on a
//! copy of the period list and commits it only when the whole
//! recalculation succeeds, so a failed call leaves the model untouched.
//!
//! Recalculation after an event:
//!
//! 1. re-split every period against the event log (pure, see
//!    [`crate::splitter`]);
//! 2. recompute interest, principal and balances front to back;
//! 3. for disbursements, re-solve the installment over the owning period
//!    and every later one, then try the installment adjustment that
//!    narrows the gap between the last two installments.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use amortis_core::types::{Date, Money};

use crate::boundaries::validate_boundaries;
use crate::config::ScheduleConfig;
use crate::emi::{apply_installment_multiple, period_rate_factor, solve_emi};
use crate::error::{ScheduleError, ScheduleResult, Validate};
use crate::event::ScheduleEvent;
use crate::period::{PeriodBoundary, RepaymentPeriod};
use crate::splitter::split_period;

/// Lifecycle state of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleState {
    /// Periods generated, nothing disbursed.
    Initialized,
    /// At least one event applied.
    Funded,
    /// Boundaries replaced with an empty event log.
    Regenerated,
}

impl fmt::Display for ScheduleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScheduleState::Initialized => "Initialized",
            ScheduleState::Funded => "Funded",
            ScheduleState::Regenerated => "Regenerated",
        };
        write!(f, "{name}")
    }
}

/// Interest schedule of one progressive loan.
///
/// # Example
///
/// ```rust
/// use amortis_core::types::{Date, RepaymentFrequency};
/// use amortis_schedule::boundaries::generate_boundaries;
/// use amortis_schedule::config::ScheduleConfig;
/// use amortis_schedule::ProgressiveLoanInterestScheduleModel;
/// use rust_decimal_macros::dec;
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let config = ScheduleConfig::new(dec!(9.4822), RepaymentFrequency::monthly());
/// let boundaries = generate_boundaries(start, 6, config.repayment_frequency).unwrap();
///
/// let mut model = ProgressiveLoanInterestScheduleModel::generate(boundaries, config).unwrap();
/// model.add_disbursement(start, dec!(100)).unwrap();
///
/// assert_eq!(model.periods()[0].emi.amount(), dec!(17.13));
/// assert!(model.periods().last().unwrap().remaining_balance.is_zero());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressiveLoanInterestScheduleModel {
    config: ScheduleConfig,
    periods: Vec<RepaymentPeriod>,
    events: Vec<ScheduleEvent>,
    state: ScheduleState,
}

impl ProgressiveLoanInterestScheduleModel {
    /// Builds a schedule with no disbursements.
    ///
    /// # Errors
    ///
    /// - `Configuration` if the configuration is invalid or the frequency
    ///   has no rate factor formula
    /// - `InvariantViolation` if the boundaries are empty, misnumbered or
    ///   not contiguous
    pub fn generate(boundaries: Vec<PeriodBoundary>, config: ScheduleConfig) -> ScheduleResult<Self> {
        config.validate_or_error()?;
        validate_boundaries(&boundaries)?;

        let ctx = config.monetary_context();
        let periods = boundaries
            .iter()
            .map(|b| Ok(RepaymentPeriod::new(*b, split_period(b, &[], &config)?, &ctx)))
            .collect::<ScheduleResult<Vec<_>>>()?;

        let mut model = Self {
            config,
            periods,
            events: Vec::new(),
            state: ScheduleState::Initialized,
        };
        let mut periods = model.periods.clone();
        model.compute_components(&mut periods)?;
        model.periods = model.resolve_emi(periods, 0)?;

        debug!(
            periods = model.periods.len(),
            rate = %model.config.annual_interest_rate,
            frequency = %model.config.repayment_frequency,
            "generated schedule"
        );
        Ok(model)
    }

    /// Builds a schedule and replays `events` in chronological order.
    ///
    /// Events on the same date keep their relative order.
    pub fn from_events(
        boundaries: Vec<PeriodBoundary>,
        config: ScheduleConfig,
        events: &[ScheduleEvent],
    ) -> ScheduleResult<Self> {
        let mut model = Self::generate(boundaries, config)?;
        let mut log = events.to_vec();
        log.sort_by_key(|e| e.date);
        for event in log {
            model.apply(event)?;
        }
        Ok(model)
    }

    /// Records a disbursement and recalculates the schedule.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if the amount is not positive once rounded to
    /// the currency, or the date is outside the schedule.
    pub fn add_disbursement(&mut self, date: Date, amount: Decimal) -> ScheduleResult<()> {
        let money = self.config.monetary_context().of(amount);
        if money.is_zero() || money.is_negative() {
            return Err(ScheduleError::invariant(format!(
                "disbursement amount must be positive, got {amount}"
            )));
        }
        self.apply(ScheduleEvent::disbursement(date, money))
    }

    /// Records a balance correction and recalculates the schedule.
    ///
    /// A correction changes the interest base from `date` to the end of
    /// the repayment period containing it. It never re-solves the
    /// installment; negative amounts model early principal repayments.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if the amount rounds to zero in the currency or
    /// the date is outside the schedule.
    pub fn add_balance_correction(&mut self, date: Date, amount: Decimal) -> ScheduleResult<()> {
        let money = self.config.monetary_context().of(amount);
        if money.is_zero() {
            return Err(ScheduleError::invariant(format!(
                "balance correction amount must be non-zero, got {amount}"
            )));
        }
        self.apply(ScheduleEvent::balance_correction(date, money))
    }

    /// Replaces the period boundaries and replays the event log.
    ///
    /// On error the model keeps its previous periods.
    pub fn reschedule(&mut self, boundaries: Vec<PeriodBoundary>) -> ScheduleResult<()> {
        let mut rebuilt = Self::generate(boundaries, self.config.clone())?;
        rebuilt.state = ScheduleState::Regenerated;

        let mut log = self.events.clone();
        log.sort_by_key(|e| e.date);
        for event in log {
            rebuilt.apply(event)?;
        }

        info!(
            periods = rebuilt.periods.len(),
            replayed = rebuilt.events.len(),
            state = %rebuilt.state,
            "rescheduled"
        );
        *self = rebuilt;
        Ok(())
    }

    fn apply(&mut self, event: ScheduleEvent) -> ScheduleResult<()> {
        let owner = self.owning_period_index(event.date)?;

        let mut events = self.events.clone();
        events.push(event);

        let mut periods = self.resplit(&events)?;
        self.compute_components(&mut periods)?;

        if event.is_disbursement()
            && (self.config.reamortize_on_disbursement || periods[owner].emi.is_zero())
        {
            periods = self.resolve_emi(periods, owner)?;
        }

        debug!(
            event = %event,
            period = owner + 1,
            emi = %periods[owner].emi.amount(),
            "applied event"
        );

        self.periods = periods;
        self.events = events;
        self.state = ScheduleState::Funded;
        Ok(())
    }

    fn owning_period_index(&self, date: Date) -> ScheduleResult<usize> {
        self.periods
            .iter()
            .position(|p| p.contains(date))
            .ok_or_else(|| {
                ScheduleError::invariant(format!(
                    "{date} is outside the schedule {} to {}",
                    self.first_date(),
                    self.last_due_date()
                ))
            })
    }

    fn resplit(&self, events: &[ScheduleEvent]) -> ScheduleResult<Vec<RepaymentPeriod>> {
        self.periods
            .iter()
            .map(|p| {
                let mut period = p.clone();
                period.interest_periods = split_period(&p.boundary(), events, &self.config)?;
                Ok(period)
            })
            .collect()
    }

    /// Recomputes interest, principal and balances from the first period.
    ///
    /// The last period's principal is forced to the outstanding balance
    /// and its installment becomes principal plus interest.
    pub(crate) fn compute_components(&self, periods: &mut [RepaymentPeriod]) -> ScheduleResult<()> {
        let mc = self.config.math_context();
        let ctx = self.config.monetary_context();
        let last_idx = periods.len().saturating_sub(1);

        let mut outstanding = ctx.zero();
        for (idx, period) in periods.iter_mut().enumerate() {
            period.initial_balance = outstanding;

            let mut disbursed = ctx.zero();
            let mut correction = ctx.zero();
            let mut interest = ctx.zero();
            for ip in &mut period.interest_periods {
                outstanding = outstanding.plus(ip.disbursement_amount)?;
                disbursed = disbursed.plus(ip.disbursement_amount)?;
                correction = correction.plus(ip.balance_correction_amount)?;

                ip.outstanding_balance = outstanding.plus(correction)?;
                ip.interest_due = ip
                    .outstanding_balance
                    .multiplied_by(ip.rate_factor_minus_1, &mc, &ctx)?;
                interest = interest.plus(ip.interest_due)?;
            }

            let principal = if idx == last_idx {
                period.emi = outstanding.plus(interest)?;
                outstanding
            } else {
                period.emi.minus(interest)?
            };

            period.disbursed_amount = disbursed;
            period.interest_due = interest;
            period.principal_due = principal;
            outstanding = outstanding.minus(principal)?;
            period.remaining_balance = outstanding;

            trace!(
                period = period.number,
                interest = %period.interest_due.amount(),
                principal = %period.principal_due.amount(),
                remaining = %period.remaining_balance.amount(),
                "period components"
            );
        }
        Ok(())
    }

    /// Solves the installment for `periods[owner..]` and applies it.
    fn resolve_emi(
        &self,
        mut periods: Vec<RepaymentPeriod>,
        owner: usize,
    ) -> ScheduleResult<Vec<RepaymentPeriod>> {
        let factors = periods[owner..]
            .iter()
            .map(|p| period_rate_factor(p, &self.config))
            .collect::<ScheduleResult<Vec<_>>>()?;
        let outstanding = periods[owner].outstanding_balance();
        let emi = solve_emi(outstanding, &factors, &self.config)?;

        debug!(
            from_period = owner + 1,
            periods = factors.len(),
            outstanding = %outstanding,
            emi = %emi.amount(),
            "solved installment"
        );

        for period in &mut periods[owner..] {
            period.emi = emi;
        }
        self.compute_components(&mut periods)?;
        self.adjust_emi(periods, owner)
    }

    /// Moves the installment by `difference / n` when the last installment
    /// is off by more than half a minor unit per related period, keeping
    /// the result only if it narrows the difference.
    fn adjust_emi(
        &self,
        periods: Vec<RepaymentPeriod>,
        owner: usize,
    ) -> ScheduleResult<Vec<RepaymentPeriod>> {
        let related = &periods[owner..];
        let n = related.len();
        if n < 2 {
            return Ok(periods);
        }

        let difference = last_installment_difference(related)?;
        let lower_half = Decimal::from(n / 2);
        if difference.is_zero() || lower_half.is_zero() {
            return Ok(periods);
        }

        let ctx = self.config.monetary_context();
        let minor_unit = Decimal::new(1, ctx.decimal_places);
        if difference.abs().amount() / minor_unit <= lower_half {
            return Ok(periods);
        }

        let mc = self.config.math_context();
        let original = related[n - 2].emi;
        let adjustment = difference.divided_by(Decimal::from(n), &mc, &ctx)?;
        let adjusted = apply_installment_multiple(original.plus(adjustment)?, &self.config);
        if adjusted == original {
            return Ok(periods);
        }

        let mut candidate = periods.clone();
        for period in &mut candidate[owner..] {
            period.emi = adjusted;
        }
        self.compute_components(&mut candidate)?;

        let narrowed = last_installment_difference(&candidate[owner..])?;
        if difference.abs().is_greater_than(&narrowed.abs()) {
            debug!(
                from = %original.amount(),
                to = %adjusted.amount(),
                difference = %difference.amount(),
                "adjusted installment"
            );
            Ok(candidate)
        } else {
            Ok(periods)
        }
    }

    /// Repayment periods in order.
    #[must_use]
    pub fn periods(&self) -> &[RepaymentPeriod] {
        &self.periods
    }

    /// Period by 1-based number.
    #[must_use]
    pub fn period(&self, number: u32) -> Option<&RepaymentPeriod> {
        self.periods.iter().find(|p| p.number == number)
    }

    /// Period whose installment falls due on `due`.
    #[must_use]
    pub fn find_period_by_due_date(&self, due: Date) -> Option<&RepaymentPeriod> {
        self.periods.iter().find(|p| p.due == due)
    }

    /// Period whose `[from, due)` range contains `date`.
    #[must_use]
    pub fn find_period_containing(&self, date: Date) -> Option<&RepaymentPeriod> {
        self.periods.iter().find(|p| p.contains(date))
    }

    /// Current boundaries.
    #[must_use]
    pub fn boundaries(&self) -> Vec<PeriodBoundary> {
        self.periods.iter().map(RepaymentPeriod::boundary).collect()
    }

    /// Recorded events in the order they were applied.
    #[must_use]
    pub fn events(&self) -> &[ScheduleEvent] {
        &self.events
    }

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> ScheduleState {
        self.state
    }

    /// Configuration the schedule was generated with.
    #[must_use]
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Number of repayment periods.
    #[must_use]
    pub fn number_of_periods(&self) -> usize {
        self.periods.len()
    }

    /// Days from the first period's start to the last due date.
    #[must_use]
    pub fn loan_term_in_days(&self) -> i64 {
        self.first_date().days_between(&self.last_due_date())
    }

    /// Sum of all disbursements.
    #[must_use]
    pub fn total_disbursed(&self) -> Money {
        self.sum(|p| p.disbursed_amount)
    }

    /// Sum of interest due over all periods.
    #[must_use]
    pub fn total_interest(&self) -> Money {
        self.sum(|p| p.interest_due)
    }

    /// Sum of principal due over all periods.
    #[must_use]
    pub fn total_principal(&self) -> Money {
        self.sum(|p| p.principal_due)
    }

    fn sum(&self, field: impl Fn(&RepaymentPeriod) -> Money) -> Money {
        let total: Decimal = self.periods.iter().map(|p| field(p).amount()).sum();
        self.config.monetary_context().of(total)
    }

    fn first_date(&self) -> Date {
        self.periods[0].from
    }

    fn last_due_date(&self) -> Date {
        self.periods[self.periods.len() - 1].due
    }
}

fn last_installment_difference(related: &[RepaymentPeriod]) -> ScheduleResult<Money> {
    let n = related.len();
    Ok(related[n - 1].emi.minus(related[n - 2].emi)?)
}
