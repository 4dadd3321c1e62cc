//! Amounts payable for one installment as of a given date.

use serde::{Deserialize, Serialize};

use amortis_core::types::{Date, Money};

use crate::error::{ScheduleError, ScheduleResult};
use crate::model::ProgressiveLoanInterestScheduleModel;
use crate::rate_factor::rate_factor_minus_one;
use crate::splitter::split_period_at;

/// Balance, principal and interest of one installment paid on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayableDetails {
    /// Balance after the period's disbursements up to the pay date.
    pub outstanding_balance: Money,
    /// Principal payable.
    pub principal_due: Money,
    /// Interest accrued up to the pay date.
    pub interest_due: Money,
    /// Installment amount.
    pub emi: Money,
}

impl ProgressiveLoanInterestScheduleModel {
    /// Principal and interest payable for the installment due on
    /// `due_date` when it is paid on `pay_date`.
    ///
    /// Interest is counted only for interest periods ending on or before
    /// the pay date; an interest period straddling it is cut there. Paying
    /// early therefore shifts the installment from interest to principal.
    /// For the last installment a pay date after `due_date` extends the
    /// final interest period, so interest keeps accruing until payment.
    /// Earlier installments accrue only up to their due date. The schedule
    /// itself is not modified.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if no period is due on `due_date` or `pay_date`
    /// precedes the period start.
    pub fn payable_details(&self, due_date: Date, pay_date: Date) -> ScheduleResult<PayableDetails> {
        let idx = self
            .periods()
            .iter()
            .position(|p| p.due == due_date)
            .ok_or_else(|| ScheduleError::invariant(format!("no installment is due on {due_date}")))?;
        let period = &self.periods()[idx];
        if pay_date < period.from {
            return Err(ScheduleError::invariant(format!(
                "pay date {pay_date} is before period {} starts on {}",
                period.number, period.from
            )));
        }

        let config = self.config();
        let mc = config.math_context();
        let ctx = config.monetary_context();
        let boundary = period.boundary();
        let is_last = idx + 1 == self.number_of_periods();

        let mut interest_periods = split_period_at(&boundary, self.events(), &[pay_date], config)?;
        if is_last && pay_date > boundary.due {
            if let Some(tail) = interest_periods.last_mut() {
                tail.due = pay_date;
                tail.rate_factor_minus_1 = rate_factor_minus_one(config, &boundary, tail.from, pay_date)?;
            }
        }

        let mut outstanding = period.initial_balance;
        let mut correction = ctx.zero();
        let mut interest = ctx.zero();
        for ip in interest_periods.iter().filter(|ip| ip.from <= pay_date) {
            outstanding = outstanding.plus(ip.disbursement_amount)?;
            correction = correction.plus(ip.balance_correction_amount)?;
            if ip.due <= pay_date {
                let accrued = outstanding
                    .plus(correction)?
                    .multiplied_by(ip.rate_factor_minus_1, &mc, &ctx)?;
                interest = interest.plus(accrued)?;
            }
        }

        let (principal, emi) = if is_last {
            (outstanding, outstanding.plus(interest)?)
        } else {
            (period.emi.minus(interest)?, period.emi)
        };

        Ok(PayableDetails {
            outstanding_balance: outstanding,
            principal_due: principal,
            interest_due: interest,
            emi,
        })
    }
}
