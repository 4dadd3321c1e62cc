//! Repayment periods and their interest sub-periods.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use amortis_core::types::{Date, MonetaryContext, Money};

/// Number and date range of one repayment period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBoundary {
    /// 1-based period number.
    pub number: u32,
    /// First day of the period.
    pub from: Date,
    /// Due date (exclusive end of the period).
    pub due: Date,
}

impl PeriodBoundary {
    /// Creates a new boundary.
    #[must_use]
    pub fn new(number: u32, from: Date, due: Date) -> Self {
        Self { number, from, due }
    }

    /// Length of the period in days.
    #[must_use]
    pub fn days(&self) -> i64 {
        self.from.days_between(&self.due)
    }

    /// Returns true if `date` falls in `[from, due)`.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.from <= date && date < self.due
    }
}

/// A sub-range of a repayment period with a uniform interest base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestPeriod {
    /// Start of the sub-period.
    pub from: Date,
    /// End of the sub-period (exclusive).
    pub due: Date,
    /// Growth rate over the sub-period, minus one.
    pub rate_factor_minus_1: Decimal,
    /// Amount disbursed on `from`.
    pub disbursement_amount: Money,
    /// Balance correction booked on `from`.
    pub balance_correction_amount: Money,
    /// Balance the interest was accrued on.
    pub outstanding_balance: Money,
    /// Interest accrued over the sub-period.
    pub interest_due: Money,
}

impl InterestPeriod {
    /// Creates a sub-period with no events and no accrued interest.
    #[must_use]
    pub fn new(from: Date, due: Date, rate_factor_minus_1: Decimal, ctx: &MonetaryContext) -> Self {
        Self {
            from,
            due,
            rate_factor_minus_1,
            disbursement_amount: ctx.zero(),
            balance_correction_amount: ctx.zero(),
            outstanding_balance: ctx.zero(),
            interest_due: ctx.zero(),
        }
    }

    /// Length of the sub-period in days.
    #[must_use]
    pub fn days(&self) -> i64 {
        self.from.days_between(&self.due)
    }
}

/// One installment of the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentPeriod {
    /// 1-based period number.
    pub number: u32,
    /// First day of the period.
    pub from: Date,
    /// Due date of the installment.
    pub due: Date,
    /// Equal installment amount.
    pub emi: Money,
    /// Remaining balance carried in from the previous period.
    pub initial_balance: Money,
    /// Total disbursed inside this period.
    pub disbursed_amount: Money,
    /// Sum of the sub-periods' interest.
    pub interest_due: Money,
    /// Principal part of the installment.
    pub principal_due: Money,
    /// Balance left after this installment.
    pub remaining_balance: Money,
    /// Interest sub-periods partitioning `[from, due)`.
    pub interest_periods: Vec<InterestPeriod>,
}

impl RepaymentPeriod {
    /// Creates an unfunded period.
    #[must_use]
    pub fn new(
        boundary: PeriodBoundary,
        interest_periods: Vec<InterestPeriod>,
        ctx: &MonetaryContext,
    ) -> Self {
        Self {
            number: boundary.number,
            from: boundary.from,
            due: boundary.due,
            emi: ctx.zero(),
            initial_balance: ctx.zero(),
            disbursed_amount: ctx.zero(),
            interest_due: ctx.zero(),
            principal_due: ctx.zero(),
            remaining_balance: ctx.zero(),
            interest_periods,
        }
    }

    /// Boundary of this period.
    #[must_use]
    pub fn boundary(&self) -> PeriodBoundary {
        PeriodBoundary::new(self.number, self.from, self.due)
    }

    /// Balance after this period's disbursements, before repayment.
    #[must_use]
    pub fn outstanding_balance(&self) -> Decimal {
        self.initial_balance.amount() + self.disbursed_amount.amount()
    }

    /// Returns true if `date` falls in `[from, due)`.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.boundary().contains(date)
    }
}
