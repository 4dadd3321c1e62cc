//! Balance-changing events recorded on a schedule.

use serde::{Deserialize, Serialize};
use std::fmt;

use amortis_core::types::{Date, Money};

/// Kind of a recorded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Funds paid out to the borrower; raises the outstanding balance.
    Disbursement,
    /// Signed change to the interest-bearing balance for the rest of the
    /// repayment period it falls in.
    BalanceCorrection,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Disbursement => write!(f, "disbursement"),
            EventKind::BalanceCorrection => write!(f, "balance correction"),
        }
    }
}

/// A dated amount in the schedule's event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    /// Effective date.
    pub date: Date,
    /// Amount, already at currency scale.
    pub amount: Money,
    /// Event kind.
    pub kind: EventKind,
}

impl ScheduleEvent {
    /// Creates a disbursement event.
    #[must_use]
    pub fn disbursement(date: Date, amount: Money) -> Self {
        Self {
            date,
            amount,
            kind: EventKind::Disbursement,
        }
    }

    /// Creates a balance correction event.
    #[must_use]
    pub fn balance_correction(date: Date, amount: Money) -> Self {
        Self {
            date,
            amount,
            kind: EventKind::BalanceCorrection,
        }
    }

    /// Returns true for disbursements.
    #[must_use]
    pub fn is_disbursement(&self) -> bool {
        matches!(self.kind, EventKind::Disbursement)
    }
}

impl fmt::Display for ScheduleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} on {}", self.kind, self.amount, self.date)
    }
}
