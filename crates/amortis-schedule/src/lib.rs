//! # Amortis Schedule
//!
//! Progressive loan interest schedule and EMI calculation engine.
//!
//! Given a nominal rate, day-count conventions and a list of repayment
//! period boundaries, the engine produces a fully reconciled amortization
//! schedule with equal installments, splits periods at mid-period
//! disbursements and regenerates the schedule when the boundaries change.
//!
//! ## Components
//!
//! - [`rate_factor`]: per-span growth from the annual rate and day counts
//! - [`fn_value`]: the cumulative factor recurrence
//! - [`emi`]: the constant installment solver
//! - [`splitter`]: partitions a period into interest periods
//! - [`model`]: the schedule aggregate and its recalculation
//!
//! All arithmetic runs under the [`MathContext`](amortis_core::MathContext)
//! taken from [`ScheduleConfig`], rounding after every step, so the same
//! sequence of operations always produces the same decimal strings.
//!
//! ## Example
//!
//! ```rust
//! use amortis_core::prelude::*;
//! use amortis_schedule::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let config = ScheduleConfig::new(dec!(9.4822), RepaymentFrequency::monthly())
//!     .with_days_in_year(DaysInYearType::Days360)
//!     .with_days_in_month(DaysInMonthType::Days30);
//! let boundaries = generate_boundaries(start, 6, config.repayment_frequency).unwrap();
//!
//! let mut model = ProgressiveLoanInterestScheduleModel::generate(boundaries, config).unwrap();
//! model.add_disbursement(start, dec!(100)).unwrap();
//! model.add_disbursement(Date::from_ymd(2024, 1, 8).unwrap(), dec!(200)).unwrap();
//!
//! let first = &model.periods()[0];
//! assert_eq!(first.interest_periods.len(), 2);
//! assert_eq!(first.emi.amount(), dec!(51.33));
//! assert_eq!(model.total_principal().amount(), dec!(300));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod boundaries;
pub mod config;
pub mod emi;
pub mod error;
pub mod event;
pub mod fn_value;
pub mod model;
pub mod payable;
pub mod period;
pub mod rate_factor;
pub mod splitter;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::boundaries::{generate_boundaries, validate_boundaries};
    pub use crate::config::ScheduleConfig;
    pub use crate::error::{ScheduleError, ScheduleResult, Validate, ValidationError};
    pub use crate::event::{EventKind, ScheduleEvent};
    pub use crate::model::{ProgressiveLoanInterestScheduleModel, ScheduleState};
    pub use crate::payable::PayableDetails;
    pub use crate::period::{InterestPeriod, PeriodBoundary, RepaymentPeriod};
}

// Re-export commonly used types at crate root
pub use config::ScheduleConfig;
pub use error::{ScheduleError, ScheduleResult, Validate, ValidationError};
pub use model::{ProgressiveLoanInterestScheduleModel, ScheduleState};
pub use period::{InterestPeriod, PeriodBoundary, RepaymentPeriod};
