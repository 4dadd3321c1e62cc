//! # Amortis Core
//!
//! Core value types for the Amortis progressive loan schedule library.
//!
//! This crate provides the building blocks the schedule engine computes with:
//!
//! - **Types**: `Date`, `Currency`, `Money`, `RepaymentFrequency`, `RoundingMode`
//! - **Day Count Conventions**: days-in-year and days-in-month resolvers
//! - **Decimal Context**: `MathContext`, significant-digit arithmetic with
//!   rounding after every operation
//!
//! ## Example
//!
//! ```rust
//! use amortis_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let ctx = MonetaryContext::new(Currency::USD, RoundingMode::HalfEven);
//! let mc = MathContext::default();
//! let interest = ctx.of(dec!(100)).multiplied_by(dec!(0.0079018333), &mc, &ctx).unwrap();
//! assert_eq!(interest.amount(), dec!(0.79));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::uninlined_format_args)]

pub mod daycounts;
pub mod error;
pub mod math;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::daycounts::{DaysInMonthType, DaysInYearType};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::math::MathContext;
    pub use crate::types::{
        Currency, Date, MonetaryContext, Money, PeriodFrequencyType, RepaymentFrequency,
        RoundingMode,
    };
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use math::MathContext;
pub use types::{Currency, Date, MonetaryContext, Money};
