//! Value types shared by the schedule engine.

mod currency;
mod date;
mod frequency;
mod money;
mod rounding;

pub use currency::{Currency, CurrencyParseError};
pub use date::Date;
pub use frequency::{FrequencyParseError, PeriodFrequencyType, RepaymentFrequency};
pub use money::{MonetaryContext, Money};
pub use rounding::{RoundingMode, RoundingModeParseError};
