//! Error types for the core value types.

use thiserror::Error;

use crate::types::Currency;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by dates, conventions and decimal arithmetic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid or out-of-range date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Two monetary amounts in different currencies were combined.
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch {
        /// Currency of the left operand.
        left: Currency,
        /// Currency of the right operand.
        right: Currency,
    },

    /// Mathematical error (division by zero, overflow, etc.).
    #[error("Mathematical error: {reason}")]
    MathError {
        /// Description of the error.
        reason: String,
    },

    /// A convention or frequency value could not be used.
    #[error("Invalid convention: {reason}")]
    InvalidConvention {
        /// Description of the problem.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a currency mismatch error.
    #[must_use]
    pub fn currency_mismatch(left: Currency, right: Currency) -> Self {
        Self::CurrencyMismatch { left, right }
    }

    /// Creates a math error.
    #[must_use]
    pub fn math_error(reason: impl Into<String>) -> Self {
        Self::MathError {
            reason: reason.into(),
        }
    }

    /// Creates an invalid convention error.
    #[must_use]
    pub fn invalid_convention(reason: impl Into<String>) -> Self {
        Self::InvalidConvention {
            reason: reason.into(),
        }
    }
}
