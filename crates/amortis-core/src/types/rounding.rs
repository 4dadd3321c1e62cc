//! Rounding modes.

use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rounding mode applied to every intermediate and monetary result.
///
/// Names follow the usual decimal-library vocabulary; each maps onto a
/// [`RoundingStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RoundingMode {
    /// Away from zero.
    Up,
    /// Towards zero (truncation).
    Down,
    /// Towards positive infinity.
    Ceiling,
    /// Towards negative infinity.
    Floor,
    /// Nearest neighbour, ties away from zero.
    HalfUp,
    /// Nearest neighbour, ties towards zero.
    HalfDown,
    /// Nearest neighbour, ties to the even neighbour (banker's rounding).
    #[default]
    HalfEven,
}

impl RoundingMode {
    /// Returns the equivalent `rust_decimal` strategy.
    #[must_use]
    pub const fn strategy(&self) -> RoundingStrategy {
        match self {
            RoundingMode::Up => RoundingStrategy::AwayFromZero,
            RoundingMode::Down => RoundingStrategy::ToZero,
            RoundingMode::Ceiling => RoundingStrategy::ToPositiveInfinity,
            RoundingMode::Floor => RoundingStrategy::ToNegativeInfinity,
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfDown => RoundingStrategy::MidpointTowardZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }

    /// Returns the conventional upper-case name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            RoundingMode::Up => "UP",
            RoundingMode::Down => "DOWN",
            RoundingMode::Ceiling => "CEILING",
            RoundingMode::Floor => "FLOOR",
            RoundingMode::HalfUp => "HALF_UP",
            RoundingMode::HalfDown => "HALF_DOWN",
            RoundingMode::HalfEven => "HALF_EVEN",
        }
    }

    /// Returns all rounding modes.
    #[must_use]
    pub fn all() -> &'static [RoundingMode] {
        &[
            RoundingMode::Up,
            RoundingMode::Down,
            RoundingMode::Ceiling,
            RoundingMode::Floor,
            RoundingMode::HalfUp,
            RoundingMode::HalfDown,
            RoundingMode::HalfEven,
        ]
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for RoundingMode {
    type Err = RoundingModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");

        match normalized.as_str() {
            "UP" => Ok(RoundingMode::Up),
            "DOWN" => Ok(RoundingMode::Down),
            "CEILING" => Ok(RoundingMode::Ceiling),
            "FLOOR" => Ok(RoundingMode::Floor),
            "HALF_UP" | "HALFUP" => Ok(RoundingMode::HalfUp),
            "HALF_DOWN" | "HALFDOWN" => Ok(RoundingMode::HalfDown),
            "HALF_EVEN" | "HALFEVEN" | "BANKERS" => Ok(RoundingMode::HalfEven),
            _ => Err(RoundingModeParseError(s.to_string())),
        }
    }
}

/// Error type for parsing rounding modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundingModeParseError(pub String);

impl fmt::Display for RoundingModeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown rounding mode: '{}'", self.0)
    }
}

impl std::error::Error for RoundingModeParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_half_modes_on_midpoint() {
        let value = dec!(2.125);
        let round = |mode: RoundingMode| value.round_dp_with_strategy(2, mode.strategy());

        assert_eq!(round(RoundingMode::HalfEven), dec!(2.12));
        assert_eq!(round(RoundingMode::HalfUp), dec!(2.13));
        assert_eq!(round(RoundingMode::HalfDown), dec!(2.12));
        assert_eq!(round(RoundingMode::Up), dec!(2.13));
        assert_eq!(round(RoundingMode::Down), dec!(2.12));
    }

    #[test]
    fn test_directional_modes_on_negative() {
        let value = dec!(-2.121);
        assert_eq!(
            value.round_dp_with_strategy(2, RoundingMode::Ceiling.strategy()),
            dec!(-2.12)
        );
        assert_eq!(
            value.round_dp_with_strategy(2, RoundingMode::Floor.strategy()),
            dec!(-2.13)
        );
    }

    #[test]
    fn test_parse_names() {
        for mode in RoundingMode::all() {
            assert_eq!(mode.name().parse::<RoundingMode>().unwrap(), *mode);
        }
        assert_eq!("half-even".parse::<RoundingMode>().unwrap(), RoundingMode::HalfEven);
        assert!("nearest".parse::<RoundingMode>().is_err());
    }
}
