//! Whole-unit price representation.
//!
//! Prices are integral amounts in the store's currency (no fractional
//! currency). Arithmetic saturates rather than overflowing so a corrupted
//! quantity can never wrap a total around to a small number.

use core::fmt;
use core::iter::Sum;

use serde::{Deserialize, Serialize};

use super::Quantity;

/// Largest float that still maps to an exact integer.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Errors that can occur when parsing a [`Price`] from markup text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is empty or only whitespace.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a number.
    #[error("price is not a number: {0}")]
    NotANumber(String),
    /// The input is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The input has a fractional part.
    #[error("price must be a whole amount")]
    Fractional,
    /// The input is too large to represent exactly.
    #[error("price is out of range")]
    OutOfRange,
}

/// A non-negative unit price in whole currency units.
///
/// Serializes as a bare JSON number.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(0);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the amount in whole currency units.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Price of `qty` units, saturating at `u64::MAX`.
    #[must_use]
    pub fn times(self, qty: Quantity) -> Self {
        Self(self.0.saturating_mul(u64::from(qty.get())))
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Parse a price from untrusted markup text (e.g. a `data-price` attribute).
    ///
    /// Accepts plain integers and integral decimals such as `"1500.0"`,
    /// with surrounding whitespace ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is empty, not numeric, negative,
    /// fractional, or too large to represent exactly.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PriceError::Empty);
        }

        if let Ok(amount) = s.parse::<u64>() {
            return Ok(Self(amount));
        }

        let value: f64 = s
            .parse()
            .map_err(|_| PriceError::NotANumber(s.to_string()))?;

        if !value.is_finite() {
            return Err(PriceError::NotANumber(s.to_string()));
        }
        if value < 0.0 {
            return Err(PriceError::Negative);
        }
        if value.fract() != 0.0 {
            return Err(PriceError::Fractional);
        }
        if value > MAX_EXACT_FLOAT {
            return Err(PriceError::OutOfRange);
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // range checked above
        Ok(Self(value as u64))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}
