//! Pool liquidity amounts.

use core::fmt;
use core::ops::{Add, Sub};

use crate::error::ReplayError;

/// Active liquidity (`L`) over a tick range, or a whole pool.
///
/// Event payloads carry signed liquidity deltas as raw `f64`; this
/// newtype is used once deltas have been folded into a cumulative
/// curve, where the amount must be finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Liquidity(f64);

impl Liquidity {
    /// Zero liquidity. A valid resting state for a gap between
    /// populated tick ranges.
    pub const ZERO: Self = Self(0.0);

    /// Creates a new `Liquidity` amount.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::InvalidAmount`] if the value is
    /// negative, NaN, or infinite.
    pub fn new(value: f64) -> crate::error::Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(ReplayError::InvalidAmount(
                "liquidity must be finite and non-negative",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the underlying `f64` value.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Whether the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Add for Liquidity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Liquidity {
    type Output = Self;

    /// Saturates at zero; cumulative curves validate negativity with
    /// an epsilon before reaching this point.
    fn sub(self, rhs: Self) -> Self {
        Self((self.0 - rhs.0).max(0.0))
    }
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
