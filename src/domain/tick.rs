//! Discrete price point for the concentrated liquidity model.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ReplayError;

/// Minimum valid tick index (Uniswap v3 standard).
pub(crate) const MIN_TICK: i32 = -887_272;

/// Maximum valid tick index (Uniswap v3 standard).
pub(crate) const MAX_TICK: i32 = 887_272;

/// A discrete price point in the concentrated liquidity model.
///
/// Follows the Uniswap v3 convention where price increases
/// exponentially with the tick index: `price = 1.0001^tick`. Valid
/// tick indices range from [`MIN`](Self::MIN) (`-887272`) to
/// [`MAX`](Self::MAX) (`887272`).
///
/// # Examples
///
/// ```
/// use clmm_replay::domain::Tick;
///
/// let tick = Tick::new(100);
/// assert!(tick.is_ok());
/// assert_eq!(tick.unwrap_or(Tick::ZERO).get(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tick(i32);

impl Tick {
    /// Minimum valid tick (`-887272`).
    pub const MIN: Self = Self(MIN_TICK);

    /// Maximum valid tick (`887272`).
    pub const MAX: Self = Self(MAX_TICK);

    /// Neutral tick where `price = 1.0001^0 = 1.0`.
    pub const ZERO: Self = Self(0);

    /// Creates a new `Tick` with range validation.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::InvalidTick`] if `value` is outside
    /// the range `[-887272, 887272]`.
    pub const fn new(value: i32) -> crate::error::Result<Self> {
        if value < MIN_TICK || value > MAX_TICK {
            return Err(ReplayError::InvalidTick(
                "tick out of range [-887272, 887272]",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the underlying `i32` tick index.
    #[must_use]
    pub const fn get(&self) -> i32 {
        self.0
    }

    /// Rounds this tick down to the nearest multiple of `spacing`.
    ///
    /// Uses floor division, so negative ticks round towards the lower
    /// multiple: `-5` with spacing `60` floors to `-60`, not `0`.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::InvalidTick`] if `spacing` is not
    /// strictly positive.
    pub const fn floor_to_spacing(&self, spacing: i32) -> crate::error::Result<Self> {
        if spacing <= 0 {
            return Err(ReplayError::InvalidTick(
                "tick spacing must be strictly positive",
            ));
        }
        Ok(Self(self.0.div_euclid(spacing) * spacing))
    }

    /// Returns `true` if this tick is an exact multiple of `spacing`.
    #[must_use]
    pub const fn is_aligned_to(&self, spacing: i32) -> bool {
        spacing > 0 && self.0 % spacing == 0
    }

    /// Checked addition of a delta to this tick.
    ///
    /// Returns `None` if the result would be outside the valid tick
    /// range.
    #[must_use]
    pub const fn checked_add(&self, delta: i32) -> Option<Self> {
        match self.0.checked_add(delta) {
            Some(v) if v >= MIN_TICK && v <= MAX_TICK => Some(Self(v)),
            _ => None,
        }
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tick({})", self.0)
    }
}
