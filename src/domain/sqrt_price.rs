//! Square-root price of the pool.

use core::fmt;

use alloy_primitives::U256;

use crate::error::ReplayError;

/// Q96 fixed-point scale (`2^96`). Exactly representable in `f64`.
const Q96: f64 = 79_228_162_514_264_337_593_543_950_336.0;

/// The pool's price as a square root, in plain (un-scaled) terms.
///
/// On-chain the value travels as `sqrtPriceX96`, a fixed-point big
/// integer scaled by `2^96`; see [`SqrtPrice::from_x96`]. Internally
/// the engine works on the un-scaled `f64` value, which is adequate
/// for analytics-grade simulation (this crate does not target
/// settlement-grade determinism).
///
/// The wrapped value must be finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SqrtPrice(f64);

impl SqrtPrice {
    /// Price ratio of 1:1 (`sqrt(1.0) = 1.0`, tick 0).
    pub const ONE: Self = Self(1.0);

    /// Creates a new `SqrtPrice` from an un-scaled `f64` value.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::InvalidPrice`] if the value is zero,
    /// negative, NaN, or infinite.
    pub fn new(value: f64) -> crate::error::Result<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ReplayError::InvalidPrice(
                "sqrt price must be finite and strictly positive",
            ));
        }
        Ok(Self(value))
    }

    /// Converts a raw `sqrtPriceX96` big integer into an un-scaled
    /// sqrt price.
    ///
    /// The X96 value can exceed `u128` for high ticks, so the input is
    /// taken as a full [`U256`] and widened limb-by-limb before the
    /// division by `2^96`.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::InvalidPrice`] if the input is zero.
    pub fn from_x96(sqrt_price_x96: U256) -> crate::error::Result<Self> {
        Self::new(u256_to_f64(sqrt_price_x96) / Q96)
    }

    /// Returns the underlying `f64` value.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }

    /// Returns the plain price (`sqrt_price^2`).
    #[must_use]
    pub fn price(&self) -> f64 {
        self.0 * self.0
    }
}

impl fmt::Display for SqrtPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Widens a `U256` to `f64` by summing its 64-bit limbs.
///
/// Loses precision beyond 53 bits, which is inherent to the float
/// engine and acceptable here.
fn u256_to_f64(value: U256) -> f64 {
    // 2^64 as f64, exact.
    const LIMB: f64 = 18_446_744_073_709_551_616.0;

    let mut acc = 0.0_f64;
    for &limb in value.as_limbs().iter().rev() {
        #[allow(clippy::cast_precision_loss)]
        {
            acc = acc * LIMB + limb as f64;
        }
    }
    acc
}
