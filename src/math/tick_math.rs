//! Tick-to-price and price-to-tick conversions.
//!
//! These helpers implement the standard relationship
//! `price = 1.0001^tick` used by Uniswap v3-style pools, in sqrt-price
//! space (`sqrt_price = 1.0001^(tick/2)`).
//!
//! # Precision
//!
//! All conversions use `f64` arithmetic (`powf`, `ln`). That is the
//! precision target of this crate: analytics-grade simulation, not
//! on-chain bit-identical truncation.

use crate::domain::tick::{Tick, MAX_TICK, MIN_TICK};
use crate::domain::SqrtPrice;
use crate::error::ReplayError;

/// Base of the tick-price exponential: `price = BASE^tick`.
const BASE: f64 = 1.0001;

/// Computes the sqrt-price at a given tick: `1.0001^(tick/2)`.
///
/// All valid [`Tick`] values produce finite positive results, so this
/// cannot fail.
#[must_use = "this returns the computed price and does not modify state"]
pub fn sqrt_price_at_tick(tick: Tick) -> f64 {
    BASE.powf(f64::from(tick.get()) / 2.0)
}

/// Computes the real-valued (non-integer) tick of a sqrt-price:
/// `log_{1.0001}(sqrt_price^2)`.
#[must_use = "this returns the computed tick and does not modify state"]
pub fn sqrt_price_to_tick(sqrt_price: SqrtPrice) -> f64 {
    sqrt_price.price().ln() / BASE.ln()
}

/// Floors a real-valued tick onto the tick-spacing grid.
///
/// Floors to an integer first, then floor-divides by `spacing`, so
/// negative ticks land on the lower grid line (`-0.5` with spacing 60
/// floors to `-60`).
///
/// # Errors
///
/// - [`ReplayError::InvalidTick`] if `raw_tick` is non-finite, lands
///   outside the valid tick range, or `spacing` is not positive.
pub fn tick_floor(raw_tick: f64, spacing: i32) -> crate::error::Result<Tick> {
    if !raw_tick.is_finite() {
        return Err(ReplayError::InvalidTick("non-finite tick value"));
    }
    let floored = raw_tick.floor();
    if floored < f64::from(MIN_TICK) || floored > f64::from(MAX_TICK) {
        return Err(ReplayError::InvalidTick(
            "tick out of range [-887272, 887272]",
        ));
    }
    // In-range check above makes the truncation exact.
    #[allow(clippy::cast_possible_truncation)]
    Tick::new(floored as i32)?.floor_to_spacing(spacing)
}

/// The largest grid-aligned tick, used as the open upper bound of the
/// last populated segment.
///
/// # Errors
///
/// Returns [`ReplayError::InvalidTick`] for non-positive spacing.
pub fn max_aligned_tick(spacing: i32) -> crate::error::Result<Tick> {
    Tick::MAX.floor_to_spacing(spacing)
}
