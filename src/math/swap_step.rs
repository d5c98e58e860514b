//! Single-step swap math in sqrt-price space.
//!
//! Float renditions of the v3 `SqrtPriceMath` identities. For a range
//! holding liquidity `L` between sqrt-prices `a < b`:
//!
//! - token0 reserve delta: `L * (b - a) / (a * b)`
//! - token1 reserve delta: `L * (b - a)`
//!
//! Amounts and prices here are plain `f64`; the callers own the domain
//! newtypes and feed validated values through these hot-path helpers.

use crate::error::ReplayError;

fn check_sqrt_price(value: f64) -> crate::error::Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ReplayError::InvalidPrice(
            "sqrt price must be finite and strictly positive",
        ));
    }
    Ok(())
}

fn check_liquidity(value: f64) -> crate::error::Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ReplayError::InvalidAmount(
            "liquidity must be finite and strictly positive",
        ));
    }
    Ok(())
}

/// Token0 amount held between two sqrt-prices at liquidity `liquidity`.
///
/// Order-insensitive: the bounds are sorted internally, so the result
/// is always non-negative.
///
/// # Errors
///
/// [`ReplayError::InvalidPrice`] for non-positive or non-finite
/// bounds, [`ReplayError::InvalidAmount`] for non-positive liquidity.
pub fn amount0_delta(sqrt_a: f64, sqrt_b: f64, liquidity: f64) -> crate::error::Result<f64> {
    check_sqrt_price(sqrt_a)?;
    check_sqrt_price(sqrt_b)?;
    check_liquidity(liquidity)?;
    let (lo, hi) = if sqrt_a > sqrt_b {
        (sqrt_b, sqrt_a)
    } else {
        (sqrt_a, sqrt_b)
    };
    Ok(liquidity * ((hi - lo) / (hi * lo)))
}

/// Token1 amount held between two sqrt-prices at liquidity `liquidity`.
///
/// Order-insensitive, like [`amount0_delta`].
///
/// # Errors
///
/// Same domain checks as [`amount0_delta`].
pub fn amount1_delta(sqrt_a: f64, sqrt_b: f64, liquidity: f64) -> crate::error::Result<f64> {
    check_sqrt_price(sqrt_a)?;
    check_sqrt_price(sqrt_b)?;
    check_liquidity(liquidity)?;
    let (lo, hi) = if sqrt_a > sqrt_b {
        (sqrt_b, sqrt_a)
    } else {
        (sqrt_a, sqrt_b)
    };
    Ok(liquidity * (hi - lo))
}

/// Sqrt-price after trading `amount` of token0 against the range.
///
/// Adding token0 to reserves moves the price down:
/// `L * sp / (L + amount * sp)`. Removing divides by
/// `L - amount * sp` instead, which can cross infinity.
///
/// # Errors
///
/// [`ReplayError::PriceOutOfRange`] if the denominator is not
/// strictly positive (the range cannot yield that much token0), plus
/// the domain checks of [`amount0_delta`].
pub fn next_sqrt_price_given_amount0(
    sqrt_price: f64,
    liquidity: f64,
    amount: f64,
    adding: bool,
) -> crate::error::Result<f64> {
    check_sqrt_price(sqrt_price)?;
    check_liquidity(liquidity)?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(ReplayError::InvalidAmount(
            "token0 amount must be finite and non-negative",
        ));
    }
    let denominator = if adding {
        liquidity + amount * sqrt_price
    } else {
        liquidity - amount * sqrt_price
    };
    if denominator <= 0.0 {
        return Err(ReplayError::PriceOutOfRange(
            "token0 amount exceeds range reserves",
        ));
    }
    Ok((liquidity * sqrt_price) / denominator)
}

/// Sqrt-price after trading `amount` of token1 against the range.
///
/// Adding token1 moves the price up by `amount / L`; removing moves
/// it down and can cross zero.
///
/// # Errors
///
/// [`ReplayError::PriceOutOfRange`] if the resulting price is not
/// strictly positive, plus the domain checks of [`amount0_delta`].
pub fn next_sqrt_price_given_amount1(
    sqrt_price: f64,
    liquidity: f64,
    amount: f64,
    adding: bool,
) -> crate::error::Result<f64> {
    check_sqrt_price(sqrt_price)?;
    check_liquidity(liquidity)?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(ReplayError::InvalidAmount(
            "token1 amount must be finite and non-negative",
        ));
    }
    let next = if adding {
        sqrt_price + amount / liquidity
    } else {
        sqrt_price - amount / liquidity
    };
    if next <= 0.0 {
        return Err(ReplayError::PriceOutOfRange(
            "token1 amount exceeds range reserves",
        ));
    }
    Ok(next)
}
