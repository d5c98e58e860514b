//! Exact-input swap simulation against a precomputed table.
//!
//! Two paths, selected by whether the current range can absorb the
//! whole trade:
//!
//! - **in-range**: one price move inside the current range;
//! - **multi-range**: cumulative capacities decide which range the
//!   price lands in, full ranges in between contribute their entire
//!   reserves, and only the final partial step runs through the
//!   next-price formulas.
//!
//! The function is pure: same table, same arguments, same outcome.

use std::collections::BTreeMap;

use crate::domain::{FeePpm, FeeShare, SqrtPrice, SwapOptions, SwapOutcome, Tick};
use crate::error::ReplayError;
use crate::math::{
    amount0_delta, amount1_delta, next_sqrt_price_given_amount0, next_sqrt_price_given_amount1,
    sqrt_price_at_tick,
};
use crate::swap::table::{SwapTable, TableRow};

/// Simulates swapping `amount_in` of the input token against the
/// table.
///
/// `zero_for_one` selects the direction: token0 in pushes the price
/// down, token1 in pushes it up. The fee is charged on the input side;
/// `fee_total` always equals `amount_in * fee`.
///
/// # Errors
///
/// - [`ReplayError::ZeroAmountSwap`] for a zero input,
///   [`ReplayError::InvalidAmount`] for a negative or non-finite one.
/// - [`ReplayError::InsufficientLiquidity`] if no downstream range's
///   cumulative capacity covers the net remainder, the pool's full
///   input budget in the trade direction.
/// - [`ReplayError::PriceOutOfRange`] if the final price would leave
///   the representable tick range.
pub fn simulate(
    table: &SwapTable,
    zero_for_one: bool,
    amount_in: f64,
    fee: FeePpm,
    options: SwapOptions,
) -> crate::error::Result<SwapOutcome> {
    if amount_in == 0.0 {
        return Err(ReplayError::ZeroAmountSwap);
    }
    if !amount_in.is_finite() || amount_in < 0.0 {
        return Err(ReplayError::InvalidAmount(
            "swap input must be finite and positive",
        ));
    }

    let in_range = table.in_range();
    let (in_capacity, in_output) = if zero_for_one {
        (in_range.input0, in_range.output1)
    } else {
        (in_range.input1, in_range.output0)
    };

    let net_in = amount_in * fee.complement();
    let mut fee_by_tick = options.fee_attribution.then(BTreeMap::new);

    let (amount_out, sqrt_price_after) = if in_capacity > net_in {
        // The current range absorbs the whole trade.
        if let Some(fees) = fee_by_tick.as_mut() {
            fees.insert(
                in_range.tick.get(),
                FeeShare {
                    fee_paid: amount_in * fee.fraction(),
                    liquidity: in_range.liquidity,
                },
            );
        }
        partial_step(
            zero_for_one,
            in_range.sqrt_price,
            in_range.liquidity,
            net_in,
        )?
    } else {
        // Cross out of the current range; the remainder walks the
        // precomputed downstream capacities.
        let remaining = amount_in - in_capacity;
        let remaining_net = remaining * fee.complement();

        if let Some(fees) = fee_by_tick.as_mut() {
            fees.insert(
                in_range.tick.get(),
                FeeShare {
                    fee_paid: in_capacity * fee.fraction(),
                    liquidity: in_range.liquidity,
                },
            );
        }

        let downstream = table.downstream(zero_for_one);

        // First row whose cumulative input capacity covers the
        // remainder; `>=` so an exact match lands the price on the
        // row's far boundary. No row covering it means the pool runs
        // dry, the only insufficiency condition.
        let mut cumulative = 0.0_f64;
        let mut boundary: Option<(usize, &TableRow)> = None;
        for (index, row) in downstream.iter().copied().enumerate() {
            cumulative += input_capacity(row, zero_for_one);
            if cumulative >= remaining_net {
                boundary = Some((index, row));
                break;
            }
        }
        let Some((boundary_index, boundary_row)) = boundary else {
            return Err(ReplayError::InsufficientLiquidity);
        };

        let crossed = downstream
            .get(..boundary_index)
            .unwrap_or_default();
        let crossed_in: f64 = crossed.iter().map(|r| input_capacity(r, zero_for_one)).sum();
        let crossed_out: f64 = crossed
            .iter()
            .map(|r| output_capacity(r, zero_for_one))
            .sum();

        let final_in = remaining - crossed_in;
        let final_net = final_in * fee.complement();

        if let Some(fees) = fee_by_tick.as_mut() {
            for row in crossed {
                fees.insert(
                    row.lower.get(),
                    FeeShare {
                        fee_paid: input_capacity(row, zero_for_one) * fee.fraction(),
                        liquidity: row.liquidity,
                    },
                );
            }
            fees.insert(
                boundary_row.lower.get(),
                FeeShare {
                    fee_paid: final_in * fee.fraction(),
                    liquidity: boundary_row.liquidity,
                },
            );
        }

        // The final step starts at the boundary the price enters the
        // row through.
        let entry_price = if zero_for_one {
            boundary_row.sqrt_upper
        } else {
            boundary_row.sqrt_lower
        };
        let (final_out, sqrt_price_after) =
            partial_step(zero_for_one, entry_price, boundary_row.liquidity, final_net)?;

        (in_output + crossed_out + final_out, sqrt_price_after)
    };

    check_price_bounds(sqrt_price_after)?;

    let max_input = if options.compute_max {
        let downstream_capacity: f64 = table
            .downstream(zero_for_one)
            .iter()
            .map(|r| input_capacity(r, zero_for_one))
            .sum();
        // Downstream capacity fills net of fee, so the gross budget
        // scales it back up.
        Some(in_capacity + downstream_capacity / fee.complement())
    } else {
        None
    };

    Ok(SwapOutcome {
        amount_in,
        amount_out,
        fee_total: amount_in * fee.fraction(),
        sqrt_price_before: SqrtPrice::new(in_range.sqrt_price)?,
        sqrt_price_after: SqrtPrice::new(sqrt_price_after)?,
        fee_by_tick,
        max_input,
    })
}

/// Input-side full-range capacity of a row for the given direction.
fn input_capacity(row: &TableRow, zero_for_one: bool) -> f64 {
    if zero_for_one {
        row.amount0
    } else {
        row.amount1
    }
}

/// Output-side full-range capacity of a row for the given direction.
fn output_capacity(row: &TableRow, zero_for_one: bool) -> f64 {
    if zero_for_one {
        row.amount1
    } else {
        row.amount0
    }
}

/// Moves the price within one range by a net input amount; returns the
/// output released and the price reached.
fn partial_step(
    zero_for_one: bool,
    sqrt_price: f64,
    liquidity: f64,
    net_in: f64,
) -> crate::error::Result<(f64, f64)> {
    if zero_for_one {
        let next = next_sqrt_price_given_amount0(sqrt_price, liquidity, net_in, true)?;
        Ok((amount1_delta(next, sqrt_price, liquidity)?, next))
    } else {
        let next = next_sqrt_price_given_amount1(sqrt_price, liquidity, net_in, true)?;
        Ok((amount0_delta(next, sqrt_price, liquidity)?, next))
    }
}

fn check_price_bounds(sqrt_price: f64) -> crate::error::Result<()> {
    if sqrt_price < sqrt_price_at_tick(Tick::MIN) || sqrt_price > sqrt_price_at_tick(Tick::MAX) {
        return Err(ReplayError::PriceOutOfRange(
            "trade pushes price past the tick bounds",
        ));
    }
    Ok(())
}
