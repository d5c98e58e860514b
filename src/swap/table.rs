//! Precomputed per-range swap capacities.
//!
//! The on-chain pool walks ticks one at a time inside the swap loop.
//! Here the walk is replaced by a table built once per (distribution,
//! price) pair: every positive-liquidity range gets its boundary
//! sqrt-prices and full-range token capacities up front, and the range
//! holding the current price additionally gets partial capacities from
//! the live price to each of its boundaries.

use tracing::trace;

use crate::distribution::LiquidityDistribution;
use crate::domain::{SqrtPrice, Tick};
use crate::error::ReplayError;
use crate::math::{amount0_delta, amount1_delta, sqrt_price_at_tick, sqrt_price_to_tick, tick_floor};

/// One positive-liquidity range with its full-range capacities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRow {
    pub lower: Tick,
    pub upper: Tick,
    pub liquidity: f64,
    pub sqrt_lower: f64,
    pub sqrt_upper: f64,
    /// Token0 held across the whole range.
    pub amount0: f64,
    /// Token1 held across the whole range.
    pub amount1: f64,
}

/// Capacities of the range holding the current price, measured from
/// the live price to each boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InRange {
    pub sqrt_price: f64,
    pub tick: Tick,
    pub liquidity: f64,
    /// Token0 the range absorbs pushing the price down to its lower
    /// bound.
    pub input0: f64,
    /// Token1 released over that same move.
    pub output1: f64,
    /// Token1 the range absorbs pushing the price up to its upper
    /// bound.
    pub input1: f64,
    /// Token0 released over that same move.
    pub output0: f64,
}

/// The full precomputed view a simulated swap runs against.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapTable {
    rows: Vec<TableRow>,
    in_range: InRange,
}

impl SwapTable {
    /// Builds the table for a distribution at the given pool price.
    ///
    /// # Errors
    ///
    /// - [`ReplayError::MissingOrDuplicateTickSegment`] if the
    ///   positive-liquidity rows do not contain exactly one range
    ///   covering the floored current tick. A price inside a dead gap
    ///   could also be read as a valid zero-liquidity state that
    ///   trades with zero output; it is rejected here instead because
    ///   live pool data never records a price there, so a gap match
    ///   means the price history and the event log have desynced.
    /// - Math-domain errors from the capacity computations.
    pub fn build(
        distribution: &LiquidityDistribution,
        sqrt_price: SqrtPrice,
    ) -> crate::error::Result<Self> {
        let spacing = distribution.tick_spacing();
        let current_tick = tick_floor(sqrt_price_to_tick(sqrt_price), spacing)?;

        let mut rows = Vec::new();
        for segment in distribution.segments() {
            if segment.liquidity.is_zero() {
                continue;
            }
            let liquidity = segment.liquidity.get();
            let sqrt_lower = sqrt_price_at_tick(segment.lower);
            let sqrt_upper = sqrt_price_at_tick(segment.upper);
            rows.push(TableRow {
                lower: segment.lower,
                upper: segment.upper,
                liquidity,
                sqrt_lower,
                sqrt_upper,
                amount0: amount0_delta(sqrt_lower, sqrt_upper, liquidity)?,
                amount1: amount1_delta(sqrt_lower, sqrt_upper, liquidity)?,
            });
        }

        let matches: Vec<&TableRow> = rows
            .iter()
            .filter(|r| r.lower <= current_tick && current_tick < r.upper)
            .collect();
        let [row] = matches.as_slice() else {
            return Err(ReplayError::MissingOrDuplicateTickSegment {
                found: matches.len(),
            });
        };

        let sqrt_p = sqrt_price.get();
        let in_range = InRange {
            sqrt_price: sqrt_p,
            tick: row.lower,
            liquidity: row.liquidity,
            input0: amount0_delta(row.sqrt_lower, sqrt_p, row.liquidity)?,
            output1: amount1_delta(row.sqrt_lower, sqrt_p, row.liquidity)?,
            input1: amount1_delta(row.sqrt_upper, sqrt_p, row.liquidity)?,
            output0: amount0_delta(row.sqrt_upper, sqrt_p, row.liquidity)?,
        };

        trace!(
            rows = rows.len(),
            in_range_tick = %in_range.tick,
            "built swap table"
        );

        Ok(Self { rows, in_range })
    }

    /// Positive-liquidity rows, ascending by tick.
    #[must_use]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    #[must_use]
    pub const fn in_range(&self) -> &InRange {
        &self.in_range
    }

    /// Rows strictly beyond the in-range tick in trade direction, in
    /// traversal order (descending for a price-down trade).
    #[must_use]
    pub fn downstream(&self, zero_for_one: bool) -> Vec<&TableRow> {
        let pivot = self.in_range.tick;
        if zero_for_one {
            self.rows
                .iter()
                .rev()
                .filter(|r| r.lower < pivot)
                .collect()
        } else {
            self.rows.iter().filter(|r| r.lower > pivot).collect()
        }
    }
}
