//! Property-based invariant suites for the replay engine.
//!
//! 1. **Distribution shape**: segments sorted, contiguous,
//!    non-negative, zero tail, for arbitrary position sets.
//! 2. **Output positivity / monotonicity**: more input never yields
//!    less output on a fixed pool.
//! 3. **Vectorization soundness**: the one-pass multi-range
//!    computation matches a range-by-range reference walk.
//! 4. **Idempotence**: simulation is a pure function.
//! 5. **Tick math round trips**: tick → sqrt-price → tick, and
//!    grid flooring stays within one spacing below the input.

#![allow(clippy::panic)]

use proptest::prelude::*;

use crate::distribution::LiquidityDistribution;
use crate::domain::{Cursor, EventKind, FeePpm, LiquidityEvent, SqrtPrice, SwapOptions, Tick};
use crate::math::{
    amount0_delta, amount1_delta, next_sqrt_price_given_amount0, next_sqrt_price_given_amount1,
    sqrt_price_at_tick, sqrt_price_to_tick, tick_floor,
};
use crate::swap::{simulate, SwapTable};

const SPACING: i32 = 60;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn tick(value: i32) -> Tick {
    let Ok(t) = Tick::new(value) else {
        panic!("valid tick");
    };
    t
}

fn mint(block: u64, lower: i32, upper: i32, liquidity: f64) -> LiquidityEvent {
    let Ok(ev) = LiquidityEvent::new(
        Cursor::new(block, 0),
        EventKind::Mint,
        tick(lower),
        tick(upper),
        liquidity,
    ) else {
        panic!("valid event");
    };
    ev
}

/// (grid slot, width in slots, liquidity) triplets mapped onto the
/// spacing-60 grid.
fn position_strategy() -> impl Strategy<Value = Vec<(i32, i32, f64)>> {
    prop::collection::vec(
        (-100_i32..100, 1_i32..40, 1.0e3_f64..1.0e9),
        1..8,
    )
}

fn events_from(positions: &[(i32, i32, f64)]) -> Vec<LiquidityEvent> {
    positions
        .iter()
        .enumerate()
        .map(|(i, &(slot, width, liquidity))| {
            mint(
                i as u64 + 1,
                slot * SPACING,
                (slot + width) * SPACING,
                liquidity,
            )
        })
        .collect()
}

/// Pool fixed across the swap properties: stacked and disjoint
/// ranges around tick 0.
fn fixed_table() -> SwapTable {
    let events = [
        mint(1, -1200, 1200, 5.0e6),
        mint(2, -600, 600, 2.0e6),
        mint(3, -2400, -1800, 1.0e6),
        mint(4, 1800, 2400, 1.0e6),
    ];
    let Ok(dist) = LiquidityDistribution::build(&events, Cursor::MAX, SPACING) else {
        panic!("valid distribution");
    };
    let Ok(price) = SqrtPrice::new(1.0) else {
        panic!("valid price");
    };
    let Ok(table) = SwapTable::build(&dist, price) else {
        panic!("valid table");
    };
    table
}

fn fee_3000() -> FeePpm {
    let Ok(fee) = FeePpm::new(3000) else {
        panic!("valid fee");
    };
    fee
}

fn fee_zero() -> FeePpm {
    let Ok(fee) = FeePpm::new(0) else {
        panic!("valid fee");
    };
    fee
}

/// Fee-free reference: walks the ranges one at a time with the
/// single-step formulas, the way the on-chain loop does.
fn walk_ranges(table: &SwapTable, zero_for_one: bool, amount_in: f64) -> Option<(f64, f64)> {
    let in_range = table.in_range();

    let Some(current_row) = table.rows().iter().find(|r| r.lower == in_range.tick) else {
        panic!("in-range row present");
    };

    // (liquidity, entry price, exit price) per range, traversal order.
    let mut steps = vec![if zero_for_one {
        (in_range.liquidity, in_range.sqrt_price, current_row.sqrt_lower)
    } else {
        (in_range.liquidity, in_range.sqrt_price, current_row.sqrt_upper)
    }];
    for row in table.downstream(zero_for_one) {
        if zero_for_one {
            steps.push((row.liquidity, row.sqrt_upper, row.sqrt_lower));
        } else {
            steps.push((row.liquidity, row.sqrt_lower, row.sqrt_upper));
        }
    }

    let mut remaining = amount_in;
    let mut out = 0.0;
    for (liquidity, entry, exit) in steps {
        let capacity = if zero_for_one {
            amount0_delta(entry, exit, liquidity).ok()?
        } else {
            amount1_delta(entry, exit, liquidity).ok()?
        };
        if capacity > remaining {
            let next = if zero_for_one {
                next_sqrt_price_given_amount0(entry, liquidity, remaining, true).ok()?
            } else {
                next_sqrt_price_given_amount1(entry, liquidity, remaining, true).ok()?
            };
            out += if zero_for_one {
                amount1_delta(next, entry, liquidity).ok()?
            } else {
                amount0_delta(next, entry, liquidity).ok()?
            };
            return Some((out, next));
        }
        out += if zero_for_one {
            amount1_delta(entry, exit, liquidity).ok()?
        } else {
            amount0_delta(entry, exit, liquidity).ok()?
        };
        remaining -= capacity;
    }
    None
}

// ---------------------------------------------------------------------------
// 1. Distribution shape
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn distribution_shape_invariants(positions in position_strategy()) {
        let events = events_from(&positions);
        let Ok(dist) = LiquidityDistribution::build(&events, Cursor::MAX, SPACING) else {
            panic!("mint-only history must build");
        };

        for pair in dist.segments().windows(2) {
            let [a, b] = pair else { panic!("pair") };
            prop_assert!(a.lower < a.upper);
            prop_assert_eq!(a.upper, b.lower);
        }
        for segment in dist.segments() {
            prop_assert!(segment.liquidity.get() >= 0.0);
        }
        let Some(last) = dist.segments().last() else {
            panic!("non-empty distribution");
        };
        // All positions close before the sentinel, so the tail holds
        // only float residue.
        prop_assert!(last.liquidity.get().abs() < 1e-6);
    }

    #[test]
    fn distribution_total_matches_sum_of_overlaps(
        positions in position_strategy(),
        probe_slot in -150_i32..150,
    ) {
        let events = events_from(&positions);
        let Ok(dist) = LiquidityDistribution::build(&events, Cursor::MAX, SPACING) else {
            panic!("mint-only history must build");
        };

        let probe = probe_slot * SPACING;
        let expected: f64 = positions
            .iter()
            .filter(|(slot, width, _)| *slot * SPACING <= probe && probe < (slot + width) * SPACING)
            .map(|(_, _, liquidity)| *liquidity)
            .sum();
        let actual = dist.liquidity_at(tick(probe)).get();
        prop_assert!(
            (actual - expected).abs() <= 1e-6 * expected.max(1.0),
            "at tick {}: got {}, expected {}", probe, actual, expected
        );
    }
}

// ---------------------------------------------------------------------------
// 2-4. Swap properties on the fixed pool
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn output_positive_and_monotone(
        a in 1.0_f64..3.0e5,
        b in 1.0_f64..3.0e5,
        zero_for_one in any::<bool>(),
    ) {
        let table = fixed_table();
        let (small, large) = if a <= b { (a, b) } else { (b, a) };

        let Ok(small_out) = simulate(&table, zero_for_one, small, fee_3000(), SwapOptions::default()) else {
            panic!("in-budget trade must simulate");
        };
        let Ok(large_out) = simulate(&table, zero_for_one, large, fee_3000(), SwapOptions::default()) else {
            panic!("in-budget trade must simulate");
        };

        prop_assert!(small_out.amount_out > 0.0);
        prop_assert!(large_out.amount_out >= small_out.amount_out * (1.0 - 1e-9));
    }

    #[test]
    fn vectorized_matches_range_walk(
        amount in 1.0_f64..3.0e5,
        zero_for_one in any::<bool>(),
    ) {
        // Fee-free so both formulations see the same net input.
        let table = fixed_table();
        let Ok(outcome) = simulate(&table, zero_for_one, amount, fee_zero(), SwapOptions::default()) else {
            panic!("in-budget trade must simulate");
        };
        let Some((walked_out, walked_price)) = walk_ranges(&table, zero_for_one, amount) else {
            panic!("reference walk must stay in budget");
        };

        prop_assert!(
            (outcome.amount_out - walked_out).abs() <= 1e-6 * walked_out.max(1.0),
            "vectorized {} vs walked {}", outcome.amount_out, walked_out
        );
        prop_assert!(
            (outcome.sqrt_price_after.get() - walked_price).abs() <= 1e-9,
            "vectorized price {} vs walked {}", outcome.sqrt_price_after.get(), walked_price
        );
    }

    #[test]
    fn simulation_is_idempotent(
        amount in 1.0_f64..3.0e5,
        zero_for_one in any::<bool>(),
    ) {
        let table = fixed_table();
        let first = simulate(&table, zero_for_one, amount, fee_3000(), SwapOptions::default());
        let second = simulate(&table, zero_for_one, amount, fee_3000(), SwapOptions::default());
        prop_assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// 5. Tick math round trips
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn tick_price_round_trip(raw in -880_000_i32..880_000) {
        let real = sqrt_price_to_tick({
            let Ok(p) = SqrtPrice::new(sqrt_price_at_tick(tick(raw))) else {
                panic!("valid price");
            };
            p
        });
        prop_assert!((real - f64::from(raw)).abs() < 1e-2);
    }

    #[test]
    fn tick_floor_lands_on_grid_below(raw in -880_000.0_f64..880_000.0, spacing in 1_i32..200) {
        let Ok(floored) = tick_floor(raw, spacing) else {
            panic!("in-range tick must floor");
        };
        prop_assert!(floored.is_aligned_to(spacing));
        prop_assert!(f64::from(floored.get()) <= raw);
        prop_assert!(raw - f64::from(floored.get()) < f64::from(2 * spacing));
    }
}
