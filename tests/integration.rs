//! Integration tests exercising the full system through the public
//! API: discovery, history loading, point-in-time queries, swap
//! simulation with fee attribution, and window-cache behavior over a
//! pool whose liquidity changes mid-history.

#![allow(clippy::panic)]

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use clmm_replay::prelude::*;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn addr(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

const POOL: u8 = 0x11;
const TOKEN0: u8 = 0xa0;
const TOKEN1: u8 = 0xa1;

fn immutables() -> PoolImmutables {
    let Ok(imm) = PoolImmutables::new(
        addr(POOL),
        addr(TOKEN0),
        addr(TOKEN1),
        60,
        FeePpm::STANDARD,
    ) else {
        panic!("valid immutables");
    };
    imm
}

fn tick(value: i32) -> Tick {
    let Ok(t) = Tick::new(value) else {
        panic!("valid tick");
    };
    t
}

fn liquidity_event(
    block: u64,
    kind: EventKind,
    lower: i32,
    upper: i32,
    amount: f64,
) -> LiquidityEvent {
    let Ok(ev) = LiquidityEvent::new(Cursor::new(block, 0), kind, tick(lower), tick(upper), amount)
    else {
        panic!("valid event");
    };
    ev
}

fn swap_event(block: u64, tick_value: i32, sqrt_price_x96: U256) -> SwapEvent {
    SwapEvent::new(
        Cursor::new(block, 0),
        addr(POOL),
        tick(tick_value),
        sqrt_price_x96,
    )
}

fn unit_x96() -> U256 {
    U256::from(1u8) << 96
}

/// History used across the tests:
/// - block 1: mint 1e6 over [-600, 600)
/// - block 2: swap pinning price 1.0 (tick 0)
/// - block 10: mint 2e6 over [-1200, -600)
/// - block 12: swap pinning price 1.0 again
/// - block 20: burn the first position entirely
fn simulator() -> PoolSimulator<MemoryEventSource> {
    let mint_burns = vec![
        liquidity_event(1, EventKind::Mint, -600, 600, 1_000_000.0),
        liquidity_event(10, EventKind::Mint, -1200, -600, 2_000_000.0),
        liquidity_event(20, EventKind::Burn, -600, 600, 1_000_000.0),
    ];
    let swaps = vec![swap_event(2, 0, unit_x96()), swap_event(12, 0, unit_x96())];
    let source = MemoryEventSource::new().with_pool(addr(POOL), mint_burns, swaps);

    let Ok(sim) = PoolSimulator::new(immutables(), source, SimulatorConfig::default()) else {
        panic!("history loads");
    };
    sim
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

#[test]
fn discovery_resolves_then_loads() {
    let directory = MemoryPoolDirectory::new().with_record("ethereum", immutables());
    let source = MemoryEventSource::new().with_pool(
        addr(POOL),
        vec![liquidity_event(1, EventKind::Mint, -600, 600, 1_000_000.0)],
        vec![swap_event(2, 0, unit_x96())],
    );

    let Ok(sim) = PoolSimulator::discover(
        addr(POOL),
        "ethereum",
        &directory,
        source,
        SimulatorConfig::default(),
    ) else {
        panic!("discovery succeeds");
    };
    assert_eq!(sim.immutables().fee, FeePpm::STANDARD);
}

#[test]
fn discovery_failures_are_typed() {
    let directory = MemoryPoolDirectory::new()
        .with_record("ethereum", immutables())
        .with_record("ethereum", immutables());
    let source = MemoryEventSource::new();

    assert_eq!(
        PoolSimulator::discover(
            addr(POOL),
            "ethereum",
            &directory,
            source.clone(),
            SimulatorConfig::default(),
        )
        .err(),
        Some(ReplayError::PoolAmbiguous)
    );
    assert_eq!(
        PoolSimulator::discover(
            addr(0x77),
            "ethereum",
            &directory,
            source,
            SimulatorConfig::default(),
        )
        .err(),
        Some(ReplayError::PoolNotFound)
    );
}

// ---------------------------------------------------------------------------
// Point-in-time queries
// ---------------------------------------------------------------------------

#[test]
fn state_is_a_function_of_the_cursor() {
    let sim = simulator();

    // Before the first swap the pool has no price.
    assert_eq!(
        sim.price_at(Cursor::new(2, 0)),
        Err(ReplayError::PoolUninitialized)
    );
    // After it, the recorded X96 value comes back untouched.
    assert_eq!(sim.price_at(Cursor::new(5, 0)), Ok(unit_x96()));
    assert_eq!(sim.tick_at(Cursor::new(5, 0)), Ok(tick(0)));

    // Distribution narrows after the burn at block 20.
    let Ok(mid) = sim.liquidity_distribution(Cursor::new(15, 0)) else {
        panic!("distribution at block 15");
    };
    assert!((mid.liquidity_at(tick(0)).get() - 1_000_000.0).abs() < 1e-9);
    assert!((mid.liquidity_at(tick(-900)).get() - 2_000_000.0).abs() < 1e-9);

    let Ok(late) = sim.liquidity_distribution(Cursor::new(21, 0)) else {
        panic!("distribution at block 21");
    };
    assert!(late.liquidity_at(tick(0)).is_zero());
    assert!((late.liquidity_at(tick(-900)).get() - 2_000_000.0).abs() < 1e-9);
}

#[test]
fn queries_before_any_mint_are_empty() {
    let sim = simulator();
    assert_eq!(
        sim.liquidity_distribution(Cursor::new(1, 0)).err(),
        Some(ReplayError::EmptyDistribution)
    );
}

// ---------------------------------------------------------------------------
// Swap scenarios
// ---------------------------------------------------------------------------

#[test]
fn single_range_hand_computed_value() {
    // L = 1e6 at price 1.0, 0.3% fee, 1000 token0 in:
    // out = L * (1 - L / (L + 997)) = 1e6 * 997 / 1_000_997.
    let sim = simulator();
    let Ok(outcome) = sim.simulate_swap(
        Cursor::new(5, 0),
        addr(TOKEN0),
        1_000.0,
        SwapOptions::default(),
    ) else {
        panic!("swap simulates");
    };

    let expected = 1_000_000.0 * (997.0 / 1_000_997.0);
    let relative = (outcome.amount_out - expected).abs() / expected;
    assert!(relative < 1e-6, "relative error {relative}");
    assert!((outcome.fee_total - 3.0).abs() < 1e-12);
}

#[test]
fn oversize_trade_fails_typed() {
    let sim = simulator();
    assert_eq!(
        sim.simulate_swap(
            Cursor::new(5, 0),
            addr(TOKEN0),
            1.0e12,
            SwapOptions::default(),
        ),
        Err(ReplayError::InsufficientLiquidity)
    );
}

#[test]
fn multi_range_swap_with_fee_attribution() {
    let sim = simulator();
    // At block 15 both positions are live; 50_000 token0 crosses from
    // the [-600, 600) range into [-1200, -600).
    let Ok(outcome) = sim.simulate_swap(
        Cursor::new(15, 0),
        addr(TOKEN0),
        50_000.0,
        SwapOptions::default().with_fee_attribution(),
    ) else {
        panic!("swap simulates");
    };

    let Some(fees) = outcome.fee_by_tick else {
        panic!("fee attribution requested");
    };
    assert_eq!(fees.keys().copied().collect::<Vec<_>>(), vec![-1200, -600]);

    // Each range's weight is its own liquidity, and the per-range
    // fees add up to the trade's input-side total.
    let Some(near) = fees.get(&-600) else {
        panic!("in-range share");
    };
    let Some(far) = fees.get(&-1200) else {
        panic!("boundary share");
    };
    assert!((near.liquidity - 1_000_000.0).abs() < 1e-9);
    assert!((far.liquidity - 2_000_000.0).abs() < 1e-9);
    let total: f64 = fees.values().map(|s| s.fee_paid).sum();
    assert!((total - outcome.fee_total).abs() < 1e-9);
    assert!((outcome.fee_total - 150.0).abs() < 1e-12);
}

#[test]
fn trade_sized_to_the_boundary_lands_on_it() {
    let sim = simulator();
    let cursor = Cursor::new(15, 0);

    // The full-budget trade drains both ranges, so a trade one hair
    // under it lands on the far range's lower boundary.
    let Ok(sized) = sim.simulate_swap(
        cursor,
        addr(TOKEN0),
        1_000.0,
        SwapOptions::default().with_compute_max(),
    ) else {
        panic!("budget query simulates");
    };
    let Some(budget) = sized.max_input else {
        panic!("max input requested");
    };

    let Ok(outcome) = sim.simulate_swap(
        cursor,
        addr(TOKEN0),
        budget * (1.0 - 1e-12),
        SwapOptions::default().with_fee_attribution(),
    ) else {
        panic!("full-budget swap simulates");
    };
    let boundary = clmm_replay::math::sqrt_price_at_tick(tick(-1200));
    assert!((outcome.sqrt_price_after.get() - boundary).abs() < 1e-6);

    let Some(fees) = outcome.fee_by_tick else {
        panic!("fee attribution requested");
    };
    assert_eq!(fees.keys().copied().collect::<Vec<_>>(), vec![-1200, -600]);
}

#[test]
fn max_input_is_the_trade_budget() {
    let sim = simulator();
    let Ok(outcome) = sim.simulate_swap(
        Cursor::new(15, 0),
        addr(TOKEN0),
        1_000.0,
        SwapOptions::default().with_compute_max(),
    ) else {
        panic!("swap simulates");
    };
    let Some(max_input) = outcome.max_input else {
        panic!("max input requested");
    };

    assert!(sim
        .simulate_swap(
            Cursor::new(15, 0),
            addr(TOKEN0),
            max_input * 0.999,
            SwapOptions::default(),
        )
        .is_ok());
    assert_eq!(
        sim.simulate_swap(
            Cursor::new(15, 0),
            addr(TOKEN0),
            max_input * 1.001,
            SwapOptions::default(),
        ),
        Err(ReplayError::InsufficientLiquidity)
    );
}

#[test]
fn both_tokens_swap_in_their_direction() {
    let sim = simulator();
    let Ok(down) = sim.simulate_swap(
        Cursor::new(5, 0),
        addr(TOKEN0),
        1_000.0,
        SwapOptions::default(),
    ) else {
        panic!("token0 swap");
    };
    let Ok(up) = sim.simulate_swap(
        Cursor::new(5, 0),
        addr(TOKEN1),
        1_000.0,
        SwapOptions::default(),
    ) else {
        panic!("token1 swap");
    };
    assert!(down.sqrt_price_after < down.sqrt_price_before);
    assert!(up.sqrt_price_after > up.sqrt_price_before);
}

// ---------------------------------------------------------------------------
// Cache behavior across the history
// ---------------------------------------------------------------------------

#[test]
fn swap_only_stretches_share_one_distribution() {
    let sim = simulator();
    // Blocks 11..=19 sit between the mint at 10 and the burn at 20.
    let (Ok(a), Ok(b)) = (
        sim.liquidity_distribution(Cursor::new(11, 0)),
        sim.liquidity_distribution(Cursor::new(19, 0)),
    ) else {
        panic!("distributions resolve");
    };
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn cache_rotates_at_structural_events() {
    let sim = simulator();
    let (Ok(early), Ok(late)) = (
        sim.liquidity_distribution(Cursor::new(5, 0)),
        sim.liquidity_distribution(Cursor::new(15, 0)),
    ) else {
        panic!("distributions resolve");
    };
    // Different windows, different shapes.
    assert!(!Arc::ptr_eq(&early, &late));
    assert!(early.liquidity_at(tick(-900)).is_zero());
    assert!((late.liquidity_at(tick(-900)).get() - 2_000_000.0).abs() < 1e-9);
}

#[test]
fn window_rotation_is_transparent_to_results() {
    let sim = simulator();
    let cursor = Cursor::new(15, 0);

    // Warm the cache at a different cursor first, forcing a rotation
    // on the query under test.
    let Ok(_) = sim.liquidity_distribution(Cursor::new(5, 0)) else {
        panic!("warm-up resolves");
    };
    let Ok(rotated) = sim.simulate_swap(cursor, addr(TOKEN0), 1_000.0, SwapOptions::default())
    else {
        panic!("rotated swap");
    };
    let Ok(forced) = sim.simulate_swap(
        cursor,
        addr(TOKEN0),
        1_000.0,
        SwapOptions::default().with_force_rebuild(),
    ) else {
        panic!("forced swap");
    };
    assert_eq!(rotated, forced);
}

#[test]
fn tight_scan_limit_still_answers_correctly() {
    let Ok(config) = SimulatorConfig::default().with_window_scan_limit(1) else {
        panic!("valid config");
    };
    let source = MemoryEventSource::new().with_pool(
        addr(POOL),
        vec![liquidity_event(1, EventKind::Mint, -600, 600, 1_000_000.0)],
        vec![swap_event(2, 0, unit_x96())],
    );
    let Ok(sim) = PoolSimulator::new(immutables(), source, config) else {
        panic!("history loads");
    };

    // A narrow scan only shrinks the cacheable window; answers are
    // unchanged.
    let Ok(outcome) = sim.simulate_swap(
        Cursor::new(5, 0),
        addr(TOKEN0),
        1_000.0,
        SwapOptions::default(),
    ) else {
        panic!("swap simulates");
    };
    let expected = 1_000_000.0 * (997.0 / 1_000_997.0);
    assert!((outcome.amount_out - expected).abs() < 1e-6);
}
