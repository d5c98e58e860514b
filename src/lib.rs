//! # CLMM Replay
//!
//! Point-in-time state reconstruction and swap simulation for
//! Uniswap v3-style concentrated liquidity pools, driven entirely by
//! the pool's append-only event log.
//!
//! Given the mint/burn and swap history of one pool, the engine can
//! answer, for any cursor into the log:
//!
//! - what the liquidity curve looked like ([`distribution`]),
//! - what the price and tick were ([`pool`]),
//! - what an exact-input swap would have returned ([`swap`]),
//!   including per-tick fee attribution and the largest absorbable
//!   input.
//!
//! Instead of replaying the on-chain tick-by-tick swap loop, a swap is
//! resolved in one pass over precomputed per-range capacities; see
//! [`swap::table`]. Consecutive queries between two mint/burn events
//! share one cached liquidity shape ([`cache`]).
//!
//! # Precision
//!
//! Internals run on `f64`: this is an analytics engine, not a
//! settlement engine, and does not reproduce the contract's integer
//! truncation bit-for-bit. Prices cross the API boundary as raw
//! `sqrtPriceX96` big integers and are only narrowed inside the math.
//!
//! # Quick Start
//!
//! ```rust
//! use alloy_primitives::{Address, U256};
//! use clmm_replay::config::SimulatorConfig;
//! use clmm_replay::domain::{
//!     Cursor, EventKind, FeePpm, LiquidityEvent, PoolImmutables, SwapEvent, SwapOptions, Tick,
//! };
//! use clmm_replay::pool::PoolSimulator;
//! use clmm_replay::source::MemoryEventSource;
//!
//! let pool = Address::repeat_byte(1);
//! let token0 = Address::repeat_byte(2);
//! let token1 = Address::repeat_byte(3);
//!
//! let immutables = PoolImmutables::new(pool, token0, token1, 60, FeePpm::STANDARD)
//!     .expect("valid parameters");
//!
//! // One position, one swap pinning the price at 1.0 (tick 0).
//! let mint = LiquidityEvent::new(
//!     Cursor::new(1, 0),
//!     EventKind::Mint,
//!     Tick::new(-600).expect("valid tick"),
//!     Tick::new(600).expect("valid tick"),
//!     1_000_000.0,
//! )
//! .expect("valid event");
//! let swap = SwapEvent::new(Cursor::new(2, 0), pool, Tick::ZERO, U256::from(1u8) << 96);
//!
//! let source = MemoryEventSource::new().with_pool(pool, vec![mint], vec![swap]);
//! let simulator = PoolSimulator::new(immutables, source, SimulatorConfig::default())
//!     .expect("history loads");
//!
//! let outcome = simulator
//!     .simulate_swap(Cursor::new(3, 0), token0, 1_000.0, SwapOptions::default())
//!     .expect("swap simulates");
//! assert!(outcome.amount_out > 0.0);
//! ```

pub mod cache;
pub mod config;
pub mod distribution;
pub mod domain;
pub mod error;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod source;
pub mod swap;

#[cfg(test)]
mod proptest_properties;

pub use error::{ReplayError, Result};
