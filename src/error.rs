//! Unified error types for the replay engine.
//!
//! All fallible operations across the crate return [`ReplayError`] as
//! their error type. Variants split into three families:
//!
//! - **Lookup / state errors**: the pool or its history cannot answer
//!   the query (`PoolNotFound`, `PoolAmbiguous`, `PoolUninitialized`).
//! - **Trade outcomes**: expected, user-facing results of a swap
//!   request (`InsufficientLiquidity`, `ZeroAmountSwap`,
//!   `UnsupportedToken`). These are typed results, not bugs.
//! - **Data-integrity / math-domain errors**: an invariant of the
//!   event log or the price math was violated (`EmptyDistribution`,
//!   `MissingOrDuplicateTickSegment`, `CorruptEventLog`,
//!   `InvalidPrice`, `PriceOutOfRange`). These surface to the caller
//!   immediately and are never swallowed or defaulted.

use alloy_primitives::Address;
use thiserror::Error;

/// Convenience alias used by every fallible operation in the crate.
pub type Result<T> = core::result::Result<T, ReplayError>;

/// Unified error enum for pool replay and swap simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// No pool with the requested address exists in the discovery
    /// records.
    #[error("pool missing from factory records")]
    PoolNotFound,

    /// More than one pool matched the requested address.
    #[error("multiple pools at that address")]
    PoolAmbiguous,

    /// The pool has no swap (price) history strictly before the
    /// queried cursor.
    #[error("pool not initialized before the queried cursor")]
    PoolUninitialized,

    /// Swaps of zero are not supported.
    #[error("swaps of zero amount are not supported")]
    ZeroAmountSwap,

    /// The input token is not one of the pool's two tokens.
    #[error("token {0} is not part of the pool pair")]
    UnsupportedToken(Address),

    /// The trade exceeds all liquidity available in the pool in the
    /// trade direction.
    #[error("not enough liquidity in pool")]
    InsufficientLiquidity,

    /// No tick in the event history ever held positive liquidity.
    #[error("pool has never had in-range liquidity")]
    EmptyDistribution,

    /// The distribution holds zero or more than one segment covering
    /// the current tick. Signals upstream event-data corruption.
    #[error("missing/duplicate in-range tick segment - size of {found}")]
    MissingOrDuplicateTickSegment {
        /// Number of segments that matched the current tick.
        found: usize,
    },

    /// The mint/burn event log violates an ordering or liquidity
    /// invariant.
    #[error("corrupt event log: {0}")]
    CorruptEventLog(&'static str),

    /// A price value is outside the math domain (zero, negative, NaN,
    /// infinite).
    #[error("invalid price: {0}")]
    InvalidPrice(&'static str),

    /// A trade step would push the sqrt-price out of its representable
    /// range (across zero or past the tick bounds).
    #[error("price out of range: {0}")]
    PriceOutOfRange(&'static str),

    /// A tick index is outside `[-887272, 887272]` or misaligned.
    #[error("invalid tick: {0}")]
    InvalidTick(&'static str),

    /// An amount or quantity argument is outside its valid domain.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),
}
