//! Event-log records the replay engine consumes.
//!
//! Records arrive pre-decoded from whatever ingestion layer sits in
//! front of this crate; here they only need to be well-formed and
//! cursor-ordered.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::domain::cursor::Cursor;
use crate::domain::tick::Tick;
use crate::error::ReplayError;

/// Whether a liquidity event added to or removed from a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Mint,
    Burn,
}

/// A mint or burn over a tick range.
///
/// `liquidity` is the unsigned magnitude as decoded from the event
/// payload; the sign comes from [`EventKind`] via
/// [`signed_liquidity`](Self::signed_liquidity).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidityEvent {
    pub cursor: Cursor,
    pub kind: EventKind,
    pub tick_lower: Tick,
    pub tick_upper: Tick,
    pub liquidity: f64,
}

impl LiquidityEvent {
    /// Creates a validated liquidity event.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::InvalidTick`] if `tick_lower` is not
    /// strictly below `tick_upper`, or [`ReplayError::InvalidAmount`]
    /// if the magnitude is negative or non-finite.
    pub fn new(
        cursor: Cursor,
        kind: EventKind,
        tick_lower: Tick,
        tick_upper: Tick,
        liquidity: f64,
    ) -> crate::error::Result<Self> {
        if tick_lower >= tick_upper {
            return Err(ReplayError::InvalidTick(
                "tick_lower must be strictly below tick_upper",
            ));
        }
        if !liquidity.is_finite() || liquidity < 0.0 {
            return Err(ReplayError::InvalidAmount(
                "liquidity magnitude must be finite and non-negative",
            ));
        }
        Ok(Self {
            cursor,
            kind,
            tick_lower,
            tick_upper,
            liquidity,
        })
    }

    /// The liquidity delta with the event's sign applied.
    #[must_use]
    pub fn signed_liquidity(&self) -> f64 {
        match self.kind {
            EventKind::Mint => self.liquidity,
            EventKind::Burn => -self.liquidity,
        }
    }
}

/// A swap record; carries the post-swap pool price.
///
/// The raw `sqrtPriceX96` exceeds `u128` for high ticks, so it is kept
/// as a [`U256`] until a computation actually needs a float.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwapEvent {
    pub cursor: Cursor,
    pub pool: Address,
    pub tick: Tick,
    pub sqrt_price_x96: U256,
}

impl SwapEvent {
    #[must_use]
    pub const fn new(cursor: Cursor, pool: Address, tick: Tick, sqrt_price_x96: U256) -> Self {
        Self {
            cursor,
            pool,
            tick,
            sqrt_price_x96,
        }
    }
}
