//! Static pool parameters.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::domain::fee::FeePpm;
use crate::error::ReplayError;

/// Parameters fixed at pool deployment.
///
/// Looked up once per pool through
/// [`PoolDiscovery`](crate::source::PoolDiscovery) and never mutated
/// by replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolImmutables {
    pub pool: Address,
    pub token0: Address,
    pub token1: Address,
    pub tick_spacing: i32,
    pub fee: FeePpm,
}

impl PoolImmutables {
    /// Creates validated pool parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::InvalidTick`] for a non-positive tick
    /// spacing, or [`ReplayError::InvalidAmount`] if `token0` and
    /// `token1` are the same address.
    pub fn new(
        pool: Address,
        token0: Address,
        token1: Address,
        tick_spacing: i32,
        fee: FeePpm,
    ) -> crate::error::Result<Self> {
        if tick_spacing <= 0 {
            return Err(ReplayError::InvalidTick("tick spacing must be positive"));
        }
        if token0 == token1 {
            return Err(ReplayError::InvalidAmount("token0 and token1 must differ"));
        }
        Ok(Self {
            pool,
            token0,
            token1,
            tick_spacing,
            fee,
        })
    }

    /// Maps an input token address to the swap direction.
    ///
    /// `token0` in means price moves down (`zero_for_one`), `token1`
    /// in means price moves up.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::UnsupportedToken`] for any other
    /// address.
    pub fn direction_for(&self, token_in: Address) -> crate::error::Result<bool> {
        if token_in == self.token0 {
            Ok(true)
        } else if token_in == self.token1 {
            Ok(false)
        } else {
            Err(ReplayError::UnsupportedToken(token_in))
        }
    }
}
