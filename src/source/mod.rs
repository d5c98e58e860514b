//! Collaborator seams: where event data enters the engine.
//!
//! The engine never fetches anything itself. An ingestion layer hands
//! in pre-filtered, cursor-ordered event collections through
//! [`EventSource`] and resolves pool parameters through
//! [`PoolDiscovery`]. The in-memory implementations here back the test
//! suite and any caller that already holds the data.

pub mod memory;

use alloy_primitives::Address;

use crate::domain::{LiquidityEvent, PoolImmutables, SwapEvent};

pub use memory::{MemoryEventSource, MemoryPoolDirectory};

/// Supplies one pool's event history.
///
/// Both collections must be filtered to the pool and ordered ascending
/// by cursor; the simulator validates the ordering once at
/// construction and trusts it afterwards.
pub trait EventSource {
    /// All mint/burn events of the pool.
    ///
    /// # Errors
    ///
    /// Implementation-defined; the in-memory source fails with
    /// [`ReplayError::PoolNotFound`](crate::error::ReplayError::PoolNotFound)
    /// for an unknown pool.
    fn mint_burn_events(&self, pool: Address) -> crate::error::Result<Vec<LiquidityEvent>>;

    /// All swap events of the pool.
    ///
    /// # Errors
    ///
    /// Same contract as [`mint_burn_events`](Self::mint_burn_events).
    fn swap_events(&self, pool: Address) -> crate::error::Result<Vec<SwapEvent>>;
}

/// Resolves a pool address to its immutable parameters.
pub trait PoolDiscovery {
    /// Looks the pool up in the factory records of `chain`.
    ///
    /// # Errors
    ///
    /// [`ReplayError::PoolNotFound`](crate::error::ReplayError::PoolNotFound)
    /// on zero matches,
    /// [`ReplayError::PoolAmbiguous`](crate::error::ReplayError::PoolAmbiguous)
    /// on more than one.
    fn lookup(&self, pool: Address, chain: &str) -> crate::error::Result<PoolImmutables>;
}
