//! In-memory event source and pool directory.

use std::collections::HashMap;

use alloy_primitives::Address;

use crate::domain::{LiquidityEvent, PoolImmutables, SwapEvent};
use crate::error::ReplayError;
use crate::source::{EventSource, PoolDiscovery};

/// Event histories keyed by pool address, held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventSource {
    mint_burns: HashMap<Address, Vec<LiquidityEvent>>,
    swaps: HashMap<Address, Vec<SwapEvent>>,
}

impl MemoryEventSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pool's full history. Events must already be
    /// cursor-ordered, as with any [`EventSource`].
    #[must_use]
    pub fn with_pool(
        mut self,
        pool: Address,
        mint_burns: Vec<LiquidityEvent>,
        swaps: Vec<SwapEvent>,
    ) -> Self {
        self.mint_burns.insert(pool, mint_burns);
        self.swaps.insert(pool, swaps);
        self
    }
}

impl EventSource for MemoryEventSource {
    fn mint_burn_events(&self, pool: Address) -> crate::error::Result<Vec<LiquidityEvent>> {
        self.mint_burns
            .get(&pool)
            .cloned()
            .ok_or(ReplayError::PoolNotFound)
    }

    fn swap_events(&self, pool: Address) -> crate::error::Result<Vec<SwapEvent>> {
        self.swaps
            .get(&pool)
            .cloned()
            .ok_or(ReplayError::PoolNotFound)
    }
}

/// Factory records held in memory, keyed by (chain, pool).
#[derive(Debug, Clone, Default)]
pub struct MemoryPoolDirectory {
    records: Vec<(String, PoolImmutables)>,
}

impl MemoryPoolDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_record(mut self, chain: &str, immutables: PoolImmutables) -> Self {
        self.records.push((chain.to_owned(), immutables));
        self
    }
}

impl PoolDiscovery for MemoryPoolDirectory {
    fn lookup(&self, pool: Address, chain: &str) -> crate::error::Result<PoolImmutables> {
        let mut matches = self
            .records
            .iter()
            .filter(|(c, imm)| c == chain && imm.pool == pool);

        let Some((_, found)) = matches.next() else {
            return Err(ReplayError::PoolNotFound);
        };
        if matches.next().is_some() {
            return Err(ReplayError::PoolAmbiguous);
        }
        Ok(*found)
    }
}
