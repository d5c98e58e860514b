//! Per-pool replay handle: the crate's main entry point.
//!
//! A [`PoolSimulator`] owns one pool's full event history, loaded
//! eagerly from an [`EventSource`] and validated once. Every query is
//! point-in-time: a [`Cursor`] selects the prefix of the log the
//! answer is derived from, so the same simulator can answer questions
//! about any moment of the pool's life in any order.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use tracing::debug;

use crate::cache::{window_bounds, SimulationWindow, StateCache};
use crate::config::SimulatorConfig;
use crate::distribution::LiquidityDistribution;
use crate::domain::{
    Cursor, LiquidityEvent, PoolImmutables, SqrtPrice, SwapEvent, SwapOptions, SwapOutcome, Tick,
};
use crate::error::ReplayError;
use crate::source::{EventSource, PoolDiscovery};
use crate::swap::{simulate, SwapTable};

/// Point-in-time simulator over one pool's event log.
pub struct PoolSimulator<S> {
    immutables: PoolImmutables,
    config: SimulatorConfig,
    source: S,
    mint_burns: Vec<LiquidityEvent>,
    swaps: Vec<SwapEvent>,
    mint_burn_cursors: Vec<Cursor>,
    swap_cursors: Vec<Cursor>,
    cache: StateCache,
}

impl<S: EventSource> PoolSimulator<S> {
    /// Loads and validates the pool's history from `source`.
    ///
    /// # Errors
    ///
    /// Source errors propagate unchanged;
    /// [`ReplayError::CorruptEventLog`] if either stream is out of
    /// cursor order or a swap record belongs to another pool.
    pub fn new(
        immutables: PoolImmutables,
        source: S,
        config: SimulatorConfig,
    ) -> crate::error::Result<Self> {
        let mut simulator = Self {
            immutables,
            config,
            source,
            mint_burns: Vec::new(),
            swaps: Vec::new(),
            mint_burn_cursors: Vec::new(),
            swap_cursors: Vec::new(),
            cache: StateCache::new(),
        };
        simulator.reload()?;
        Ok(simulator)
    }

    /// Resolves the pool through `discovery`, then loads it.
    ///
    /// # Errors
    ///
    /// Discovery errors (`PoolNotFound`, `PoolAmbiguous`) plus
    /// everything [`new`](Self::new) can fail with.
    pub fn discover<D: PoolDiscovery>(
        pool: Address,
        chain: &str,
        discovery: &D,
        source: S,
        config: SimulatorConfig,
    ) -> crate::error::Result<Self> {
        let immutables = discovery.lookup(pool, chain)?;
        Self::new(immutables, source, config)
    }

    /// Re-fetches the history from the source, for when the ingestion
    /// layer has appended new events. Drops the cached window.
    ///
    /// # Errors
    ///
    /// Same contract as [`new`](Self::new); on failure the simulator
    /// keeps the previously loaded history.
    pub fn reload(&mut self) -> crate::error::Result<()> {
        let mint_burns = self.source.mint_burn_events(self.immutables.pool)?;
        let swaps = self.source.swap_events(self.immutables.pool)?;

        if !mint_burns.windows(2).all(|w| w[0].cursor <= w[1].cursor) {
            return Err(ReplayError::CorruptEventLog(
                "mint/burn events out of cursor order",
            ));
        }
        if !swaps.windows(2).all(|w| w[0].cursor <= w[1].cursor) {
            return Err(ReplayError::CorruptEventLog(
                "swap events out of cursor order",
            ));
        }
        if swaps.iter().any(|s| s.pool != self.immutables.pool) {
            return Err(ReplayError::CorruptEventLog(
                "swap event from another pool",
            ));
        }

        debug!(
            pool = %self.immutables.pool,
            mint_burns = mint_burns.len(),
            swaps = swaps.len(),
            "loaded pool history"
        );

        self.mint_burn_cursors = mint_burns.iter().map(|e| e.cursor).collect();
        self.swap_cursors = swaps.iter().map(|e| e.cursor).collect();
        self.mint_burns = mint_burns;
        self.swaps = swaps;
        self.cache = StateCache::new();
        Ok(())
    }

    #[must_use]
    pub const fn immutables(&self) -> &PoolImmutables {
        &self.immutables
    }

    /// The pool's `sqrtPriceX96` as of `cursor`, exactly as recorded
    /// by the last preceding swap. Arbitrary precision survives to the
    /// caller; only the simulation internals work in floats.
    ///
    /// # Errors
    ///
    /// [`ReplayError::PoolUninitialized`] if no swap precedes
    /// `cursor`.
    pub fn price_at(&self, cursor: Cursor) -> crate::error::Result<U256> {
        Ok(self.last_swap_before(cursor)?.sqrt_price_x96)
    }

    /// The pool's tick as of `cursor`.
    ///
    /// # Errors
    ///
    /// [`ReplayError::PoolUninitialized`] if no swap precedes
    /// `cursor`.
    pub fn tick_at(&self, cursor: Cursor) -> crate::error::Result<Tick> {
        Ok(self.last_swap_before(cursor)?.tick)
    }

    /// The liquidity curve as of `cursor`, served from the window
    /// cache when possible.
    ///
    /// # Errors
    ///
    /// Distribution build errors, most notably
    /// [`ReplayError::EmptyDistribution`] before the first mint.
    pub fn liquidity_distribution(
        &self,
        cursor: Cursor,
    ) -> crate::error::Result<Arc<LiquidityDistribution>> {
        Ok(Arc::clone(self.window(cursor, false)?.distribution()))
    }

    /// Simulates an exact-input swap of `amount_in` of `token_in`
    /// against the pool state as of `cursor`.
    ///
    /// # Errors
    ///
    /// The full taxonomy: direction errors (`UnsupportedToken`),
    /// history errors (`PoolUninitialized`), state errors
    /// (`EmptyDistribution`, `MissingOrDuplicateTickSegment`) and
    /// trade outcomes (`ZeroAmountSwap`, `InsufficientLiquidity`,
    /// `PriceOutOfRange`).
    pub fn simulate_swap(
        &self,
        cursor: Cursor,
        token_in: Address,
        amount_in: f64,
        options: SwapOptions,
    ) -> crate::error::Result<SwapOutcome> {
        let zero_for_one = self.immutables.direction_for(token_in)?;
        let sqrt_price = SqrtPrice::from_x96(self.price_at(cursor)?)?;
        let window = self.window(cursor, options.force_rebuild)?;
        let table = SwapTable::build(window.distribution(), sqrt_price)?;
        simulate(&table, zero_for_one, amount_in, self.immutables.fee, options)
    }

    fn last_swap_before(&self, cursor: Cursor) -> crate::error::Result<&SwapEvent> {
        let visible = self.swap_cursors.partition_point(|c| *c < cursor);
        visible
            .checked_sub(1)
            .and_then(|i| self.swaps.get(i))
            .ok_or(ReplayError::PoolUninitialized)
    }

    fn window(
        &self,
        cursor: Cursor,
        force_rebuild: bool,
    ) -> crate::error::Result<Arc<SimulationWindow>> {
        self.cache.window_at(cursor, force_rebuild, || {
            let (lower, upper) = window_bounds(
                &self.mint_burn_cursors,
                &self.swap_cursors,
                cursor,
                self.config.window_scan_limit,
            );
            let distribution = LiquidityDistribution::build(
                &self.mint_burns,
                cursor,
                self.immutables.tick_spacing,
            )?;
            Ok(SimulationWindow::new(lower, upper, cursor, distribution))
        })
    }
}
