//! Window-bounded caching of the liquidity distribution.
//!
//! Mint/burn events are rare next to swaps, so the liquidity shape is
//! constant over long cursor stretches. The cache remembers the shape
//! together with the mint/burn-free window it is valid for; queries
//! inside the window reuse the shared distribution and only re-derive
//! the price. The current price is deliberately not part of the
//! window, it moves with every swap.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::distribution::LiquidityDistribution;
use crate::domain::Cursor;

/// A liquidity shape plus the cursor window it is valid for.
///
/// Valid for queries `c` with `lower_bound < c <= upper_bound`:
/// `lower_bound` is the cursor of the mint/burn the shape was last
/// changed by, `upper_bound` the cursor of the next one (an event at
/// the upper bound is itself not yet visible to a query at that
/// cursor). Bounds fall back to [`Cursor::ORIGIN`] / [`Cursor::MAX`]
/// when no structural event exists on that side.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationWindow {
    lower_bound: Cursor,
    upper_bound: Cursor,
    built_at: Cursor,
    distribution: Arc<LiquidityDistribution>,
}

impl SimulationWindow {
    #[must_use]
    pub fn new(
        lower_bound: Cursor,
        upper_bound: Cursor,
        built_at: Cursor,
        distribution: LiquidityDistribution,
    ) -> Self {
        Self {
            lower_bound,
            upper_bound,
            built_at,
            distribution: Arc::new(distribution),
        }
    }

    #[must_use]
    pub fn contains(&self, cursor: Cursor) -> bool {
        self.lower_bound < cursor && cursor <= self.upper_bound
    }

    #[must_use]
    pub const fn lower_bound(&self) -> Cursor {
        self.lower_bound
    }

    #[must_use]
    pub const fn upper_bound(&self) -> Cursor {
        self.upper_bound
    }

    #[must_use]
    pub const fn built_at(&self) -> Cursor {
        self.built_at
    }

    #[must_use]
    pub fn distribution(&self) -> &Arc<LiquidityDistribution> {
        &self.distribution
    }
}

/// Cache lifecycle: nothing cached yet, or one published window.
#[derive(Debug)]
enum WindowState {
    Uninitialized,
    Valid(Arc<SimulationWindow>),
}

/// Per-pool cache holding the most recently published window.
///
/// Readers take the shared `Arc` under a read lock; a rebuild
/// constructs the new window off to the side and replaces the state
/// with one store under the write lock, so concurrent simulations
/// never observe a half-built distribution.
#[derive(Debug)]
pub struct StateCache {
    state: RwLock<WindowState>,
}

impl StateCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(WindowState::Uninitialized),
        }
    }

    /// Returns the cached window if it covers `cursor`.
    #[must_use]
    pub fn lookup(&self, cursor: Cursor) -> Option<Arc<SimulationWindow>> {
        match &*self.state.read() {
            WindowState::Valid(window) if window.contains(cursor) => Some(Arc::clone(window)),
            _ => None,
        }
    }

    /// Publishes a freshly built window and returns the shared handle.
    pub fn publish(&self, window: SimulationWindow) -> Arc<SimulationWindow> {
        let window = Arc::new(window);
        *self.state.write() = WindowState::Valid(Arc::clone(&window));
        window
    }

    /// Cache-or-rebuild: the hot path of every query.
    ///
    /// # Errors
    ///
    /// Propagates whatever the rebuild closure fails with; the
    /// previously published window stays in place on failure.
    pub fn window_at<F>(
        &self,
        cursor: Cursor,
        force_rebuild: bool,
        rebuild: F,
    ) -> crate::error::Result<Arc<SimulationWindow>>
    where
        F: FnOnce() -> crate::error::Result<SimulationWindow>,
    {
        if !force_rebuild {
            if let Some(window) = self.lookup(cursor) {
                debug!(cursor = %cursor, upper = %window.upper_bound(), "window cache hit");
                return Ok(window);
            }
        }
        debug!(cursor = %cursor, force_rebuild, "window cache miss, rebuilding");
        let window = rebuild()?;
        Ok(self.publish(window))
    }
}

impl Default for StateCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds the mint/burn-free window around `cursor` by scanning at most
/// `scan_limit` records on each side of the merged event streams.
///
/// `liquidity` and `swaps` are the cursor columns of the two event
/// streams, each ascending. The scan walks the merged order away from
/// `cursor` and stops at the first mint/burn cursor, which becomes the
/// bound. If the limit is exhausted first, the bound is the furthest
/// scanned record: the window then covers only the stretch verified to
/// be mint/burn-free, never more.
#[must_use]
pub(crate) fn window_bounds(
    liquidity: &[Cursor],
    swaps: &[Cursor],
    cursor: Cursor,
    scan_limit: usize,
) -> (Cursor, Cursor) {
    // -- downward -----------------------------------------------------------
    let mut li = liquidity.partition_point(|c| *c < cursor);
    let mut si = swaps.partition_point(|c| *c < cursor);
    let mut lower = Cursor::ORIGIN;
    let mut scanned = 0_usize;
    while scanned < scan_limit {
        let next_liq = li.checked_sub(1).and_then(|i| liquidity.get(i));
        let next_swap = si.checked_sub(1).and_then(|i| swaps.get(i));
        match (next_liq, next_swap) {
            // Ties resolve to the structural stream.
            (Some(&l), Some(&s)) if l >= s => {
                lower = l;
                break;
            }
            (Some(&l), None) => {
                lower = l;
                break;
            }
            (_, Some(&s)) => {
                si -= 1;
                scanned += 1;
                if scanned == scan_limit {
                    lower = s;
                }
            }
            (None, None) => break,
        }
    }

    // -- upward -------------------------------------------------------------
    let mut li = liquidity.partition_point(|c| *c < cursor);
    let mut si = swaps.partition_point(|c| *c < cursor);
    let mut upper = Cursor::MAX;
    let mut scanned = 0_usize;
    while scanned < scan_limit {
        let next_liq = liquidity.get(li);
        let next_swap = swaps.get(si);
        match (next_liq, next_swap) {
            (Some(&l), Some(&s)) if l <= s => {
                upper = l;
                break;
            }
            (Some(&l), None) => {
                upper = l;
                break;
            }
            (_, Some(&s)) => {
                si += 1;
                scanned += 1;
                if scanned == scan_limit {
                    upper = s;
                }
            }
            (None, None) => break,
        }
    }

    (lower, upper)
}
