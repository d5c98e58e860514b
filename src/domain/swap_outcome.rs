//! Results and options of a simulated swap.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::sqrt_price::SqrtPrice;

/// Optional behavior toggles for a swap query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwapOptions {
    /// Attribute the total fee across the tick ranges the trade
    /// touched, pro-rata by input consumed in each.
    pub fee_attribution: bool,
    /// Also report the largest input the pool could absorb from the
    /// current price in this direction.
    pub compute_max: bool,
    /// Bypass the cached state window and rebuild from events.
    pub force_rebuild: bool,
}

impl SwapOptions {
    #[must_use]
    pub const fn with_fee_attribution(mut self) -> Self {
        self.fee_attribution = true;
        self
    }

    #[must_use]
    pub const fn with_compute_max(mut self) -> Self {
        self.compute_max = true;
        self
    }

    #[must_use]
    pub const fn with_force_rebuild(mut self) -> Self {
        self.force_rebuild = true;
        self
    }
}

/// Fee earned by one tick range during a swap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeShare {
    /// Fee paid while the price traversed this range, in input-token
    /// units.
    pub fee_paid: f64,
    /// Active liquidity of the range, for per-unit yield downstream.
    pub liquidity: f64,
}

/// The result of a simulated exact-input swap.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapOutcome {
    /// Input amount as requested, fee included.
    pub amount_in: f64,
    /// Output amount the trader would receive.
    pub amount_out: f64,
    /// Total fee charged, in input-token units.
    pub fee_total: f64,
    pub sqrt_price_before: SqrtPrice,
    pub sqrt_price_after: SqrtPrice,
    /// Per-range fee attribution keyed by the range's lower tick.
    /// Present iff [`SwapOptions::fee_attribution`] was set.
    pub fee_by_tick: Option<BTreeMap<i32, FeeShare>>,
    /// Largest absorbable input in this direction. Present iff
    /// [`SwapOptions::compute_max`] was set.
    pub max_input: Option<f64>,
}

impl SwapOutcome {
    /// Realized average price of the trade, output per unit input.
    #[must_use]
    pub fn effective_price(&self) -> f64 {
        if self.amount_in == 0.0 {
            0.0
        } else {
            self.amount_out / self.amount_in
        }
    }
}
