//! Simulator tuning knobs.

use serde::{Deserialize, Serialize};

use crate::error::ReplayError;

/// Configuration of a [`PoolSimulator`](crate::pool::PoolSimulator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// How many event records the cache may scan on each side of a
    /// query cursor while locating the mint/burn-free window. A
    /// smaller limit trades cache hit rate for bounded rebuild cost.
    pub window_scan_limit: usize,
}

impl SimulatorConfig {
    /// Replaces the window scan limit.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::InvalidAmount`] for a zero limit, which
    /// would leave the cache unable to verify any window at all.
    pub fn with_window_scan_limit(mut self, limit: usize) -> crate::error::Result<Self> {
        if limit == 0 {
            return Err(ReplayError::InvalidAmount(
                "window scan limit must be at least 1",
            ));
        }
        self.window_scan_limit = limit;
        Ok(self)
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            window_scan_limit: 1000,
        }
    }
}
