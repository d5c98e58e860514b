//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use clmm_replay::prelude::*;
//! ```

pub use crate::config::SimulatorConfig;
pub use crate::distribution::{LiquidityDistribution, TickSegment};
pub use crate::domain::{
    Cursor, EventKind, FeePpm, FeeShare, Liquidity, LiquidityEvent, PoolImmutables, SqrtPrice,
    SwapEvent, SwapOptions, SwapOutcome, Tick,
};
pub use crate::error::{ReplayError, Result};
pub use crate::pool::PoolSimulator;
pub use crate::source::{EventSource, MemoryEventSource, MemoryPoolDirectory, PoolDiscovery};
