//! Core domain types shared across the crate.

pub mod cursor;
pub mod events;
pub mod fee;
pub mod immutables;
pub mod liquidity;
pub mod sqrt_price;
pub mod swap_outcome;
pub mod tick;

pub use cursor::Cursor;
pub use events::{EventKind, LiquidityEvent, SwapEvent};
pub use fee::FeePpm;
pub use immutables::PoolImmutables;
pub use liquidity::Liquidity;
pub use sqrt_price::SqrtPrice;
pub use swap_outcome::{FeeShare, SwapOptions, SwapOutcome};
pub use tick::Tick;
