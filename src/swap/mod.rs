//! Swap precomputation and simulation.

pub mod simulate;
pub mod table;

pub use simulate::simulate;
pub use table::{InRange, SwapTable, TableRow};
