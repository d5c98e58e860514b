//! Price and tick math for the concentrated liquidity model.

pub mod swap_step;
pub mod tick_math;

pub use swap_step::{
    amount0_delta, amount1_delta, next_sqrt_price_given_amount0, next_sqrt_price_given_amount1,
};
pub use tick_math::{max_aligned_tick, sqrt_price_at_tick, sqrt_price_to_tick, tick_floor};
