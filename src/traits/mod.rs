//! Trait seams of the pool model.
//!
//! [`SwapPool`] covers exchange, [`LiquidityPool`] adds deposits and
//! withdrawals, and [`FromConfig`] builds state from a validated
//! configuration.

mod from_config;
mod liquidity_pool;
mod swap_pool;

pub use from_config::FromConfig;
pub use liquidity_pool::LiquidityPool;
pub use swap_pool::SwapPool;
