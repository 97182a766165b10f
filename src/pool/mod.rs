//! The pool model and its commands.
//!
//! [`PoolState`] holds the configuration and balances. Commands are split
//! by concern:
//!
//! | Module | Trait | Commands |
//! |--------|-------|----------|
//! | `exchange` | [`SwapPool`](crate::traits::SwapPool) | `swap`, `swap_checked`, `quote_swap`, `quote_reverse_swap`, `get_dy` |
//! | `liquidity` | [`LiquidityPool`](crate::traits::LiquidityPool) | `add_liquidity`, `add_liquidity_checked`, `remove_liquidity`, `remove_liquidity_imbalance`, `calc_withdraw_one_coin`, `remove_liquidity_one_coin` |

mod exchange;
mod liquidity;
mod state;

#[cfg(test)]
mod proptest_properties;

pub use state::PoolState;
