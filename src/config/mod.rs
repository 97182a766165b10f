//! Pool configuration.
//!
//! [`PoolConfig`] is the validated, declarative blueprint a
//! [`PoolState`](crate::pool::PoolState) is built from. With the `serde`
//! feature it can be loaded from the same JSON fixtures a parity harness
//! replays against the production contract.

mod pool;

pub use pool::{InitialBalances, PoolConfig};
