//! # StableSwap Model
//!
//! Deterministic, integer-only model of a StableSwap (Curve-style)
//! multi-asset pool, for bit-exact parity testing against a production
//! contract.
//!
//! Every quantity is an unsigned integer, every intermediate is evaluated
//! in 256-bit arithmetic, and every division truncates toward zero in the
//! same order the contract evaluates it. Given the same pool and inputs
//! this crate reproduces the contract's results to the last unit.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` for configuration and domain values |
//!
//! # Quick Start
//!
//! ```rust
//! use stableswap_model::config::{InitialBalances, PoolConfig};
//! use stableswap_model::domain::{Amplification, FeeRate, BASE};
//! use stableswap_model::pool::PoolState;
//! use stableswap_model::traits::{FromConfig, LiquidityPool, SwapPool};
//!
//! // 1. Describe a two-asset pool holding one unit of each asset
//! let config = PoolConfig::new(
//!     2,
//!     Amplification::new(200).expect("valid amplification"),
//!     FeeRate::new(4),      // 0.04%
//!     FeeRate::new(5_000),  // half of fees to admin
//!     InitialBalances::Explicit(vec![BASE, BASE]),
//! )
//! .expect("valid config")
//! .with_token_supply(2 * BASE);
//!
//! // 2. Build the pool
//! let mut pool = PoolState::from_config(&config).expect("valid pool");
//!
//! // 3. Swap 0.1 of asset 0 for asset 1
//! let out = pool.swap(0, 1, BASE / 10).expect("swap succeeded");
//! assert_eq!(out, 99_909_796_859_367_415);
//!
//! // 4. Burn half the LP supply
//! let withdrawn = pool.remove_liquidity(BASE).expect("withdrawal succeeded");
//! assert_eq!(withdrawn.len(), 2);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │ PoolConfig  │  validated blueprint
//! └──────┬──────┘
//!        │ FromConfig
//!        ▼
//! ┌─────────────┐
//! │  PoolState  │  SwapPool + LiquidityPool commands
//! └──────┬──────┘
//!        │ price-scaled balances
//!        ▼
//! ┌─────────────┐
//! │    Math     │  compute_d, solve_for_output, solve_for_target_d
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype values: [`Amplification`](domain::Amplification), [`FeeRate`](domain::FeeRate), [`PriceScale`](domain::PriceScale), and command results |
//! | [`traits`] | [`SwapPool`](traits::SwapPool), [`LiquidityPool`](traits::LiquidityPool), [`FromConfig`](traits::FromConfig) |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) and [`InitialBalances`](config::InitialBalances) |
//! | [`pool`]   | [`PoolState`](pool::PoolState) and its commands |
//! | [`math`]   | Checked 256-bit arithmetic and the invariant solvers |
//! | [`error`]  | [`CurveError`](error::CurveError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |
//!
//! # Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber.
//! Committed commands log at `debug`, solver convergence at `trace`, and
//! an exhausted iteration bound at `warn`.

pub mod config;
pub mod domain;
pub mod error;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod traits;

pub use domain::{BASE, FEE_DENOMINATOR};
pub use math::MAX_ITERATIONS;
