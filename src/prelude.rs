//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use stableswap_model::prelude::*;
//! ```

pub use crate::config::{InitialBalances, PoolConfig};
pub use crate::domain::{
    Amplification, FeeRate, LiquidityQuote, PriceScale, SwapOutcome, BASE, FEE_DENOMINATOR,
};
pub use crate::error::{CurveError, Result};
pub use crate::math::MAX_ITERATIONS;
pub use crate::pool::PoolState;
pub use crate::traits::{FromConfig, LiquidityPool, SwapPool};
