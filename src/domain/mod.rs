//! Domain value types used throughout the model.
//!
//! Newtypes with validated constructors for the pool parameters, plus
//! the result types returned by quotes and commands.

mod amplification;
mod fee_rate;
mod liquidity_quote;
mod price_scale;
mod swap_outcome;

pub use amplification::Amplification;
pub use fee_rate::{FeeRate, FEE_DENOMINATOR};
pub use liquidity_quote::LiquidityQuote;
pub use price_scale::{PriceScale, BASE};
pub use swap_outcome::SwapOutcome;
