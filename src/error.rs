//! Unified error type for the StableSwap model.
//!
//! Every fallible operation in the crate returns [`CurveError`], so a
//! harness can match on the failure class without inspecting messages.
//! Variants carry a short `&'static str` naming the step that failed.

use thiserror::Error;

/// Errors produced by the invariant solvers and pool operations.
///
/// A failed operation never leaves a partially mutated
/// [`PoolState`](crate::pool::PoolState) behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// A computed output (swap, mint, withdrawal) would be negative.
    #[error("negative output: {0}")]
    NegativeOutput(&'static str),

    /// A subtraction would drive a balance or supply below zero.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// An intermediate or final value exceeds its integer width.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// An iterative solve exhausted its iteration bound.
    #[error("{solver} did not converge within {iterations} iterations")]
    ConvergenceFailure {
        /// Name of the solver that gave up.
        solver: &'static str,
        /// The bound that was exceeded.
        iterations: u32,
    },

    /// A divisor was zero, usually a zero price-scaled balance.
    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),

    /// Pool parameters are out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// An asset index does not address one of the pool's assets.
    #[error("asset index {index} out of range for a {n}-asset pool")]
    InvalidAsset {
        /// The offending index.
        index: usize,
        /// Number of assets in the pool.
        n: usize,
    },

    /// The same asset was given as both sides of a swap.
    #[error("asset {0} used as both input and output")]
    IdenticalAssets(usize),

    /// A per-asset amount list has the wrong length.
    #[error("expected {expected} per-asset amounts, got {actual}")]
    LengthMismatch {
        /// Number of assets in the pool.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// A command would mint or pay out nothing.
    #[error("zero amount: {0}")]
    ZeroAmount(&'static str),

    /// A command returned less than the caller's minimum.
    #[error("slippage exceeded: minimum {minimum}, got {actual}")]
    SlippageExceeded {
        /// Minimum amount the caller accepts.
        minimum: u128,
        /// Amount the pool would have paid.
        actual: u128,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, CurveError>;
