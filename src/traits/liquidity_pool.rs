//! Liquidity provision extending [`SwapPool`].
//!
//! # Supply Accounting Invariant
//!
//! The LP token supply reported by
//! [`PoolState::token_supply`](crate::pool::PoolState::token_supply) changes
//! **only** through these operations:
//!
//! | Operation | Effect on supply |
//! |-----------|------------------|
//! | [`add_liquidity`](LiquidityPool::add_liquidity) | `+ mint` |
//! | [`add_liquidity_checked`](LiquidityPool::add_liquidity_checked) | `+ mint` |
//! | [`remove_liquidity`](LiquidityPool::remove_liquidity) | `- amount` |
//! | [`remove_liquidity_imbalance`](LiquidityPool::remove_liquidity_imbalance) | `- burn` |
//! | [`remove_liquidity_one_coin`](LiquidityPool::remove_liquidity_one_coin) | `- token_amount` |
//!
//! Swaps and queries never alter it.
//!
//! # Imbalance Fees
//!
//! Deposits and withdrawals that move the pool away from its current
//! proportions pay a deviation fee at `fee * n / (4 * (n - 1))`. The
//! admin share of that fee is skimmed out of the pool balances.

use super::SwapPool;
use crate::error::Result;

/// Trait for pools that mint and burn LP tokens against deposits and
/// withdrawals.
///
/// # Errors
///
/// Methods that can fail return [`Result<T>`](crate::error::Result).
/// Common variants:
///
/// - [`CurveError::LengthMismatch`](crate::error::CurveError::LengthMismatch)
///   when an amount vector does not have one entry per asset.
/// - [`CurveError::Underflow`](crate::error::CurveError::Underflow) when
///   withdrawing more than the pool or supply holds.
/// - [`CurveError::NegativeOutput`](crate::error::CurveError::NegativeOutput)
///   when the invariant would decrease.
pub trait LiquidityPool: SwapPool {
    /// Deposits `amounts` (one per asset) and returns the LP tokens minted.
    ///
    /// # Errors
    ///
    /// - [`CurveError::ZeroAmount`](crate::error::CurveError::ZeroAmount)
    ///   if the deposit would mint nothing.
    /// - See the trait-level documentation. The pool is unchanged on error.
    fn add_liquidity(&mut self, amounts: &[u128]) -> Result<u128>;

    /// Same as [`LiquidityPool::add_liquidity`], but fails with
    /// [`CurveError::SlippageExceeded`](crate::error::CurveError::SlippageExceeded)
    /// before committing if fewer than `min_mint` LP tokens would be minted.
    ///
    /// # Errors
    ///
    /// Same as [`LiquidityPool::add_liquidity`], plus the slippage check.
    fn add_liquidity_checked(&mut self, amounts: &[u128], min_mint: u128) -> Result<u128>;

    /// Burns `amount` LP tokens for a proportional share of every balance.
    ///
    /// No fee is charged. Returns the native amount withdrawn per asset.
    ///
    /// # Errors
    ///
    /// - [`CurveError::DivisionByZero`](crate::error::CurveError::DivisionByZero)
    ///   if the supply is zero.
    /// - [`CurveError::Underflow`](crate::error::CurveError::Underflow) if
    ///   `amount` exceeds the supply.
    fn remove_liquidity(&mut self, amount: u128) -> Result<Vec<u128>>;

    /// Withdraws exactly `amounts` and returns the LP tokens burned.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation. The pool is unchanged on error.
    fn remove_liquidity_imbalance(&mut self, amounts: &[u128]) -> Result<u128>;

    /// Returns the amount of asset `i` paid for burning `token_amount`.
    ///
    /// Query only.
    ///
    /// # Errors
    ///
    /// - [`CurveError::InvalidAsset`](crate::error::CurveError::InvalidAsset)
    ///   for a bad index.
    /// - [`CurveError::DivisionByZero`](crate::error::CurveError::DivisionByZero)
    ///   if the supply is zero.
    fn calc_withdraw_one_coin(&self, token_amount: u128, i: usize) -> Result<u128>;

    /// Burns `token_amount` LP tokens for asset `i` alone.
    ///
    /// # Errors
    ///
    /// Same as [`LiquidityPool::calc_withdraw_one_coin`], plus
    /// [`CurveError::SlippageExceeded`](crate::error::CurveError::SlippageExceeded)
    /// if the payout is below `min_amount`.
    fn remove_liquidity_one_coin(
        &mut self,
        token_amount: u128,
        i: usize,
        min_amount: u128,
    ) -> Result<u128>;
}
