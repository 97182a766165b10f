//! Direct two-asset exchange.
//!
//! [`SwapPool`] covers the ways to evaluate a trade against the curve:
//!
//! 1. **Execute** with [`SwapPool::swap`], which commits the new balances,
//!    or [`SwapPool::swap_checked`], which first enforces a minimum output.
//! 2. **Quote** with [`SwapPool::quote_swap`], the same computation as
//!    `swap` without committing.
//! 3. **Reverse quote** with [`SwapPool::quote_reverse_swap`], the input
//!    needed for a target output.
//! 4. **Curve quote** with [`SwapPool::get_dy`], the fee-less output in
//!    price-scaled units.
//!
//! # Fee Placement
//!
//! The trade fee is taken from the output side: it is charged on the
//! curve output `dy` and left in the pool's balance of the output asset.
//! Swaps never change the LP token supply.

use crate::domain::SwapOutcome;
use crate::error::Result;

/// Trait for pools that exchange one asset for another along the curve.
///
/// Asset indices are positions in the pool's balance vector. All amounts
/// are in native units unless stated otherwise.
pub trait SwapPool {
    /// Swaps `dx` of asset `i` for asset `j` and commits the new balances.
    ///
    /// Returns the amount of `j` paid out, net of the trade fee.
    ///
    /// # Errors
    ///
    /// - [`CurveError::InvalidAsset`](crate::error::CurveError::InvalidAsset)
    ///   or [`CurveError::IdenticalAssets`](crate::error::CurveError::IdenticalAssets)
    ///   for bad indices.
    /// - [`CurveError::NegativeOutput`](crate::error::CurveError::NegativeOutput)
    ///   if the curve output is below one unit.
    /// - Any solver or arithmetic error. The pool is unchanged on error.
    fn swap(&mut self, i: usize, j: usize, dx: u128) -> Result<u128>;

    /// Same as [`SwapPool::swap`], but fails with
    /// [`CurveError::SlippageExceeded`](crate::error::CurveError::SlippageExceeded)
    /// before committing if the payout is below `min_amount`.
    ///
    /// # Errors
    ///
    /// Same as [`SwapPool::swap`], plus the slippage check.
    fn swap_checked(
        &mut self,
        i: usize,
        j: usize,
        dx: u128,
        min_amount: u128,
    ) -> Result<u128>;

    /// Evaluates a swap without committing it.
    ///
    /// # Errors
    ///
    /// Same as [`SwapPool::swap`].
    fn quote_swap(&self, i: usize, j: usize, dx: u128) -> Result<SwapOutcome>;

    /// Returns the amount of asset `i` needed to receive `amount_out` of
    /// asset `j`.
    ///
    /// The target is grossed up by `FEE_DENOMINATOR / (FEE_DENOMINATOR - fee)`
    /// and one unit is added to the solved input. Query only.
    ///
    /// # Errors
    ///
    /// - Same index and solver errors as [`SwapPool::swap`].
    /// - [`CurveError::Underflow`](crate::error::CurveError::Underflow) if
    ///   the grossed-up output exceeds the pool's balance of `j`.
    /// - [`CurveError::DivisionByZero`](crate::error::CurveError::DivisionByZero)
    ///   if the fee takes the whole output.
    fn quote_reverse_swap(&self, i: usize, j: usize, amount_out: u128) -> Result<u128>;

    /// Returns the fee-less output for `dx` price-scaled units of asset `i`,
    /// in price-scaled units of asset `j`.
    ///
    /// # Errors
    ///
    /// Same index and solver errors as [`SwapPool::swap`], and
    /// [`CurveError::NegativeOutput`](crate::error::CurveError::NegativeOutput)
    /// if the solved balance exceeds the current one.
    fn get_dy(&self, i: usize, j: usize, dx: u128) -> Result<u128>;
}
