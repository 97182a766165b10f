//! Checked 256-bit arithmetic for solver intermediates.
//!
//! Products such as `D_P * D` or `y² + c` overflow `u128` for realistic
//! 18-decimal pools, so every intermediate is carried as a [`U256`].
//! The [`CheckedWide`] trait returns [`CurveError`] instead of panicking
//! and tags each failure with the step that produced it.
//!
//! # Examples
//!
//! ```
//! use primitive_types::U256;
//! use stableswap_model::math::CheckedWide;
//!
//! let a = U256::from(7u8);
//! let b = U256::from(2u8);
//! assert_eq!(a.safe_div(b, "example"), Ok(U256::from(3u8)));
//! assert!(b.safe_sub(a, "example").is_err());
//! ```

use primitive_types::U256;

use crate::error::{CurveError, Result};

/// Fallible arithmetic on wide unsigned integers.
///
/// # Contract
///
/// - **No panics**: every error condition produces `Err`.
/// - **No saturation**: saturation would hide modeling bugs.
/// - Division truncates toward zero, matching the reference contract.
pub trait CheckedWide: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Overflow`] if the sum exceeds 256 bits.
    fn safe_add(self, rhs: Self, context: &'static str) -> Result<Self>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Underflow`] if the result would be negative.
    fn safe_sub(self, rhs: Self, context: &'static str) -> Result<Self>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Overflow`] if the product exceeds 256 bits.
    fn safe_mul(self, rhs: Self, context: &'static str) -> Result<Self>;

    /// Checked truncating division.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DivisionByZero`] if `rhs` is zero.
    fn safe_div(self, rhs: Self, context: &'static str) -> Result<Self>;
}

impl CheckedWide for U256 {
    #[inline]
    fn safe_add(self, rhs: Self, context: &'static str) -> Result<Self> {
        self.checked_add(rhs).ok_or(CurveError::Overflow(context))
    }

    #[inline]
    fn safe_sub(self, rhs: Self, context: &'static str) -> Result<Self> {
        self.checked_sub(rhs).ok_or(CurveError::Underflow(context))
    }

    #[inline]
    fn safe_mul(self, rhs: Self, context: &'static str) -> Result<Self> {
        self.checked_mul(rhs).ok_or(CurveError::Overflow(context))
    }

    #[inline]
    fn safe_div(self, rhs: Self, context: &'static str) -> Result<Self> {
        self.checked_div(rhs)
            .ok_or(CurveError::DivisionByZero(context))
    }
}

/// Narrows a wide value back to `u128`.
///
/// # Errors
///
/// Returns [`CurveError::Overflow`] if `value` does not fit.
pub fn narrow(value: U256, context: &'static str) -> Result<u128> {
    if value > U256::from(u128::MAX) {
        return Err(CurveError::Overflow(context));
    }
    Ok(value.low_u128())
}

/// Computes `a * b / denominator` with a 256-bit intermediate.
///
/// # Errors
///
/// - [`CurveError::DivisionByZero`] if `denominator` is zero.
/// - [`CurveError::Overflow`] if the quotient does not fit `u128`.
pub fn mul_div(a: u128, b: u128, denominator: u128, context: &'static str) -> Result<u128> {
    let product = U256::from(a).safe_mul(U256::from(b), context)?;
    narrow(product.safe_div(U256::from(denominator), context)?, context)
}

/// Absolute difference of two wide values.
#[inline]
pub fn abs_diff(a: U256, b: U256) -> U256 {
    if a > b {
        a - b
    } else {
        b - a
    }
}
