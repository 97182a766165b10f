//! Fee numerators over the fixed [`FEE_DENOMINATOR`].

use core::fmt;

use crate::error::{CurveError, Result};
use crate::math::mul_div;

/// Denominator shared by the trade fee and the admin fee.
pub const FEE_DENOMINATOR: u128 = 10_000;

/// A fee expressed as a numerator over [`FEE_DENOMINATOR`].
///
/// `FeeRate::new(4)` is a 0.04% fee. Values above the denominator are
/// representable but rejected by [`PoolConfig`](crate::config::PoolConfig)
/// validation.
///
/// # Examples
///
/// ```
/// use stableswap_model::domain::FeeRate;
///
/// let fee = FeeRate::new(4);
/// assert_eq!(fee.apply(1_000_000), Ok(400));
/// assert!(fee.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FeeRate(u32);

impl FeeRate {
    /// No fee.
    pub const ZERO: Self = Self(0);

    /// The whole amount (numerator equal to the denominator).
    pub const FULL: Self = Self(10_000);

    /// Creates a fee rate from its raw numerator.
    pub const fn new(numerator: u32) -> Self {
        Self(numerator)
    }

    /// Returns the raw numerator.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the numerator does not exceed the denominator.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0 as u128 <= FEE_DENOMINATOR
    }

    /// Computes `amount * self / FEE_DENOMINATOR`, truncating.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Overflow`] if the result does not fit `u128`.
    pub fn apply(&self, amount: u128) -> Result<u128> {
        mul_div(amount, u128::from(self.0), FEE_DENOMINATOR, "fee apply")
    }

    /// The per-asset rate charged on imbalanced liquidity operations:
    /// `fee * n / (4 * (n - 1))`, truncated.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] for fewer than two assets.
    pub fn imbalance_rate(&self, n: usize) -> Result<Self> {
        if n < 2 {
            return Err(CurveError::InvalidConfiguration(
                "imbalance fee needs at least two assets",
            ));
        }
        let n = u64::try_from(n)
            .map_err(|_| CurveError::Overflow("asset count does not fit u64"))?;
        let scaled = u64::from(self.0)
            .checked_mul(n)
            .ok_or(CurveError::Overflow("imbalance fee numerator"))?;
        let rate = scaled / (4 * (n - 1));
        u32::try_from(rate)
            .map(Self)
            .map_err(|_| CurveError::Overflow("imbalance fee rate"))
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, FEE_DENOMINATOR)
    }
}
