//! Pre-scaled StableSwap amplification coefficient.

use core::fmt;

use crate::error::{CurveError, Result};

/// The amplification coefficient `A`, stored already multiplied by
/// `n^(n-1)` as the reference contract does.
///
/// Larger values flatten the curve around the balanced point.
///
/// # Examples
///
/// ```
/// use stableswap_model::domain::Amplification;
///
/// // A_actual = 100 in a two-asset pool is stored as 100 * 2^1.
/// let amp = Amplification::from_actual(100, 2).expect("valid");
/// assert_eq!(amp.get(), 200);
/// assert_eq!(amp.ann(2), Ok(400));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u128", into = "u128"))]
pub struct Amplification(u128);

impl Amplification {
    /// Wraps an already-scaled coefficient.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] if `value` is zero.
    pub const fn new(value: u128) -> Result<Self> {
        if value == 0 {
            return Err(CurveError::InvalidConfiguration(
                "amplification must be greater than zero",
            ));
        }
        Ok(Self(value))
    }

    /// Scales a raw coefficient by `n^(n-1)`.
    ///
    /// # Errors
    ///
    /// - [`CurveError::InvalidConfiguration`] if `actual` is zero or `n < 2`.
    /// - [`CurveError::Overflow`] if the scaled value does not fit.
    pub fn from_actual(actual: u128, n: usize) -> Result<Self> {
        if n < 2 {
            return Err(CurveError::InvalidConfiguration(
                "a pool needs at least two assets",
            ));
        }
        let exponent = u32::try_from(n - 1)
            .map_err(|_| CurveError::Overflow("amplification exponent"))?;
        let factor = (n as u128)
            .checked_pow(exponent)
            .ok_or(CurveError::Overflow("n^(n-1)"))?;
        let scaled = actual
            .checked_mul(factor)
            .ok_or(CurveError::Overflow("A * n^(n-1)"))?;
        Self::new(scaled)
    }

    /// Returns the stored (pre-scaled) coefficient.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// `Ann = A * n`, the form used by every solver.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Overflow`] if the product does not fit.
    pub fn ann(&self, n: usize) -> Result<u128> {
        self.0
            .checked_mul(n as u128)
            .ok_or(CurveError::Overflow("A * n"))
    }
}

impl TryFrom<u128> for Amplification {
    type Error = CurveError;

    fn try_from(value: u128) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amplification> for u128 {
    fn from(amp: Amplification) -> Self {
        amp.0
    }
}

impl fmt::Display for Amplification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A={}", self.0)
    }
}
