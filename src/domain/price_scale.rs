//! Fixed-point price scale converting native balances to a common basis.

use core::fmt;

use crate::error::{CurveError, Result};
use crate::math::mul_div;

/// Fixed-point base unit of a price scale (`10^18`).
pub const BASE: u128 = 1_000_000_000_000_000_000;

/// Per-asset scale factor with base unit [`BASE`].
///
/// `xp = balance * scale / BASE`. An 18-decimal asset pegged 1:1 uses
/// [`PriceScale::ONE`]; a 6-decimal asset uses a precision multiplier of
/// `10^12` so that its balances line up with the 18-decimal ones.
///
/// # Examples
///
/// ```
/// use stableswap_model::domain::PriceScale;
///
/// let usdc = PriceScale::with_precision_multiplier(1_000_000_000_000).expect("fits");
/// assert_eq!(usdc.to_scaled(1_000_000), Ok(1_000_000_000_000_000_000));
/// assert_eq!(usdc.to_native(1_000_000_000_000_000_000), Ok(1_000_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u128", into = "u128"))]
pub struct PriceScale(u128);

impl PriceScale {
    /// A 1:1 scale.
    pub const ONE: Self = Self(BASE);

    /// Creates a price scale.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] if `value` is zero.
    pub const fn new(value: u128) -> Result<Self> {
        if value == 0 {
            return Err(CurveError::InvalidConfiguration(
                "price scale must be positive",
            ));
        }
        Ok(Self(value))
    }

    /// Creates the scale `BASE * multiplier` used for assets with fewer
    /// than 18 decimals.
    ///
    /// # Errors
    ///
    /// - [`CurveError::InvalidConfiguration`] if `multiplier` is zero.
    /// - [`CurveError::Overflow`] if the product does not fit `u128`.
    pub fn with_precision_multiplier(multiplier: u128) -> Result<Self> {
        let value = BASE
            .checked_mul(multiplier)
            .ok_or(CurveError::Overflow("price scale multiplier"))?;
        Self::new(value)
    }

    /// Returns the raw scale.
    #[must_use]
    pub const fn get(&self) -> u128 {
        self.0
    }

    /// Converts a native balance to price-scaled units, truncating.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Overflow`] if the result does not fit `u128`.
    pub fn to_scaled(&self, native: u128) -> Result<u128> {
        mul_div(native, self.0, BASE, "price scale to xp")
    }

    /// Converts a price-scaled amount back to native units, truncating.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Overflow`] if the result does not fit `u128`.
    pub fn to_native(&self, scaled: u128) -> Result<u128> {
        mul_div(scaled, BASE, self.0, "price scale to native")
    }
}

impl Default for PriceScale {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u128> for PriceScale {
    type Error = CurveError;

    fn try_from(value: u128) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PriceScale> for u128 {
    fn from(scale: PriceScale) -> Self {
        scale.0
    }
}

impl fmt::Display for PriceScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}e-18", self.0)
    }
}
