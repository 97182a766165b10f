//! Configuration for a StableSwap pool model.

use crate::domain::{Amplification, FeeRate, PriceScale, BASE};
use crate::error::{CurveError, Result};
use crate::math::{mul_div, MAX_ITERATIONS};

/// How the pool's starting balances are given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InitialBalances {
    /// One native balance per asset, in asset order.
    Explicit(Vec<u128>),
    /// A total deposit in price-scaled units, split evenly across assets:
    /// `balance[k] = (total / n) * BASE / price_scale[k]`.
    UniformDeposit(u128),
}

/// Immutable parameters of a StableSwap pool.
///
/// # Defaults
///
/// - price scale: [`PriceScale::ONE`] for every asset (1:1 pricing)
/// - token supply: `0`
/// - iteration bound: [`MAX_ITERATIONS`]
///
/// # Validation
///
/// - At least two assets.
/// - Both fee numerators within [`FEE_DENOMINATOR`](crate::domain::FEE_DENOMINATOR).
/// - One price scale per asset; explicit balances have one entry per asset.
/// - Iteration bound greater than zero.
///
/// # Examples
///
/// ```
/// use stableswap_model::config::{InitialBalances, PoolConfig};
/// use stableswap_model::domain::{Amplification, FeeRate};
///
/// let config = PoolConfig::new(
///     3,
///     Amplification::from_actual(100, 3).expect("valid"),
///     FeeRate::new(4),
///     FeeRate::new(5_000),
///     InitialBalances::UniformDeposit(3_000_000),
/// )
/// .expect("valid config");
/// assert_eq!(config.initial_balances(), Ok(vec![1_000_000; 3]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    n_assets: usize,
    amplification: Amplification,
    fee: FeeRate,
    admin_fee: FeeRate,
    initial: InitialBalances,
    price_scales: Vec<PriceScale>,
    #[cfg_attr(feature = "serde", serde(default))]
    token_supply: u128,
    #[cfg_attr(feature = "serde", serde(default = "default_max_iterations"))]
    max_iterations: u32,
}

#[cfg(feature = "serde")]
const fn default_max_iterations() -> u32 {
    MAX_ITERATIONS
}

impl PoolConfig {
    /// Creates a configuration with default price scales, zero token
    /// supply and the default iteration bound.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] or
    /// [`CurveError::LengthMismatch`] if validation fails.
    pub fn new(
        n_assets: usize,
        amplification: Amplification,
        fee: FeeRate,
        admin_fee: FeeRate,
        initial: InitialBalances,
    ) -> Result<Self> {
        let config = Self {
            n_assets,
            amplification,
            fee,
            admin_fee,
            initial,
            price_scales: vec![PriceScale::ONE; n_assets],
            token_supply: 0,
            max_iterations: MAX_ITERATIONS,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the per-asset price scales.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::LengthMismatch`] unless there is exactly one
    /// scale per asset.
    pub fn with_price_scales(mut self, price_scales: Vec<PriceScale>) -> Result<Self> {
        self.price_scales = price_scales;
        self.validate()?;
        Ok(self)
    }

    /// Sets the LP token supply the pool starts with.
    pub fn with_token_supply(mut self, token_supply: u128) -> Self {
        self.token_supply = token_supply;
        self
    }

    /// Sets the iteration bound applied to every solve.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidConfiguration`] if `max_iterations` is 0.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Result<Self> {
        self.max_iterations = max_iterations;
        self.validate()?;
        Ok(self)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`CurveError::InvalidConfiguration`] for fewer than two assets, a
    ///   fee above the denominator, or a zero iteration bound.
    /// - [`CurveError::LengthMismatch`] if price scales or explicit
    ///   balances do not have one entry per asset.
    pub fn validate(&self) -> Result<()> {
        if self.n_assets < 2 {
            return Err(CurveError::InvalidConfiguration(
                "a pool needs at least two assets",
            ));
        }
        if !self.fee.is_valid() {
            return Err(CurveError::InvalidConfiguration(
                "fee exceeds the fee denominator",
            ));
        }
        if !self.admin_fee.is_valid() {
            return Err(CurveError::InvalidConfiguration(
                "admin fee exceeds the fee denominator",
            ));
        }
        if self.price_scales.len() != self.n_assets {
            return Err(CurveError::LengthMismatch {
                expected: self.n_assets,
                actual: self.price_scales.len(),
            });
        }
        if let InitialBalances::Explicit(balances) = &self.initial {
            if balances.len() != self.n_assets {
                return Err(CurveError::LengthMismatch {
                    expected: self.n_assets,
                    actual: balances.len(),
                });
            }
        }
        if self.max_iterations == 0 {
            return Err(CurveError::InvalidConfiguration(
                "iteration bound must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Resolves the starting native balances.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Overflow`] if a uniform share does not fit
    /// after rescaling.
    pub fn initial_balances(&self) -> Result<Vec<u128>> {
        match &self.initial {
            InitialBalances::Explicit(balances) => Ok(balances.clone()),
            InitialBalances::UniformDeposit(total) => {
                let share = total / self.n_assets as u128;
                self.price_scales
                    .iter()
                    .map(|scale| mul_div(share, BASE, scale.get(), "uniform deposit share"))
                    .collect()
            }
        }
    }

    /// Returns the number of assets.
    #[must_use]
    pub const fn n_assets(&self) -> usize {
        self.n_assets
    }

    /// Returns the pre-scaled amplification coefficient.
    #[must_use]
    pub const fn amplification(&self) -> Amplification {
        self.amplification
    }

    /// Returns the trade fee.
    #[must_use]
    pub const fn fee(&self) -> FeeRate {
        self.fee
    }

    /// Returns the admin share of fees.
    #[must_use]
    pub const fn admin_fee(&self) -> FeeRate {
        self.admin_fee
    }

    /// Returns how the starting balances were given.
    #[must_use]
    pub const fn initial(&self) -> &InitialBalances {
        &self.initial
    }

    /// Returns the per-asset price scales.
    #[must_use]
    pub fn price_scales(&self) -> &[PriceScale] {
        &self.price_scales
    }

    /// Returns the starting LP token supply.
    #[must_use]
    pub const fn token_supply(&self) -> u128 {
        self.token_supply
    }

    /// Returns the iteration bound.
    #[must_use]
    pub const fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}
