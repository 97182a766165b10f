//! Pool state: immutable parameters plus the mutable balances every
//! command operates on.

use crate::config::PoolConfig;
use crate::domain::{Amplification, FeeRate, PriceScale, BASE};
use crate::error::{CurveError, Result};
use crate::math::{compute_d, mul_div, solve_for_output, solve_for_target_d};
use crate::traits::FromConfig;

/// A StableSwap pool over `n` assets.
///
/// `D` and the price-scaled balances are derived on demand and never
/// cached, so every read reflects the current balances exactly.
///
/// # Examples
///
/// ```
/// use stableswap_model::config::{InitialBalances, PoolConfig};
/// use stableswap_model::domain::{Amplification, FeeRate, BASE};
/// use stableswap_model::pool::PoolState;
/// use stableswap_model::traits::FromConfig;
///
/// let config = PoolConfig::new(
///     2,
///     Amplification::new(200).expect("valid"),
///     FeeRate::new(4),
///     FeeRate::ZERO,
///     InitialBalances::UniformDeposit(2 * BASE),
/// )
/// .expect("valid config");
/// let pool = PoolState::from_config(&config).expect("valid pool");
///
/// assert_eq!(pool.balances(), &[BASE, BASE]);
/// assert_eq!(pool.d(), Ok(2 * BASE));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolState {
    pub(crate) amplification: Amplification,
    pub(crate) fee: FeeRate,
    pub(crate) admin_fee: FeeRate,
    pub(crate) balances: Vec<u128>,
    pub(crate) price_scales: Vec<PriceScale>,
    pub(crate) token_supply: u128,
    pub(crate) admin_balances: Vec<u128>,
    pub(crate) max_iterations: u32,
}

impl FromConfig<PoolConfig> for PoolState {
    /// Creates a pool from the given configuration.
    ///
    /// # Errors
    ///
    /// - Propagates any error from [`PoolConfig::validate`].
    /// - Returns [`CurveError::Overflow`] if a uniform deposit share does
    ///   not fit after rescaling.
    fn from_config(config: &PoolConfig) -> Result<Self> {
        config.validate()?;
        let balances = config.initial_balances()?;
        Ok(Self {
            amplification: config.amplification(),
            fee: config.fee(),
            admin_fee: config.admin_fee(),
            admin_balances: vec![0; balances.len()],
            balances,
            price_scales: config.price_scales().to_vec(),
            token_supply: config.token_supply(),
            max_iterations: config.max_iterations(),
        })
    }
}

impl PoolState {
    /// Returns the number of assets.
    #[must_use]
    pub fn n_assets(&self) -> usize {
        self.balances.len()
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

    /// Returns the native balances.
    #[must_use]
    pub fn balances(&self) -> &[u128] {
        &self.balances
    }

    /// Returns the per-asset price scales.
    #[must_use]
    pub fn price_scales(&self) -> &[PriceScale] {
        &self.price_scales
    }

    /// Returns the outstanding LP token supply.
    #[must_use]
    pub const fn token_supply(&self) -> u128 {
        self.token_supply
    }

    /// Returns the accumulated admin fees per asset, in native units.
    #[must_use]
    pub fn admin_balances(&self) -> &[u128] {
        &self.admin_balances
    }

    /// Returns the iteration bound used by every solve.
    #[must_use]
    pub const fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Returns the current balances in price-scaled units.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::Overflow`] if a scaled balance does not fit.
    pub fn xp(&self) -> Result<Vec<u128>> {
        self.xp_of(&self.balances)
    }

    /// Returns the invariant `D` of the current balances.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`compute_d`].
    pub fn d(&self) -> Result<u128> {
        self.d_of(&self.balances)
    }

    /// Solves for the price-scaled balance of `j` when the price-scaled
    /// balance of `i` becomes `x`, holding the current `D`.
    ///
    /// # Errors
    ///
    /// Propagates index, solver and arithmetic errors.
    pub fn y(&self, i: usize, j: usize, x: u128) -> Result<u128> {
        let xp = self.xp()?;
        let d = compute_d(&xp, self.amplification, self.max_iterations)?;
        solve_for_output(i, j, x, &xp, d, self.amplification, self.max_iterations)
    }

    /// Solves for the price-scaled balance of `i` that gives invariant
    /// `target_d`, holding the other current balances.
    ///
    /// # Errors
    ///
    /// Propagates index, solver and arithmetic errors.
    pub fn y_d(&self, i: usize, target_d: u128) -> Result<u128> {
        let xp = self.xp()?;
        solve_for_target_d(i, &xp, target_d, self.amplification, self.max_iterations)
    }

    /// Returns `D * BASE / token_supply`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DivisionByZero`] if no LP tokens exist.
    pub fn virtual_price(&self) -> Result<u128> {
        mul_div(self.d()?, BASE, self.token_supply, "virtual price")
    }

    pub(crate) fn xp_of(&self, balances: &[u128]) -> Result<Vec<u128>> {
        balances
            .iter()
            .zip(&self.price_scales)
            .map(|(balance, scale)| scale.to_scaled(*balance))
            .collect()
    }

    pub(crate) fn d_of(&self, balances: &[u128]) -> Result<u128> {
        compute_d(
            &self.xp_of(balances)?,
            self.amplification,
            self.max_iterations,
        )
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<()> {
        let n = self.n_assets();
        if index >= n {
            return Err(CurveError::InvalidAsset { index, n });
        }
        Ok(())
    }

    pub(crate) fn check_len(&self, amounts: &[u128]) -> Result<()> {
        if amounts.len() != self.n_assets() {
            return Err(CurveError::LengthMismatch {
                expected: self.n_assets(),
                actual: amounts.len(),
            });
        }
        Ok(())
    }
}
