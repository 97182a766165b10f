//! Proposed pool state produced by an imbalance-aware liquidity query.

/// The result of evaluating a deposit or an imbalanced withdrawal against
/// a snapshot of the pool, without committing it.
///
/// `token_amount` is the LP amount minted (deposit) or burned
/// (withdrawal). `balances` are the balances the pool would hold after
/// the operation, already net of the admin-fee skim recorded in
/// `admin_fees`.
///
/// # Examples
///
/// ```
/// use stableswap_model::config::{InitialBalances, PoolConfig};
/// use stableswap_model::domain::{Amplification, FeeRate};
/// use stableswap_model::pool::PoolState;
/// use stableswap_model::traits::FromConfig;
///
/// let config = PoolConfig::new(
///     2,
///     Amplification::new(200).expect("valid"),
///     FeeRate::new(4),
///     FeeRate::new(5_000),
///     InitialBalances::Explicit(vec![1_000_000, 1_000_000]),
/// )
/// .expect("valid config")
/// .with_token_supply(2_000_000);
/// let pool = PoolState::from_config(&config).expect("valid pool");
///
/// let quote = pool.calc_add_liquidity(&[10_000, 0]).expect("quote");
/// assert!(quote.token_amount() > 0);
/// assert_eq!(pool.balances(), &[1_000_000, 1_000_000]); // untouched
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LiquidityQuote {
    token_amount: u128,
    balances: Vec<u128>,
    fees: Vec<u128>,
    admin_fees: Vec<u128>,
}

impl LiquidityQuote {
    pub(crate) const fn new(
        token_amount: u128,
        balances: Vec<u128>,
        fees: Vec<u128>,
        admin_fees: Vec<u128>,
    ) -> Self {
        Self {
            token_amount,
            balances,
            fees,
            admin_fees,
        }
    }

    /// LP tokens minted or burned.
    #[must_use]
    pub const fn token_amount(&self) -> u128 {
        self.token_amount
    }

    /// Proposed native balances after the operation.
    #[must_use]
    pub fn balances(&self) -> &[u128] {
        &self.balances
    }

    /// Per-asset imbalance fee charged, in native units.
    #[must_use]
    pub fn fees(&self) -> &[u128] {
        &self.fees
    }

    /// Per-asset admin share of the fee, removed from the balances.
    #[must_use]
    pub fn admin_fees(&self) -> &[u128] {
        &self.admin_fees
    }
}
