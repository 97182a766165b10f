//! Deposits and withdrawals.
//!
//! | Operation | Fee | Supply |
//! |-----------|-----|--------|
//! | `add_liquidity` | deviation fee, admin share skimmed | `+ mint`, never zero |
//! | `remove_liquidity` | none | `- amount` |
//! | `remove_liquidity_imbalance` | deviation fee, admin share skimmed | `- burn` |
//! | `remove_liquidity_one_coin` | deviation fee, admin share skimmed | `- token_amount` |
//!
//! The deviation fee on asset `k` is charged on `|ideal_k - new_k|`, where
//! `ideal_k = D1 * old_k / D0` is the balance the asset would hold had the
//! operation kept the pool's proportions. Every command evaluates on
//! scratch copies and commits only once all solves succeed.

use tracing::debug;

use crate::domain::LiquidityQuote;
use crate::error::{CurveError, Result};
use crate::math::{compute_d, mul_div, solve_for_target_d};
use crate::traits::LiquidityPool;

use super::PoolState;

/// A single-asset withdrawal before it is committed.
#[derive(Debug, Clone, Copy)]
struct OneCoinWithdrawal {
    amount: u128,
    /// Payout with no deviation fee applied.
    fee_free_amount: u128,
}

impl PoolState {
    /// Evaluates a deposit of `amounts` without committing it.
    ///
    /// On an empty supply the whole new invariant is minted and no fee is
    /// charged.
    ///
    /// # Errors
    ///
    /// - [`CurveError::LengthMismatch`] if `amounts` has the wrong length.
    /// - [`CurveError::NegativeOutput`] if the fee-adjusted invariant is
    ///   below the current one.
    /// - Any solver or arithmetic error.
    pub fn calc_add_liquidity(&self, amounts: &[u128]) -> Result<LiquidityQuote> {
        self.check_len(amounts)?;
        let d0 = self.d()?;
        let new_balances = self
            .balances
            .iter()
            .zip(amounts)
            .map(|(b, a)| {
                b.checked_add(*a)
                    .ok_or(CurveError::Overflow("deposit balance"))
            })
            .collect::<Result<Vec<_>>>()?;
        let d1 = self.d_of(&new_balances)?;

        if self.token_supply == 0 {
            let n = self.n_assets();
            return Ok(LiquidityQuote::new(
                d1,
                new_balances,
                vec![0; n],
                vec![0; n],
            ));
        }

        let (fees, admin_fees) = self.deviation_fees(d0, d1, &new_balances)?;
        let adjusted = subtract(&new_balances, &fees, "deposit net of fees")?;
        let committed = subtract(&new_balances, &admin_fees, "deposit net of admin fees")?;
        let d2 = self.d_of(&adjusted)?;

        let growth = d2
            .checked_sub(d0)
            .ok_or(CurveError::NegativeOutput("deposit shrinks the invariant"))?;
        let mint = mul_div(self.token_supply, growth, d0, "lp mint")?;
        Ok(LiquidityQuote::new(mint, committed, fees, admin_fees))
    }

    /// Evaluates a withdrawal of exactly `amounts` without committing it.
    ///
    /// # Errors
    ///
    /// - [`CurveError::LengthMismatch`] if `amounts` has the wrong length.
    /// - [`CurveError::Underflow`] if an amount exceeds its balance.
    /// - [`CurveError::NegativeOutput`] if the fee-adjusted invariant is
    ///   above the current one.
    /// - Any solver or arithmetic error.
    pub fn calc_remove_liquidity_imbalance(&self, amounts: &[u128]) -> Result<LiquidityQuote> {
        self.check_len(amounts)?;
        let d0 = self.d()?;
        let tentative = subtract(&self.balances, amounts, "withdrawal exceeds balance")?;
        let d1 = self.d_of(&tentative)?;

        let (fees, admin_fees) = self.deviation_fees(d0, d1, &tentative)?;
        let adjusted = subtract(&tentative, &fees, "withdrawal net of fees")?;
        let committed = subtract(&tentative, &admin_fees, "withdrawal net of admin fees")?;
        let d2 = self.d_of(&adjusted)?;

        let shrink = d0
            .checked_sub(d2)
            .ok_or(CurveError::NegativeOutput("withdrawal grows the invariant"))?;
        let burn = mul_div(self.token_supply, shrink, d0, "lp burn")?;
        Ok(LiquidityQuote::new(burn, committed, fees, admin_fees))
    }

    /// Per-asset deviation fees and their admin shares for a move from the
    /// current balances to `new_balances`.
    fn deviation_fees(
        &self,
        d0: u128,
        d1: u128,
        new_balances: &[u128],
    ) -> Result<(Vec<u128>, Vec<u128>)> {
        let rate = self.fee.imbalance_rate(self.n_assets())?;
        let mut fees = Vec::with_capacity(new_balances.len());
        let mut admin_fees = Vec::with_capacity(new_balances.len());
        for (old, new) in self.balances.iter().zip(new_balances) {
            let ideal = mul_div(d1, *old, d0, "ideal balance")?;
            let fee = rate.apply(ideal.abs_diff(*new))?;
            admin_fees.push(self.admin_fee.apply(fee)?);
            fees.push(fee);
        }
        Ok((fees, admin_fees))
    }

    fn withdraw_one_coin(&self, token_amount: u128, i: usize) -> Result<OneCoinWithdrawal> {
        self.check_index(i)?;
        let amp = self.amplification;
        let xp = self.xp()?;
        let d0 = compute_d(&xp, amp, self.max_iterations)?;
        let d1 = d0
            .checked_sub(mul_div(token_amount, d0, self.token_supply, "lp share")?)
            .ok_or(CurveError::Underflow("burn exceeds the invariant"))?;
        let new_y = solve_for_target_d(i, &xp, d1, amp, self.max_iterations)?;

        let rate = self.fee.imbalance_rate(self.n_assets())?;
        let mut xp_reduced = Vec::with_capacity(xp.len());
        for (k, &x) in xp.iter().enumerate() {
            let scaled = mul_div(x, d1, d0, "expected balance")?;
            let expected = if k == i {
                scaled.checked_sub(new_y)
            } else {
                x.checked_sub(scaled)
            }
            .ok_or(CurveError::Underflow("expected withdrawal"))?;
            let reduced = x
                .checked_sub(rate.apply(expected)?)
                .ok_or(CurveError::Underflow("fee exceeds balance"))?;
            xp_reduced.push(reduced);
        }

        let y = solve_for_target_d(i, &xp_reduced, d1, amp, self.max_iterations)?;
        let dy = xp_reduced[i]
            .checked_sub(y)
            .and_then(|v| v.checked_sub(1))
            .ok_or(CurveError::NegativeOutput("single asset withdrawal"))?;
        let fee_free = xp[i]
            .checked_sub(new_y)
            .ok_or(CurveError::Underflow("fee-free withdrawal"))?;

        let scale = self.price_scales[i];
        Ok(OneCoinWithdrawal {
            amount: scale.to_native(dy)?,
            fee_free_amount: scale.to_native(fee_free)?,
        })
    }

    fn credit_admin_fees(&self, admin_fees: &[u128]) -> Result<Vec<u128>> {
        self.admin_balances
            .iter()
            .zip(admin_fees)
            .map(|(held, fee)| {
                held.checked_add(*fee)
                    .ok_or(CurveError::Overflow("admin balance"))
            })
            .collect()
    }
}

fn subtract(lhs: &[u128], rhs: &[u128], context: &'static str) -> Result<Vec<u128>> {
    lhs.iter()
        .zip(rhs)
        .map(|(a, b)| a.checked_sub(*b).ok_or(CurveError::Underflow(context)))
        .collect()
}

impl LiquidityPool for PoolState {
    fn add_liquidity(&mut self, amounts: &[u128]) -> Result<u128> {
        self.add_liquidity_checked(amounts, 0)
    }

    fn add_liquidity_checked(&mut self, amounts: &[u128], min_mint: u128) -> Result<u128> {
        let quote = self.calc_add_liquidity(amounts)?;
        if quote.token_amount() == 0 {
            return Err(CurveError::ZeroAmount("lp mint"));
        }
        if quote.token_amount() < min_mint {
            return Err(CurveError::SlippageExceeded {
                minimum: min_mint,
                actual: quote.token_amount(),
            });
        }
        let supply = self
            .token_supply
            .checked_add(quote.token_amount())
            .ok_or(CurveError::Overflow("lp supply"))?;
        let admin_balances = self.credit_admin_fees(quote.admin_fees())?;

        self.balances = quote.balances().to_vec();
        self.admin_balances = admin_balances;
        self.token_supply = supply;
        debug!(
            ?amounts,
            mint = quote.token_amount(),
            supply,
            "liquidity added"
        );
        Ok(quote.token_amount())
    }

    fn remove_liquidity(&mut self, amount: u128) -> Result<Vec<u128>> {
        if self.token_supply == 0 {
            return Err(CurveError::DivisionByZero("no lp supply"));
        }
        let supply = self
            .token_supply
            .checked_sub(amount)
            .ok_or(CurveError::Underflow("burn exceeds lp supply"))?;
        let withdrawn = self
            .balances
            .iter()
            .map(|b| mul_div(*b, amount, self.token_supply, "proportional share"))
            .collect::<Result<Vec<_>>>()?;
        let balances = subtract(&self.balances, &withdrawn, "proportional withdrawal")?;

        self.balances = balances;
        self.token_supply = supply;
        debug!(amount, ?withdrawn, supply, "liquidity removed");
        Ok(withdrawn)
    }

    fn remove_liquidity_imbalance(&mut self, amounts: &[u128]) -> Result<u128> {
        let quote = self.calc_remove_liquidity_imbalance(amounts)?;
        let supply = self
            .token_supply
            .checked_sub(quote.token_amount())
            .ok_or(CurveError::Underflow("burn exceeds lp supply"))?;
        let admin_balances = self.credit_admin_fees(quote.admin_fees())?;

        self.balances = quote.balances().to_vec();
        self.admin_balances = admin_balances;
        self.token_supply = supply;
        debug!(
            ?amounts,
            burn = quote.token_amount(),
            supply,
            "imbalanced liquidity removed"
        );
        Ok(quote.token_amount())
    }

    fn calc_withdraw_one_coin(&self, token_amount: u128, i: usize) -> Result<u128> {
        self.withdraw_one_coin(token_amount, i).map(|w| w.amount)
    }

    fn remove_liquidity_one_coin(
        &mut self,
        token_amount: u128,
        i: usize,
        min_amount: u128,
    ) -> Result<u128> {
        let withdrawal = self.withdraw_one_coin(token_amount, i)?;
        if withdrawal.amount < min_amount {
            return Err(CurveError::SlippageExceeded {
                minimum: min_amount,
                actual: withdrawal.amount,
            });
        }
        let fee = withdrawal.fee_free_amount.saturating_sub(withdrawal.amount);
        let admin = self.admin_fee.apply(fee)?;

        let balance = self.balances[i]
            .checked_sub(withdrawal.amount)
            .and_then(|b| b.checked_sub(admin))
            .ok_or(CurveError::Underflow("single asset withdrawal exceeds balance"))?;
        let supply = self
            .token_supply
            .checked_sub(token_amount)
            .ok_or(CurveError::Underflow("burn exceeds lp supply"))?;
        let admin_balance = self.admin_balances[i]
            .checked_add(admin)
            .ok_or(CurveError::Overflow("admin balance"))?;

        self.balances[i] = balance;
        self.admin_balances[i] = admin_balance;
        self.token_supply = supply;
        debug!(
            token_amount,
            i,
            amount = withdrawal.amount,
            fee,
            supply,
            "single asset liquidity removed"
        );
        Ok(withdrawal.amount)
    }
}


#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::{InitialBalances, PoolConfig};
    use crate::domain::{Amplification, FeeRate, BASE};
    use crate::traits::FromConfig;

    const B3: [u128; 3] = [
        1_511_922_780_182_839,
        1_932_395_124_083_698,
        1_724_082_092_237_124,
    ];
    const SUPPLY3: u128 = 4_000_000_000_000_000;

    fn make_pool(
        amp: u128,
        fee: u32,
        admin_fee: u32,
        balances: Vec<u128>,
        supply: u128,
    ) -> PoolState {
        let Ok(amp) = Amplification::new(amp) else {
            panic!("valid amplification");
        };
        let Ok(cfg) = PoolConfig::new(
            balances.len(),
            amp,
            FeeRate::new(fee),
            FeeRate::new(admin_fee),
            InitialBalances::Explicit(balances),
        ) else {
            panic!("valid config");
        };
        let cfg = cfg.with_token_supply(supply);
        let Ok(pool) = PoolState::from_config(&cfg) else {
            panic!("valid pool");
        };
        pool
    }

    fn pool3() -> PoolState {
        make_pool(2_000, 4, 5_000, B3.to_vec(), SUPPLY3)
    }

    #[test]
    fn first_deposit_mints_invariant() {
        let mut pool = make_pool(200, 4, 5_000, vec![0, 0], 0);
        let Ok(mint) = pool.add_liquidity(&[BASE, BASE]) else {
            panic!("deposit should succeed");
        };
        assert_eq!(mint, 2 * BASE);
        assert_eq!(pool.token_supply(), 2 * BASE);
        assert_eq!(pool.balances(), &[BASE, BASE]);
        assert_eq!(pool.admin_balances(), &[0, 0]);
    }

    #[test]
    fn balanced_deposit_pays_no_fee() {
        let mut pool = make_pool(200, 4, 5_000, vec![BASE, BASE], 2 * BASE);
        let Ok(mint) = pool.add_liquidity(&[BASE / 10, BASE / 10]) else {
            panic!("deposit should succeed");
        };
        assert_eq!(mint, BASE / 5);
        assert_eq!(pool.balances(), &[BASE + BASE / 10, BASE + BASE / 10]);
        assert_eq!(pool.admin_balances(), &[0, 0]);
    }

    #[test]
    fn imbalanced_deposit_matches_reference() {
        let mut pool = pool3();
        let amounts = [1_000_000_000_000, 500_000_000_000, 0];
        let Ok(quote) = pool.calc_add_liquidity(&amounts) else {
            panic!("quote should succeed");
        };
        assert_eq!(quote.fees(), &[56_118_926, 6_084_592, 50_038_648]);
        assert_eq!(quote.admin_fees(), &[28_059_463, 3_042_296, 25_019_324]);

        let Ok(mint) = pool.add_liquidity(&amounts) else {
            panic!("deposit should succeed");
        };
        assert_eq!(mint, 1_160_847_381_244);
        assert_eq!(mint, quote.token_amount());
        assert_eq!(
            pool.balances(),
            &[
                1_512_922_752_123_376,
                1_932_895_121_041_402,
                1_724_082_067_217_800
            ]
        );
        assert_eq!(pool.admin_balances(), quote.admin_fees());
        assert_eq!(pool.token_supply(), SUPPLY3 + mint);
    }

    #[test]
    fn deposit_below_minimum_mint_rejected() {
        let mut pool = pool3();
        let before = pool.clone();
        let amounts = [1_000_000_000_000, 500_000_000_000, 0];
        assert_eq!(
            pool.add_liquidity_checked(&amounts, 1_160_847_381_245),
            Err(CurveError::SlippageExceeded {
                minimum: 1_160_847_381_245,
                actual: 1_160_847_381_244
            })
        );
        assert_eq!(pool, before);
        assert_eq!(
            pool.add_liquidity_checked(&amounts, 1_160_847_381_244),
            Ok(1_160_847_381_244)
        );
    }

    #[test]
    fn empty_deposit_rejected() {
        let mut pool = pool3();
        let before = pool.clone();
        assert_eq!(
            pool.add_liquidity(&[0, 0, 0]),
            Err(CurveError::ZeroAmount("lp mint"))
        );
        assert_eq!(pool, before);
    }

    #[test]
    fn dust_deposit_minting_nothing_rejected() {
        let mut pool = make_pool(200, 4, 5_000, vec![BASE, BASE], 1);
        let before = pool.clone();
        assert_eq!(
            pool.add_liquidity(&[1, 0]),
            Err(CurveError::ZeroAmount("lp mint"))
        );
        assert_eq!(pool, before);
    }

    #[test]
    fn calc_add_liquidity_is_read_only() {
        let pool = pool3();
        let before = pool.clone();
        assert!(pool.calc_add_liquidity(&[1_000, 0, 0]).is_ok());
        assert_eq!(pool, before);
    }

    #[test]
    fn deposit_length_mismatch() {
        let mut pool = pool3();
        assert_eq!(
            pool.add_liquidity(&[1, 2]),
            Err(CurveError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn zero_fee_round_trip() {
        let mut pool = make_pool(200, 0, 0, vec![BASE, BASE], 2 * BASE);
        let Ok(mint) = pool.add_liquidity(&[BASE / 10, BASE / 10]) else {
            panic!("deposit should succeed");
        };
        let Ok(out) = pool.remove_liquidity(mint) else {
            panic!("withdrawal should succeed");
        };
        assert_eq!(out, vec![BASE / 10, BASE / 10]);
        assert_eq!(pool.balances(), &[BASE, BASE]);
        assert_eq!(pool.token_supply(), 2 * BASE);
    }

    #[test]
    fn proportional_withdrawal() {
        let mut pool = make_pool(200, 4, 5_000, vec![BASE, BASE], 2 * BASE);
        let Ok(out) = pool.remove_liquidity(BASE) else {
            panic!("withdrawal should succeed");
        };
        assert_eq!(out, vec![BASE / 2, BASE / 2]);
        assert_eq!(pool.balances(), &[BASE / 2, BASE / 2]);
        assert_eq!(pool.token_supply(), BASE);
    }

    #[test]
    fn withdrawal_above_supply_fails() {
        let mut pool = make_pool(200, 4, 5_000, vec![BASE, BASE], 2 * BASE);
        assert!(matches!(
            pool.remove_liquidity(2 * BASE + 1),
            Err(CurveError::Underflow(_))
        ));
        assert_eq!(pool.balances(), &[BASE, BASE]);
    }

    #[test]
    fn withdrawal_without_supply_fails() {
        let mut pool = make_pool(200, 4, 5_000, vec![BASE, BASE], 0);
        assert!(matches!(
            pool.remove_liquidity(1),
            Err(CurveError::DivisionByZero(_))
        ));
    }

    #[test]
    fn imbalanced_withdrawal_matches_reference() {
        let mut pool = pool3();
        let amounts = [1_000_000_000_000, 0, 200_000_000_000];
        let Ok(quote) = pool.calc_remove_liquidity_imbalance(&amounts) else {
            panic!("quote should succeed");
        };
        assert_eq!(quote.token_amount(), 928_875_932_287);
        assert_eq!(quote.fees(), &[64_894_079, 44_869_030, 20_032_129]);
        assert_eq!(quote.admin_fees(), &[32_447_039, 22_434_515, 10_016_064]);

        let Ok(burn) = pool.remove_liquidity_imbalance(&amounts) else {
            panic!("withdrawal should succeed");
        };
        assert_eq!(burn, 928_875_932_287);
        assert_eq!(
            pool.balances(),
            &[
                1_510_922_747_735_800,
                1_932_395_101_649_183,
                1_723_882_082_221_060
            ]
        );
        assert_eq!(pool.admin_balances(), quote.admin_fees());
        assert_eq!(pool.token_supply(), SUPPLY3 - burn);
    }

    #[test]
    fn imbalanced_withdrawal_above_balance_fails() {
        let mut pool = pool3();
        let before = pool.clone();
        assert!(matches!(
            pool.remove_liquidity_imbalance(&[B3[0] + 1, 0, 0]),
            Err(CurveError::Underflow(_))
        ));
        assert_eq!(pool, before);
    }

    #[test]
    fn one_coin_quote_matches_reference() {
        assert_eq!(
            pool3().calc_withdraw_one_coin(10_000_000_000_000, 1),
            Ok(12_920_079_406_187)
        );
    }

    #[test]
    fn one_coin_withdrawal_commits() {
        let mut pool = pool3();
        let Ok(amount) = pool.remove_liquidity_one_coin(10_000_000_000_000, 1, 0) else {
            panic!("withdrawal should succeed");
        };
        assert_eq!(amount, 12_920_079_406_187);
        assert_eq!(pool.balances(), &[B3[0], 1_919_474_235_607_210, B3[2]]);
        assert_eq!(pool.admin_balances(), &[0, 809_070_301, 0]);
        assert_eq!(pool.token_supply(), SUPPLY3 - 10_000_000_000_000);
    }

    #[test]
    fn one_coin_slippage_guard() {
        let mut pool = pool3();
        let before = pool.clone();
        assert_eq!(
            pool.remove_liquidity_one_coin(10_000_000_000_000, 1, 12_920_079_406_188),
            Err(CurveError::SlippageExceeded {
                minimum: 12_920_079_406_188,
                actual: 12_920_079_406_187
            })
        );
        assert_eq!(pool, before);
    }

    #[test]
    fn one_coin_invalid_asset() {
        assert_eq!(
            pool3().calc_withdraw_one_coin(1_000, 3),
            Err(CurveError::InvalidAsset { index: 3, n: 3 })
        );
    }

    #[test]
    fn one_coin_without_supply_fails() {
        let pool = make_pool(200, 4, 5_000, vec![BASE, BASE], 0);
        assert!(matches!(
            pool.calc_withdraw_one_coin(1_000, 0),
            Err(CurveError::DivisionByZero(_))
        ));
    }
}
