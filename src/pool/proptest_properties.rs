//! Property-based tests for the pool model.
//!
//! 1. **Balanced identity**: equal balances give `D = sum` for any `A`.
//! 2. **Permutation symmetry**: rotating assets together with their price
//!    scales moves `D` by at most 1.
//! 3. **Fee-free round trip**: a proportional deposit followed by burning
//!    the minted tokens returns the deposit, less at most 1 unit.
//! 4. **Proportional removal**: each asset pays out `balance * amount / supply`.
//! 5. **Swap bounds**: on a balanced pair `0 < out < dx`.
//! 6. **Failure atomicity**: a rejected command, including a slippage or
//!    zero-mint rejection, leaves the state unchanged.

#![allow(clippy::panic)]

use proptest::prelude::*;

use crate::config::{InitialBalances, PoolConfig};
use crate::domain::{Amplification, FeeRate, PriceScale};
use crate::math::mul_div;
use crate::traits::{FromConfig, LiquidityPool, SwapPool};

use super::PoolState;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn make_pool(amp: u128, fee: u32, balances: Vec<u128>, supply: u128) -> PoolState {
    let Ok(amp) = Amplification::new(amp) else {
        panic!("valid amplification");
    };
    let Ok(cfg) = PoolConfig::new(
        balances.len(),
        amp,
        FeeRate::new(fee),
        FeeRate::new(5_000),
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

fn make_scaled_pool(amp: u128, balances: Vec<u128>, scales: &[u128]) -> PoolState {
    let Ok(amp) = Amplification::new(amp) else {
        panic!("valid amplification");
    };
    let Ok(scales) = scales
        .iter()
        .map(|s| PriceScale::new(*s))
        .collect::<crate::error::Result<Vec<_>>>()
    else {
        panic!("valid price scales");
    };
    let Ok(cfg) = PoolConfig::new(
        balances.len(),
        amp,
        FeeRate::new(4),
        FeeRate::ZERO,
        InitialBalances::Explicit(balances),
    ) else {
        panic!("valid config");
    };
    let Ok(cfg) = cfg.with_price_scales(scales) else {
        panic!("valid config");
    };
    let Ok(pool) = PoolState::from_config(&cfg) else {
        panic!("valid pool");
    };
    pool
}

fn amplification_strategy() -> impl Strategy<Value = u128> {
    1u128..=5_000u128
}

/// Native balances between 0.001 and 1 000 000 units of an 18-decimal asset.
fn balance_strategy() -> impl Strategy<Value = u128> {
    1_000_000_000_000_000u128..=1_000_000_000_000_000_000_000_000u128
}

/// Three price scales between 0.5 and 2.
fn scale_strategy() -> impl Strategy<Value = Vec<u128>> {
    prop::collection::vec(
        500_000_000_000_000_000u128..=2_000_000_000_000_000_000u128,
        3,
    )
}

/// Three balances within a factor of 1 000 of each other.
fn clustered_balances() -> impl Strategy<Value = Vec<u128>> {
    (balance_strategy(), prop::collection::vec(1u128..=1_000u128, 3)).prop_map(
        |(base, factors)| factors.into_iter().map(|f| base / 1_000 * f).collect(),
    )
}

// ---------------------------------------------------------------------------
// Property 1: Balanced identity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_balanced_pool_d_equals_sum(
        balance in balance_strategy(),
        n in 2usize..=4usize,
        amp in amplification_strategy(),
    ) {
        let pool = make_pool(amp, 4, vec![balance; n], 0);
        prop_assert_eq!(pool.d(), Ok(balance * n as u128));
    }
}

// ---------------------------------------------------------------------------
// Property 2: Permutation symmetry
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_d_symmetric_under_rotation(
        balances in clustered_balances(),
        scales in scale_strategy(),
        amp in amplification_strategy(),
    ) {
        let Ok(d) = make_scaled_pool(amp, balances.clone(), &scales).d() else {
            return Ok(());
        };
        for shift in 1..balances.len() {
            let mut rotated = balances.clone();
            let mut rotated_scales = scales.clone();
            rotated.rotate_left(shift);
            rotated_scales.rotate_left(shift);
            let Ok(d_rotated) = make_scaled_pool(amp, rotated, &rotated_scales).d() else {
                return Ok(());
            };
            prop_assert!(
                d.abs_diff(d_rotated) <= 1,
                "rotation by {} moved D: {} vs {}",
                shift, d, d_rotated
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Fee-free round trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_fee_free_round_trip(
        b0 in balance_strategy(),
        ratio in 50u128..=200u128,
        percent in 1u128..=100u128,
        amp in amplification_strategy(),
    ) {
        let b1 = b0 / 100 * ratio;
        let Ok(supply) = make_pool(amp, 0, vec![b0, b1], 0).d() else {
            return Ok(());
        };
        let mut pool = make_pool(amp, 0, vec![b0, b1], supply);
        let deposit = [b0 * percent / 100, b1 * percent / 100];

        let Ok(mint) = pool.add_liquidity(&deposit) else {
            return Ok(());
        };
        let Ok(withdrawn) = pool.remove_liquidity(mint) else {
            return Ok(());
        };
        for (out, put) in withdrawn.iter().zip(deposit) {
            prop_assert!(*out <= put, "withdrew more than deposited: {} > {}", out, put);
            prop_assert!(put - out <= 1, "round trip lost {} units", put - out);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 4: Proportional removal
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_remove_liquidity_is_proportional(
        b0 in balance_strategy(),
        b1 in balance_strategy(),
        supply in balance_strategy(),
        share in 1u128..=1_000u128,
    ) {
        let amount = supply / 1_000 * share;
        let mut pool = make_pool(100, 4, vec![b0, b1], supply);
        let Ok(withdrawn) = pool.remove_liquidity(amount) else {
            return Ok(());
        };
        prop_assert_eq!(Ok(withdrawn[0]), mul_div(b0, amount, supply, "share"));
        prop_assert_eq!(Ok(withdrawn[1]), mul_div(b1, amount, supply, "share"));
        prop_assert_eq!(pool.balances()[0] + withdrawn[0], b0);
        prop_assert_eq!(pool.balances()[1] + withdrawn[1], b1);
        prop_assert_eq!(pool.token_supply(), supply - amount);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Swap bounds
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_output_below_input(
        balance in balance_strategy(),
        fraction in 2u128..=1_000u128,
        fee in 1u32..=100u32,
        amp in amplification_strategy(),
    ) {
        let dx = balance / fraction;
        let mut pool = make_pool(amp, fee, vec![balance, balance], 0);
        let Ok(out) = pool.swap(0, 1, dx) else {
            return Ok(());
        };
        prop_assert!(out > 0, "swap of {} paid nothing", dx);
        prop_assert!(out < dx, "swap paid {} for {}", out, dx);
    }
}

// ---------------------------------------------------------------------------
// Property 6: Failure atomicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_failed_commands_leave_state(
        b0 in balance_strategy(),
        b1 in balance_strategy(),
        supply in balance_strategy(),
        excess in 1u128..=1_000_000u128,
    ) {
        let mut pool = make_pool(200, 4, vec![b0, b1], supply);
        let before = pool.clone();

        prop_assert!(pool.remove_liquidity(supply + excess).is_err());
        prop_assert!(pool.remove_liquidity_imbalance(&[b0 + excess, 0]).is_err());
        prop_assert!(pool.swap(0, 2, excess).is_err());
        prop_assert!(pool.swap(1, 1, excess).is_err());
        prop_assert!(pool.add_liquidity(&[excess]).is_err());
        prop_assert!(pool.remove_liquidity_one_coin(1, 0, u128::MAX).is_err());
        prop_assert!(pool.swap_checked(0, 1, b0 / 1_000, u128::MAX).is_err());
        prop_assert!(pool.add_liquidity_checked(&[b0 / 1_000, b1 / 1_000], u128::MAX).is_err());
        prop_assert!(pool.add_liquidity(&[0, 0]).is_err());
        prop_assert_eq!(pool, before);
    }
}
