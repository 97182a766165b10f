//! Direct two-asset exchange against the curve.
//!
//! # Algorithm
//!
//! 1. `x_new = xp[i] + dx * p[i] / BASE`.
//! 2. Solve for `y`, the output asset's price-scaled balance, at the
//!    current `D`.
//! 3. `dy = xp[j] - y - 1` (the extra unit rounds in the pool's favour).
//! 4. `fee = dy * fee / FEE_DENOMINATOR`, kept in the output balance.
//! 5. Pay out `(dy - fee) * BASE / p[j]`.
//!
//! The reverse quote runs the solve from the output side: the target
//! output is grossed up for the fee, removed from `xp[j]`, and the input
//! balance solved for, plus one unit.

use tracing::debug;

use crate::domain::{SwapOutcome, FEE_DENOMINATOR};
use crate::error::{CurveError, Result};
use crate::math::{compute_d, mul_div, solve_for_output};
use crate::traits::SwapPool;

use super::PoolState;

impl PoolState {
    fn check_pair(&self, i: usize, j: usize) -> Result<()> {
        self.check_index(i)?;
        self.check_index(j)?;
        if i == j {
            return Err(CurveError::IdenticalAssets(i));
        }
        Ok(())
    }
}

impl SwapPool for PoolState {
    fn swap(&mut self, i: usize, j: usize, dx: u128) -> Result<u128> {
        self.swap_checked(i, j, dx, 0)
    }

    fn swap_checked(
        &mut self,
        i: usize,
        j: usize,
        dx: u128,
        min_amount: u128,
    ) -> Result<u128> {
        let outcome = self.quote_swap(i, j, dx)?;
        if outcome.amount_out() < min_amount {
            return Err(CurveError::SlippageExceeded {
                minimum: min_amount,
                actual: outcome.amount_out(),
            });
        }
        self.balances[i] = outcome.balance_in();
        self.balances[j] = outcome.balance_out();
        debug!(
            i,
            j,
            dx,
            amount_out = outcome.amount_out(),
            fee = outcome.fee(),
            "swap committed"
        );
        Ok(outcome.amount_out())
    }

    fn quote_swap(&self, i: usize, j: usize, dx: u128) -> Result<SwapOutcome> {
        self.check_pair(i, j)?;
        let xp = self.xp()?;
        let d = compute_d(&xp, self.amplification, self.max_iterations)?;

        let x_new = xp[i]
            .checked_add(self.price_scales[i].to_scaled(dx)?)
            .ok_or(CurveError::Overflow("swap input balance"))?;
        let y = solve_for_output(
            i,
            j,
            x_new,
            &xp,
            d,
            self.amplification,
            self.max_iterations,
        )?;

        let dy = xp[j]
            .checked_sub(y)
            .and_then(|v| v.checked_sub(1))
            .ok_or(CurveError::NegativeOutput("swap output"))?;
        let fee = self.fee.apply(dy)?;

        let scale_in = self.price_scales[i];
        let scale_out = self.price_scales[j];
        let kept = y
            .checked_add(fee)
            .ok_or(CurveError::Overflow("swap output balance"))?;
        Ok(SwapOutcome::new(
            scale_out.to_native(dy - fee)?,
            scale_out.to_native(fee)?,
            scale_in.to_native(x_new)?,
            scale_out.to_native(kept)?,
        ))
    }

    fn quote_reverse_swap(&self, i: usize, j: usize, amount_out: u128) -> Result<u128> {
        self.check_pair(i, j)?;
        let xp = self.xp()?;
        let d = compute_d(&xp, self.amplification, self.max_iterations)?;

        let net_share = FEE_DENOMINATOR
            .checked_sub(u128::from(self.fee.get()))
            .ok_or(CurveError::Underflow("fee above denominator"))?;
        let gross = mul_div(
            self.price_scales[j].to_scaled(amount_out)?,
            FEE_DENOMINATOR,
            net_share,
            "reverse swap gross output",
        )?;
        let y_new = xp[j]
            .checked_sub(gross)
            .ok_or(CurveError::Underflow("reverse swap output exceeds balance"))?;
        let x = solve_for_output(
            j,
            i,
            y_new,
            &xp,
            d,
            self.amplification,
            self.max_iterations,
        )?;

        let dx = x
            .checked_sub(xp[i])
            .and_then(|v| v.checked_add(1))
            .ok_or(CurveError::NegativeOutput("reverse swap input"))?;
        self.price_scales[i].to_native(dx)
    }

    fn get_dy(&self, i: usize, j: usize, dx: u128) -> Result<u128> {
        self.check_pair(i, j)?;
        let xp = self.xp()?;
        let d = compute_d(&xp, self.amplification, self.max_iterations)?;
        let x_new = xp[i]
            .checked_add(dx)
            .ok_or(CurveError::Overflow("swap input balance"))?;
        let y = solve_for_output(
            i,
            j,
            x_new,
            &xp,
            d,
            self.amplification,
            self.max_iterations,
        )?;
        xp[j]
            .checked_sub(y)
            .ok_or(CurveError::NegativeOutput("curve output"))
    }
}
