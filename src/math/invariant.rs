//! StableSwap invariant `D` via fixed-point iteration.
//!
//! ```text
//! A·nⁿ·Σx + D = A·D·nⁿ + D^(n+1) / (nⁿ·Πx)
//! ```
//!
//! Iterated as
//!
//! ```text
//! D_P    = D · D/(n·x₀) · D/(n·x₁) · …      (truncating after every fold)
//! D_next = (Ann·S + n·D_P) · D / ((Ann − 1)·D + (n + 1)·D_P)
//! ```
//!
//! with `Ann = A·n` (A is stored pre-multiplied by `n^(n-1)`).

use primitive_types::U256;

use super::checked::{abs_diff, narrow, CheckedWide};
use super::CONVERGENCE_THRESHOLD;
use crate::domain::Amplification;
use crate::error::{CurveError, Result};

/// Computes the invariant `D` of a set of price-scaled balances.
///
/// An all-zero pool has `D = 0`. Otherwise every balance must be
/// positive.
///
/// # Errors
///
/// - [`CurveError::InvalidConfiguration`] for fewer than two balances.
/// - [`CurveError::DivisionByZero`] if a balance is zero in a non-empty pool.
/// - [`CurveError::ConvergenceFailure`] if `|D_next − D| ≤ 1` is not
///   reached within `max_iterations`.
/// - [`CurveError::Overflow`] if an intermediate exceeds 256 bits or `D`
///   exceeds `u128`.
///
/// # Examples
///
/// ```
/// use stableswap_model::domain::Amplification;
/// use stableswap_model::math::{compute_d, MAX_ITERATIONS};
///
/// let amp = Amplification::new(200).expect("valid");
/// let one = 1_000_000_000_000_000_000u128;
/// assert_eq!(compute_d(&[one, one], amp, MAX_ITERATIONS), Ok(2 * one));
/// ```
pub fn compute_d(xp: &[u128], amp: Amplification, max_iterations: u32) -> Result<u128> {
    let n = xp.len();
    if n < 2 {
        return Err(CurveError::InvalidConfiguration(
            "invariant needs at least two balances",
        ));
    }

    let s = xp.iter().try_fold(U256::zero(), |acc, &x| {
        acc.safe_add(U256::from(x), "D: sum overflow")
    })?;
    if s.is_zero() {
        return Ok(0);
    }
    if xp.contains(&0) {
        return Err(CurveError::DivisionByZero(
            "D: zero price-scaled balance",
        ));
    }

    let n_w = U256::from(n);
    let ann = U256::from(amp.ann(n)?);
    let ann_minus_one = ann.safe_sub(U256::one(), "D: Ann - 1")?;
    let n_plus_one = n_w.safe_add(U256::one(), "D: n + 1")?;
    let ann_s = ann.safe_mul(s, "D: Ann·S")?;

    let mut d = s;
    for iteration in 0..max_iterations {
        let mut d_p = d;
        for &x in xp {
            let nx = n_w.safe_mul(U256::from(x), "D: n·x")?;
            d_p = d_p.safe_mul(d, "D: D_P·D")?.safe_div(nx, "D: D_P fold")?;
        }

        let d_prev = d;
        let numerator = ann_s
            .safe_add(d_p.safe_mul(n_w, "D: n·D_P")?, "D: numerator sum")?
            .safe_mul(d, "D: numerator")?;
        let denominator = ann_minus_one
            .safe_mul(d, "D: (Ann - 1)·D")?
            .safe_add(n_plus_one.safe_mul(d_p, "D: (n + 1)·D_P")?, "D: denominator")?;
        d = numerator.safe_div(denominator, "D: denominator")?;

        if abs_diff(d, d_prev) <= U256::from(CONVERGENCE_THRESHOLD) {
            tracing::trace!(iterations = iteration + 1, "invariant converged");
            return narrow(d, "D exceeds u128");
        }
    }

    tracing::warn!(max_iterations, n, "invariant solve did not converge");
    Err(CurveError::ConvergenceFailure {
        solver: "compute_d",
        iterations: max_iterations,
    })
}
