//! Solving for a single balance against a fixed invariant.
//!
//! With every balance but one held fixed, the invariant reduces to a
//! quadratic in the free balance `y`:
//!
//! ```text
//! y² + (S' + D/Ann − D)·y = c,    c = D^(n+1) / (nⁿ · Π' · Ann)
//! ```
//!
//! where `S'` and `Π'` range over the fixed balances. It is solved by
//! the fixed-point iteration `y ← (y² + c) / (2y + b − D)` with
//! `b = S' + D/Ann`, starting from `y = D`.

use primitive_types::U256;

use super::checked::{abs_diff, narrow, CheckedWide};
use super::CONVERGENCE_THRESHOLD;
use crate::domain::Amplification;
use crate::error::{CurveError, Result};

/// Solves for the balance of asset `j` after asset `i` is set to
/// `new_xi`, holding every other balance in `xp` and the invariant `d`
/// fixed.
///
/// All quantities are price-scaled.
///
/// # Errors
///
/// - [`CurveError::InvalidAsset`] / [`CurveError::IdenticalAssets`] for bad
///   indices.
/// - [`CurveError::DivisionByZero`] if a fixed balance is zero.
/// - [`CurveError::Underflow`] if the iteration denominator turns negative.
/// - [`CurveError::ConvergenceFailure`] if the bound is exhausted.
pub fn solve_for_output(
    i: usize,
    j: usize,
    new_xi: u128,
    xp: &[u128],
    d: u128,
    amp: Amplification,
    max_iterations: u32,
) -> Result<u128> {
    let n = xp.len();
    check_index(i, n)?;
    check_index(j, n)?;
    if i == j {
        return Err(CurveError::IdenticalAssets(i));
    }

    let fixed: Vec<u128> = xp
        .iter()
        .enumerate()
        .filter(|&(k, _)| k != j)
        .map(|(k, &x)| if k == i { new_xi } else { x })
        .collect();
    solve_quadratic(&fixed, n, d, amp, max_iterations, "solve_for_output")
}

/// Solves for the balance of asset `i` that makes the invariant equal
/// `target_d`, holding every other balance in `xp` fixed.
///
/// # Errors
///
/// Same as [`solve_for_output`].
pub fn solve_for_target_d(
    i: usize,
    xp: &[u128],
    target_d: u128,
    amp: Amplification,
    max_iterations: u32,
) -> Result<u128> {
    let n = xp.len();
    check_index(i, n)?;

    let fixed: Vec<u128> = xp
        .iter()
        .enumerate()
        .filter(|&(k, _)| k != i)
        .map(|(_, &x)| x)
        .collect();
    solve_quadratic(&fixed, n, target_d, amp, max_iterations, "solve_for_target_d")
}

fn check_index(index: usize, n: usize) -> Result<()> {
    if index >= n {
        return Err(CurveError::InvalidAsset { index, n });
    }
    Ok(())
}

/// Shared iteration. `fixed` holds the `n − 1` balances that do not move.
fn solve_quadratic(
    fixed: &[u128],
    n: usize,
    d: u128,
    amp: Amplification,
    max_iterations: u32,
    solver: &'static str,
) -> Result<u128> {
    if n < 2 {
        return Err(CurveError::InvalidConfiguration(
            "solve needs at least two balances",
        ));
    }
    let n_w = U256::from(n);
    let ann = U256::from(amp.ann(n)?);
    let d_w = U256::from(d);

    let mut c = d_w;
    let mut s = U256::zero();
    for &x in fixed {
        if x == 0 {
            return Err(CurveError::DivisionByZero("y: zero fixed balance"));
        }
        s = s.safe_add(U256::from(x), "y: sum overflow")?;
        let nx = U256::from(x).safe_mul(n_w, "y: x·n")?;
        c = c.safe_mul(d_w, "y: c·D")?.safe_div(nx, "y: c fold")?;
    }
    let n_ann = n_w.safe_mul(ann, "y: n·Ann")?;
    c = c.safe_mul(d_w, "y: c·D")?.safe_div(n_ann, "y: c final")?;
    let b = s.safe_add(d_w.safe_div(ann, "y: D / Ann")?, "y: b")?;

    // The first convergence test compares D against an implicit y = 0.
    if d_w <= U256::from(CONVERGENCE_THRESHOLD) {
        return Ok(d);
    }

    let two = U256::from(2u8);
    let mut y = d_w;
    for iteration in 0..max_iterations {
        let y_prev = y;
        let numerator = y
            .safe_mul(y, "y: y²")?
            .safe_add(c, "y: y² + c")?;
        let denominator = two
            .safe_mul(y, "y: 2y")?
            .safe_add(b, "y: 2y + b")?
            .safe_sub(d_w, "y: denominator below zero")?;
        if denominator.is_zero() {
            return Err(CurveError::DivisionByZero("y: zero denominator"));
        }
        y = numerator / denominator;

        if abs_diff(y, y_prev) <= U256::from(CONVERGENCE_THRESHOLD) {
            tracing::trace!(solver, iterations = iteration + 1, "balance solve converged");
            return narrow(y, "y exceeds u128");
        }
    }

    tracing::warn!(solver, max_iterations, n, "balance solve did not converge");
    Err(CurveError::ConvergenceFailure {
        solver,
        iterations: max_iterations,
    })
}
