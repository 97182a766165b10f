//! Integer solvers for the StableSwap invariant.
//!
//! All solvers are pure functions of their arguments. Intermediates are
//! 256-bit and every division truncates toward zero in the exact order
//! the reference contract uses, so results are bit-for-bit reproducible.
//!
//! | Function | Solves for |
//! |----------|------------|
//! | [`compute_d`] | invariant `D` from price-scaled balances |
//! | [`solve_for_output`] | balance `j` after balance `i` moves |
//! | [`solve_for_target_d`] | balance `i` that yields a target `D` |

mod checked;
mod invariant;
mod solver;

pub use checked::{abs_diff, mul_div, narrow, CheckedWide};
pub use invariant::compute_d;
pub use solver::{solve_for_output, solve_for_target_d};

/// Default iteration bound for every fixed-point solve.
pub const MAX_ITERATIONS: u32 = 255;

/// Two consecutive iterates closer than this are converged.
pub(crate) const CONVERGENCE_THRESHOLD: u128 = 1;
