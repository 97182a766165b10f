//! Construction of pool state from a validated configuration.
//!
//! Implementations must validate the configuration and compute any
//! derived starting values during construction, so a successfully built
//! value is always in a usable initial state.

use crate::error::Result;

/// Builds a value from its configuration blueprint.
///
/// There is no blanket implementation: each state type implements the
/// trait for the configuration it accepts.
///
/// # Implementors
///
/// - `impl FromConfig<PoolConfig> for PoolState`
///
/// # Errors
///
/// Returns [`CurveError::InvalidConfiguration`](crate::error::CurveError::InvalidConfiguration)
/// or [`CurveError::LengthMismatch`](crate::error::CurveError::LengthMismatch)
/// if the configuration is invalid, and propagates arithmetic errors from
/// resolving the starting balances.
pub trait FromConfig<C> {
    /// Creates a new instance from the given configuration.
    ///
    /// The configuration is borrowed so one fixture can seed many pools.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn from_config(config: &C) -> Result<Self>
    where
        Self: Sized;
}
