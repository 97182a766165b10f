//! Outcome of a direct two-asset exchange.

/// A fully computed exchange, ready to be committed.
///
/// Amounts are in native units. `balance_in` / `balance_out` are the
/// balances the pool holds for the input and output assets once the
/// swap is applied; the trade fee stays in `balance_out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapOutcome {
    amount_out: u128,
    fee: u128,
    balance_in: u128,
    balance_out: u128,
}

impl SwapOutcome {
    pub(crate) const fn new(
        amount_out: u128,
        fee: u128,
        balance_in: u128,
        balance_out: u128,
    ) -> Self {
        Self {
            amount_out,
            fee,
            balance_in,
            balance_out,
        }
    }

    /// Amount paid to the trader, after the trade fee.
    #[must_use]
    pub const fn amount_out(&self) -> u128 {
        self.amount_out
    }

    /// Trade fee retained by the pool, in native units of the output asset.
    #[must_use]
    pub const fn fee(&self) -> u128 {
        self.fee
    }

    /// New balance of the input asset.
    #[must_use]
    pub const fn balance_in(&self) -> u128 {
        self.balance_in
    }

    /// New balance of the output asset.
    #[must_use]
    pub const fn balance_out(&self) -> u128 {
        self.balance_out
    }
}
