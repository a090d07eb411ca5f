//! External collaborator seam: token custody and reward minting.
//!
//! The pool never owns asset balances itself. Each of the two underlying
//! assets lives in a [`TokenLedger`], and reward payout goes through a
//! [`RewardMinter`]. Both are injected per call, so the engine can run
//! against the in-memory reference ledger in tests and the demo binary, or
//! against any other custody backend.

/// In-memory reference ledger
mod memory;

pub use memory::InMemoryLedger;

use alloy::primitives::U256;

use crate::pool::token::AccountId;

/// Errors surfaced by ledger capabilities.
///
/// A ledger failure always fails the whole pool operation that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The source account does not hold enough of the asset.
    #[error("insufficient balance: {account} holds {available}, needs {requested}")]
    InsufficientBalance {
        /// Account the transfer would debit.
        account: AccountId,
        /// Balance the account actually holds.
        available: U256,
        /// Amount the transfer asked for.
        requested: U256,
    },
}

/// Balance custody for one underlying asset.
///
/// `transfer_from` is the pull leg (spending the source's funds on the
/// caller's authority); `transfer` is the push leg (the source spending its
/// own funds). The reference ledger treats them identically since the
/// engine has no ambient caller identity, but implementations backed by a
/// real asset contract may enforce different authority on each.
pub trait TokenLedger {
    /// Current balance of `holder`.
    fn balance_of(&self, holder: AccountId) -> U256;

    /// Move `amount` from `from` to `to`, pulling on the caller's authority.
    ///
    /// # Errors
    /// * [`LedgerError::InsufficientBalance`] if `from` holds less than `amount`
    fn transfer_from(&mut self, from: AccountId, to: AccountId, amount: U256)
        -> Result<(), LedgerError>;

    /// Move `amount` from `from` to `to`, the source spending its own funds.
    ///
    /// # Errors
    /// * [`LedgerError::InsufficientBalance`] if `from` holds less than `amount`
    fn transfer(&mut self, from: AccountId, to: AccountId, amount: U256)
        -> Result<(), LedgerError>;
}

/// Mint capability for the reward token. Invoked only when rewards are
/// claimed.
pub trait RewardMinter {
    /// Create `amount` new units of the reward token for `to`.
    ///
    /// # Errors
    /// * Implementation-defined; the reference ledger never fails a mint
    fn mint(&mut self, to: AccountId, amount: U256) -> Result<(), LedgerError>;
}

/// The two asset ledgers one pool operation may touch, bundled so call
/// sites read like the deployment they model.
pub struct Vaults<'a> {
    /// Ledger of the base asset (token0).
    pub token0: &'a mut dyn TokenLedger,
    /// Ledger of the reward-bearing asset (token1).
    pub token1: &'a mut dyn TokenLedger,
}
