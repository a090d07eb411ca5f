//! In-memory reference ledger.
//!
//! Stands in for the asset contracts a deployment would point at: a plain
//! balance map with a mint entry point for seeding accounts. Used by the
//! demo binary and throughout the test suite.

use std::collections::HashMap;

use alloy::primitives::U256;

use crate::pool::token::AccountId;

use super::{LedgerError, RewardMinter, TokenLedger};

/// A HashMap-backed asset ledger.
pub struct InMemoryLedger {
    /// Asset tag used in log lines.
    symbol: String,
    /// Holder balances; absent means zero.
    balances: HashMap<AccountId, U256>,
}

impl InMemoryLedger {
    /// Creates an empty ledger for the asset tagged `symbol`.
    #[must_use]
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            balances: HashMap::new(),
        }
    }

    /// Asset tag this ledger was created with.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Moves `amount` between two accounts, debiting `from` first.
    fn do_transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: U256,
    ) -> Result<(), LedgerError> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from,
                available,
                requested: amount,
            });
        }
        self.balances.insert(from, available - amount);
        let credited = self.balance_of(to).saturating_add(amount);
        self.balances.insert(to, credited);
        Ok(())
    }
}

impl TokenLedger for InMemoryLedger {
    fn balance_of(&self, holder: AccountId) -> U256 {
        self.balances.get(&holder).copied().unwrap_or_default()
    }

    fn transfer_from(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.do_transfer(from, to, amount)
    }

    fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.do_transfer(from, to, amount)
    }
}

impl RewardMinter for InMemoryLedger {
    fn mint(&mut self, to: AccountId, amount: U256) -> Result<(), LedgerError> {
        let credited = self.balance_of(to).saturating_add(amount);
        self.balances.insert(to, credited);
        log::debug!("{} mint: to={to:?} amount={amount}", self.symbol);
        Ok(())
    }
}
