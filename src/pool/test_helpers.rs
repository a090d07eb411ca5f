use std::sync::Arc;

use alloy::primitives::{Address, U256};

use crate::ledger::{InMemoryLedger, RewardMinter};
use crate::utils::clock::ManualClock;
use crate::utils::constants::{POOL_ACCOUNT, WAD};

use super::pool::Pool;
use super::token::{AccountId, TokenId};

/// `units` whole tokens at 18-decimal scale.
#[allow(dead_code)]
pub fn wad(units: u64) -> U256 {
    U256::from(units) * WAD
}

#[allow(dead_code)]
pub fn account(tag: &str) -> AccountId {
    AccountId::from(Address::left_padding_from(tag.as_bytes()))
}

#[allow(dead_code)]
pub fn token(tag: &str) -> TokenId {
    TokenId::from(Address::left_padding_from(tag.as_bytes()))
}

/// A fresh WETH/ACH pool over in-memory ledgers with a frozen manual
/// clock. Every listed account is airdropped 1,000,000 of both tokens, the
/// way the original fixtures seed their players.
#[allow(dead_code)]
#[allow(clippy::unwrap_used)]
pub fn deployment(
    accounts: &[&str],
) -> (Pool, InMemoryLedger, InMemoryLedger, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(0));
    let pool = Pool::new(
        AccountId::from(POOL_ACCOUNT),
        token("WETH"),
        token("ACH"),
        clock.clone(),
    )
    .unwrap();

    let mut weth = InMemoryLedger::new("WETH");
    let mut ach = InMemoryLedger::new("ACH");
    for tag in accounts {
        weth.mint(account(tag), wad(1_000_000)).unwrap();
        ach.mint(account(tag), wad(1_000_000)).unwrap();
    }
    (pool, weth, ach, clock)
}
