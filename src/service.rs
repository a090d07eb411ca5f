//! Single-writer access to a pool deployment.
//!
//! The reference platform executes state-changing operations atomically and
//! sequentially: no two operations ever observe or mutate pool state
//! concurrently. [`PoolService`] reproduces that here — one mutex guards
//! the pool together with both asset ledgers, and every public operation
//! runs to completion, ledger legs included, before the next one starts.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use alloy::primitives::U256;
use eyre::Error;
use log::info;

use crate::config::Config;
use crate::ledger::{InMemoryLedger, RewardMinter, Vaults};
use crate::pool::errors::Result;
use crate::pool::pool::Pool;
use crate::pool::token::{AccountId, TokenId};
use crate::utils::clock::Clock;
use crate::utils::constants::POOL_ACCOUNT;

/// A pool plus the in-memory ledgers it settles against.
struct Deployment {
    /// The pool aggregate.
    pool: Pool,
    /// Ledger of the base asset.
    token0: InMemoryLedger,
    /// Ledger of the reward-bearing asset; doubles as the reward minter.
    token1: InMemoryLedger,
}

/// Thread-safe, cloneable handle serializing every pool operation.
#[derive(Clone)]
pub struct PoolService {
    /// The guarded deployment.
    inner: Arc<Mutex<Deployment>>,
}

impl PoolService {
    /// Creates a deployment for the configured pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured pair uses the same token twice.
    pub fn new(config: &Config, clock: Arc<dyn Clock>) -> std::result::Result<Self, Error> {
        let pool = Pool::new(
            AccountId::from(POOL_ACCOUNT),
            config.token0,
            config.token1,
            clock,
        )?;
        info!(
            "deployed pool: token0={} ({}) token1={} ({})",
            config.symbol0, config.token0, config.symbol1, config.token1
        );
        Ok(Self {
            inner: Arc::new(Mutex::new(Deployment {
                pool,
                token0: InMemoryLedger::new(&config.symbol0),
                token1: InMemoryLedger::new(&config.symbol1),
            })),
        })
    }

    /// Locks the deployment, recovering the guard from a poisoned lock so
    /// a panicked writer cannot wedge the pool.
    fn lock(&self) -> MutexGuard<'_, Deployment> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds `holder` with balances of both assets.
    ///
    /// # Errors
    ///
    /// Never fails against the in-memory ledgers; kept fallible for parity
    /// with the ledger capability.
    pub fn airdrop(&self, holder: AccountId, amount0: U256, amount1: U256) -> Result<()> {
        let mut guard = self.lock();
        let deployment = &mut *guard;
        deployment.token0.mint(holder, amount0)?;
        deployment.token1.mint(holder, amount1)?;
        Ok(())
    }

    /// Deposits both assets and mints shares to `caller`.
    ///
    /// # Errors
    ///
    /// See [`Pool::add_liquidity`].
    pub fn add_liquidity(
        &self,
        caller: AccountId,
        amount0: U256,
        amount1: U256,
    ) -> Result<U256> {
        let mut guard = self.lock();
        let deployment = &mut *guard;
        let mut vaults = Vaults {
            token0: &mut deployment.token0,
            token1: &mut deployment.token1,
        };
        deployment
            .pool
            .add_liquidity(&mut vaults, caller, amount0, amount1)
    }

    /// Burns shares and pays out the proportional reserves.
    ///
    /// # Errors
    ///
    /// See [`Pool::remove_liquidity`].
    pub fn remove_liquidity(
        &self,
        caller: AccountId,
        share_amount: U256,
    ) -> Result<(U256, U256)> {
        let mut guard = self.lock();
        let deployment = &mut *guard;
        let mut vaults = Vaults {
            token0: &mut deployment.token0,
            token1: &mut deployment.token1,
        };
        deployment
            .pool
            .remove_liquidity(&mut vaults, caller, share_amount)
    }

    /// Sells `amount_in` of `token_in` to the pool.
    ///
    /// # Errors
    ///
    /// See [`Pool::swap`].
    pub fn swap(&self, caller: AccountId, token_in: TokenId, amount_in: U256) -> Result<U256> {
        let mut guard = self.lock();
        let deployment = &mut *guard;
        let mut vaults = Vaults {
            token0: &mut deployment.token0,
            token1: &mut deployment.token1,
        };
        deployment.pool.swap(&mut vaults, caller, token_in, amount_in)
    }

    /// Claims the caller's accrued reward, minted in the reward token.
    ///
    /// # Errors
    ///
    /// See [`Pool::get_reward`].
    pub fn get_reward(&self, caller: AccountId) -> Result<U256> {
        let mut guard = self.lock();
        let deployment = &mut *guard;
        deployment.pool.get_reward(&mut deployment.token1, caller)
    }

    // ── Views ────────────────────────────────────────────────────────────────

    /// Current reserves as `(reserve0, reserve1)`.
    #[must_use]
    pub fn reserves(&self) -> (U256, U256) {
        let deployment = self.lock();
        (deployment.pool.reserve0(), deployment.pool.reserve1())
    }

    /// Sum of all holder shares.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.lock().pool.total_supply()
    }

    /// Share balance of `holder`.
    #[must_use]
    pub fn balance_of(&self, holder: AccountId) -> U256 {
        self.lock().pool.balance_of(holder)
    }

    /// Current reward-per-share accumulator value.
    #[must_use]
    pub fn reward_per_share(&self) -> U256 {
        self.lock().pool.reward_per_share()
    }

    /// Reward `holder` could claim right now.
    #[must_use]
    pub fn earned(&self, holder: AccountId) -> U256 {
        self.lock().pool.earned(holder)
    }

    /// Ledger balances of `holder` as `(token0, token1)`.
    #[must_use]
    pub fn token_balances(&self, holder: AccountId) -> (U256, U256) {
        use crate::ledger::TokenLedger;
        let deployment = self.lock();
        (
            deployment.token0.balance_of(holder),
            deployment.token1.balance_of(holder),
        )
    }

    /// The token1 amount matching `amount0` at the current reserve ratio.
    ///
    /// # Errors
    ///
    /// See [`Pool::calculate_token1_amount`].
    pub fn calculate_token1_amount(&self, amount0: U256) -> Result<U256> {
        self.lock().pool.calculate_token1_amount(amount0)
    }

    /// The token0 amount matching `amount1` at the current reserve ratio.
    ///
    /// # Errors
    ///
    /// See [`Pool::calculate_token0_amount`].
    pub fn calculate_token0_amount(&self, amount1: U256) -> Result<U256> {
        self.lock().pool.calculate_token0_amount(amount1)
    }
}
