//! The liquidity pool aggregate.
//!
//! Owns the reserve and share ledgers for one token pair and executes the
//! four mutators: deposit, withdrawal, swap, reward claim. Every mutator is
//! staged: validation and arithmetic happen first against a snapshot, then
//! the external ledger legs run, and only once nothing can fail any more is
//! the pool state committed. A failure at any point leaves pool and ledgers
//! exactly as they were.

use std::collections::HashMap;
use std::sync::Arc;

use alloy::primitives::U256;
use eyre::{bail, Error};
use log::debug;

use crate::ledger::{RewardMinter, TokenLedger, Vaults};
use crate::utils::clock::Clock;

use super::errors::{PoolError, Result};
use super::quote::{mul_div, ratio_matches, Direction, SwapQuote};
use super::rewards::RewardState;
use super::token::{AccountId, TokenId};

/// A two-asset constant-product pool with proportional share accounting
/// and time-weighted reward accrual.
pub struct Pool {
    /// Account holding the pooled reserves in the underlying ledgers.
    account: AccountId,
    /// The base asset.
    token0: TokenId,
    /// The reward-bearing asset.
    token1: TokenId,
    /// Pool balance of token0.
    reserve0: U256,
    /// Pool balance of token1.
    reserve1: U256,
    /// Sum of all holder shares.
    total_shares: U256,
    /// Share holdings per account.
    share_balance: HashMap<AccountId, U256>,
    /// Reward accumulator and per-holder settlement markers.
    rewards: RewardState,
    /// Time source for reward accrual.
    clock: Arc<dyn Clock>,
}

impl Pool {
    /// Creates an uninitialized pool for the given pair.
    ///
    /// # Errors
    ///
    /// Returns an error if both sides of the pair are the same token.
    pub fn new(
        account: AccountId,
        token0: TokenId,
        token1: TokenId,
        clock: Arc<dyn Clock>,
    ) -> std::result::Result<Self, Error> {
        if token0 == token1 {
            bail!("Pool token0 and token1 must be different");
        }
        let now = clock.now();
        Ok(Self {
            account,
            token0,
            token1,
            reserve0: U256::ZERO,
            reserve1: U256::ZERO,
            total_shares: U256::ZERO,
            share_balance: HashMap::new(),
            rewards: RewardState::new(now),
            clock,
        })
    }

    // ── Mutators ─────────────────────────────────────────────────────────────

    /// Deposits both assets and mints proportional shares to `caller`.
    ///
    /// The first deposit accepts any ratio and fixes the initial price;
    /// after that, deposits must match the reserve ratio exactly. The
    /// caller's reward position is settled before their share balance
    /// changes, so earnings accrued at the old balance are preserved.
    ///
    /// # Errors
    ///
    /// * [`PoolError::ZeroAmount`] if either amount is zero, or the
    ///   proportional share computation floors to zero
    /// * [`PoolError::RatioMismatch`] if the deposit skews the reserve ratio
    /// * [`PoolError::TransferFailure`] if either ledger pull fails
    /// * [`PoolError::Overflow`] on 256-bit overflow
    pub fn add_liquidity(
        &mut self,
        vaults: &mut Vaults<'_>,
        caller: AccountId,
        amount0: U256,
        amount1: U256,
    ) -> Result<U256> {
        if amount0.is_zero() || amount1.is_zero() {
            return Err(PoolError::ZeroAmount);
        }

        let shares = if self.total_shares.is_zero() {
            // First deposit: amounts are already 18-decimal scaled, so the
            // share supply starts at amount0 and the initial price is
            // amount1 / amount0.
            amount0
        } else {
            if !ratio_matches(self.reserve0, self.reserve1, amount0, amount1)? {
                return Err(PoolError::RatioMismatch);
            }
            mul_div(amount0, self.total_shares, self.reserve0)?
        };
        if shares.is_zero() {
            return Err(PoolError::ZeroAmount);
        }

        // Stage every post-state value before touching anything.
        let new_reserve0 = self
            .reserve0
            .checked_add(amount0)
            .ok_or(PoolError::Overflow)?;
        let new_reserve1 = self
            .reserve1
            .checked_add(amount1)
            .ok_or(PoolError::Overflow)?;
        let new_total = self
            .total_shares
            .checked_add(shares)
            .ok_or(PoolError::Overflow)?;
        let held = self.balance_of(caller);
        let new_held = held.checked_add(shares).ok_or(PoolError::Overflow)?;
        let settlement = self.rewards.settle(caller, held, self.clock.now());

        self.pull_pair(vaults, caller, amount0, amount1)?;

        self.rewards.apply(caller, &settlement);
        self.reserve0 = new_reserve0;
        self.reserve1 = new_reserve1;
        self.total_shares = new_total;
        self.share_balance.insert(caller, new_held);
        debug!("add_liquidity: caller={caller:?} amount0={amount0} amount1={amount1} shares={shares}");
        Ok(shares)
    }

    /// Burns `share_amount` of the caller's shares and pays out the
    /// proportional slice of both reserves (floor division; the remainder
    /// stays in the pool).
    ///
    /// # Errors
    ///
    /// * [`PoolError::ZeroAmount`] if `share_amount` is zero
    /// * [`PoolError::InsufficientShares`] if the caller holds fewer shares
    /// * [`PoolError::TransferFailure`] if either ledger push fails
    /// * [`PoolError::Overflow`] on 256-bit overflow
    pub fn remove_liquidity(
        &mut self,
        vaults: &mut Vaults<'_>,
        caller: AccountId,
        share_amount: U256,
    ) -> Result<(U256, U256)> {
        if share_amount.is_zero() {
            return Err(PoolError::ZeroAmount);
        }
        let held = self.balance_of(caller);
        if share_amount > held {
            return Err(PoolError::InsufficientShares {
                requested: share_amount,
                available: held,
            });
        }

        let amount0 = mul_div(self.reserve0, share_amount, self.total_shares)?;
        let amount1 = mul_div(self.reserve1, share_amount, self.total_shares)?;
        let settlement = self.rewards.settle(caller, held, self.clock.now());

        self.push_pair(vaults, caller, amount0, amount1)?;

        self.rewards.apply(caller, &settlement);
        // Payouts are floored slices of the reserves, so these cannot go
        // negative.
        self.reserve0 -= amount0;
        self.reserve1 -= amount1;
        self.total_shares -= share_amount;
        self.share_balance.insert(caller, held - share_amount);
        debug!(
            "remove_liquidity: caller={caller:?} shares={share_amount} amount0={amount0} amount1={amount1}"
        );
        Ok((amount0, amount1))
    }

    /// Sells `amount_in` of `token_in` to the pool at the fee-adjusted
    /// constant-product price and pays out the other token.
    ///
    /// Swapping never touches shares or the reward accumulator.
    ///
    /// # Errors
    ///
    /// * [`PoolError::UnknownToken`] if `token_in` is neither pool token
    /// * [`PoolError::ZeroAmount`] if `amount_in` is zero
    /// * [`PoolError::InsufficientLiquidity`] if the pool is empty or the
    ///   priced output would be zero or drain a reserve
    /// * [`PoolError::TransferFailure`] if a ledger leg fails
    /// * [`PoolError::Overflow`] on 256-bit overflow
    pub fn swap(
        &mut self,
        vaults: &mut Vaults<'_>,
        caller: AccountId,
        token_in: TokenId,
        amount_in: U256,
    ) -> Result<U256> {
        let direction = if token_in == self.token0 {
            Direction::ZeroForOne
        } else if token_in == self.token1 {
            Direction::OneForZero
        } else {
            return Err(PoolError::UnknownToken(token_in));
        };

        let (reserve_in, reserve_out) = match direction {
            Direction::ZeroForOne => (self.reserve0, self.reserve1),
            Direction::OneForZero => (self.reserve1, self.reserve0),
        };
        let quote = SwapQuote::new(reserve_in, reserve_out, amount_in)?;

        match direction {
            Direction::ZeroForOne => {
                self.exchange(vaults.token0, vaults.token1, caller, amount_in, quote.amount_out())?;
                self.reserve0 = quote.new_reserve_in();
                self.reserve1 = quote.new_reserve_out();
            }
            Direction::OneForZero => {
                self.exchange(vaults.token1, vaults.token0, caller, amount_in, quote.amount_out())?;
                self.reserve1 = quote.new_reserve_in();
                self.reserve0 = quote.new_reserve_out();
            }
        }
        debug!(
            "swap: caller={caller:?} direction={direction:?} amount_in={amount_in} amount_out={}",
            quote.amount_out()
        );
        Ok(quote.amount_out())
    }

    /// Settles the caller's reward position and mints the earned amount of
    /// the reward token to them. With nothing earned this is a no-op
    /// returning zero: no mint, no state change.
    ///
    /// # Errors
    ///
    /// * [`PoolError::TransferFailure`] if the reward mint fails
    pub fn get_reward(
        &mut self,
        minter: &mut dyn RewardMinter,
        caller: AccountId,
    ) -> Result<U256> {
        let settlement = self
            .rewards
            .settle(caller, self.balance_of(caller), self.clock.now());
        if settlement.accrued().is_zero() {
            return Ok(U256::ZERO);
        }

        minter.mint(caller, settlement.accrued())?;

        let minted = self.rewards.claim(caller, &settlement);
        debug!("get_reward: caller={caller:?} minted={minted}");
        Ok(minted)
    }

    // ── Views ────────────────────────────────────────────────────────────────

    /// Account holding the pooled reserves.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// The base asset.
    #[must_use]
    pub const fn token0(&self) -> TokenId {
        self.token0
    }

    /// The reward-bearing asset.
    #[must_use]
    pub const fn token1(&self) -> TokenId {
        self.token1
    }

    /// Pool balance of token0.
    #[must_use]
    pub const fn reserve0(&self) -> U256 {
        self.reserve0
    }

    /// Pool balance of token1.
    #[must_use]
    pub const fn reserve1(&self) -> U256 {
        self.reserve1
    }

    /// Sum of all holder shares.
    #[must_use]
    pub const fn total_supply(&self) -> U256 {
        self.total_shares
    }

    /// Share balance of `holder`.
    #[must_use]
    pub fn balance_of(&self, holder: AccountId) -> U256 {
        self.share_balance.get(&holder).copied().unwrap_or_default()
    }

    /// Current value of the reward-per-share accumulator.
    #[must_use]
    pub fn reward_per_share(&self) -> U256 {
        self.rewards.reward_per_share(self.clock.now())
    }

    /// Total reward `holder` could claim right now.
    #[must_use]
    pub fn earned(&self, holder: AccountId) -> U256 {
        self.rewards
            .earned(holder, self.balance_of(holder), self.clock.now())
    }

    /// The token0 amount matching `amount1` at the current reserve ratio.
    ///
    /// # Errors
    ///
    /// * [`PoolError::InsufficientLiquidity`] if the pool holds no token1
    /// * [`PoolError::Overflow`] on 256-bit overflow
    pub fn calculate_token0_amount(&self, amount1: U256) -> Result<U256> {
        mul_div(self.reserve0, amount1, self.reserve1)
    }

    /// The token1 amount matching `amount0` at the current reserve ratio.
    ///
    /// # Errors
    ///
    /// * [`PoolError::InsufficientLiquidity`] if the pool holds no token0
    /// * [`PoolError::Overflow`] on 256-bit overflow
    pub fn calculate_token1_amount(&self, amount0: U256) -> Result<U256> {
        mul_div(self.reserve1, amount0, self.reserve0)
    }

    // ── Ledger legs ──────────────────────────────────────────────────────────

    /// Pulls both deposit amounts from `caller` into the pool account,
    /// undoing the first leg if the second fails.
    fn pull_pair(
        &self,
        vaults: &mut Vaults<'_>,
        caller: AccountId,
        amount0: U256,
        amount1: U256,
    ) -> Result<()> {
        vaults.token0.transfer_from(caller, self.account, amount0)?;
        if let Err(err) = vaults.token1.transfer_from(caller, self.account, amount1) {
            // The pool holds amount0 as of the leg above, so the refund has
            // funds to move.
            let _ = vaults.token0.transfer(self.account, caller, amount0);
            return Err(err.into());
        }
        Ok(())
    }

    /// Pushes both withdrawal amounts from the pool account to `caller`,
    /// undoing the first leg if the second fails.
    fn push_pair(
        &self,
        vaults: &mut Vaults<'_>,
        caller: AccountId,
        amount0: U256,
        amount1: U256,
    ) -> Result<()> {
        vaults.token0.transfer(self.account, caller, amount0)?;
        if let Err(err) = vaults.token1.transfer(self.account, caller, amount1) {
            let _ = vaults.token0.transfer_from(caller, self.account, amount0);
            return Err(err.into());
        }
        Ok(())
    }

    /// Pulls the sold token from `caller` and pushes the bought token out,
    /// undoing the pull if the push fails.
    fn exchange(
        &self,
        ledger_in: &mut dyn TokenLedger,
        ledger_out: &mut dyn TokenLedger,
        caller: AccountId,
        amount_in: U256,
        amount_out: U256,
    ) -> Result<()> {
        ledger_in.transfer_from(caller, self.account, amount_in)?;
        if let Err(err) = ledger_out.transfer(self.account, caller, amount_out) {
            let _ = ledger_in.transfer(self.account, caller, amount_in);
            return Err(err.into());
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use alloy::primitives::U256;

    use crate::ledger::{RewardMinter, TokenLedger, Vaults};
    use crate::pool::errors::PoolError;
    use crate::pool::test_helpers::*;
    use crate::utils::clock::ManualClock;
    use crate::utils::constants::POOL_ACCOUNT;

    use super::Pool;
    use super::super::token::AccountId;

    const SECONDS_IN_A_DAY: u64 = 86_400;
    const SECONDS_IN_A_YEAR: u64 = 31_536_000;

    #[test]
    fn test_constructor_sets_pair_tokens() {
        let (pool, _, _, _) = deployment(&[]);
        assert_eq!(pool.token0(), token("WETH"));
        assert_eq!(pool.token1(), token("ACH"));
        assert_eq!(pool.account(), AccountId::from(POOL_ACCOUNT));
        assert_eq!(pool.reserve0(), U256::ZERO);
        assert_eq!(pool.reserve1(), U256::ZERO);
    }

    #[test]
    fn test_constructor_rejects_identical_tokens() {
        let clock = Arc::new(ManualClock::new(0));
        let result = Pool::new(account("pool"), token("WETH"), token("WETH"), clock);
        assert_eq!(
            result.err().unwrap().to_string(),
            "Pool token0 and token1 must be different"
        );
    }

    #[test]
    fn test_first_deposit_allocates_shares_and_moves_funds() {
        let (mut pool, mut weth, mut ach, _) = deployment(&["player1"]);
        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };

        let shares = pool
            .add_liquidity(&mut vaults, account("player1"), wad(100_000), wad(100_000))
            .unwrap();

        assert_eq!(shares, wad(100_000));
        assert_eq!(pool.balance_of(account("player1")), wad(100_000));
        assert_eq!(pool.total_supply(), wad(100_000));
        assert_eq!(pool.reserve0(), wad(100_000));
        assert_eq!(pool.reserve1(), wad(100_000));

        // Funds actually moved in the underlying ledgers.
        assert_eq!(weth.balance_of(account("player1")), wad(900_000));
        assert_eq!(weth.balance_of(pool.account()), wad(100_000));
        assert_eq!(ach.balance_of(pool.account()), wad(100_000));
    }

    #[test]
    fn test_second_deposit_dilutes_proportionally() {
        let (mut pool, mut weth, mut ach, _) = deployment(&["player1", "player2"]);
        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };

        pool.add_liquidity(&mut vaults, account("player1"), wad(100_000), wad(100_000))
            .unwrap();
        pool.add_liquidity(&mut vaults, account("player2"), wad(100_000), wad(100_000))
            .unwrap();

        assert_eq!(pool.balance_of(account("player2")), wad(100_000));
        assert_eq!(pool.total_supply(), wad(200_000));
        assert_eq!(pool.reserve0(), wad(200_000));
    }

    #[test]
    fn test_skewed_deposit_fails_with_ratio_mismatch() {
        let (mut pool, mut weth, mut ach, _) = deployment(&["player1", "player2"]);
        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };
        pool.add_liquidity(&mut vaults, account("player1"), wad(100_000), wad(100_000))
            .unwrap();

        // A 5.3% skew on the token1 side.
        let skewed = wad(100_000) * U256::from(1053u64) / U256::from(1000u64);
        let err = pool
            .add_liquidity(&mut vaults, account("player2"), wad(100_000), skewed)
            .unwrap_err();
        assert_eq!(err.to_string(), "x / y != dx / dy");

        // Nothing changed: pool state or ledger balances.
        assert_eq!(pool.total_supply(), wad(100_000));
        assert_eq!(pool.reserve1(), wad(100_000));
        assert_eq!(weth.balance_of(account("player2")), wad(1_000_000));
        assert_eq!(ach.balance_of(account("player2")), wad(1_000_000));
    }

    #[test]
    fn test_zero_amount_deposit_rejected() {
        let (mut pool, mut weth, mut ach, _) = deployment(&["player1"]);
        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };
        let err = pool
            .add_liquidity(&mut vaults, account("player1"), U256::ZERO, wad(100))
            .unwrap_err();
        assert!(matches!(err, PoolError::ZeroAmount));
    }

    #[test]
    fn test_swap_outputs_bought_token_and_changes_reserves() {
        let (mut pool, mut weth, mut ach, _) = deployment(&["player1", "player2"]);
        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };
        pool.add_liquidity(&mut vaults, account("player1"), wad(100_000), wad(100_000))
            .unwrap();

        let amount_out = pool
            .swap(&mut vaults, account("player2"), token("WETH"), wad(50_000))
            .unwrap();

        let expected_out = U256::from_str_radix("33266599933266599933266", 10).unwrap();
        assert_eq!(amount_out, expected_out);
        assert_eq!(pool.reserve0(), wad(150_000));
        assert_eq!(
            pool.reserve1(),
            U256::from_str_radix("66733400066733400066734", 10).unwrap()
        );

        // The trader paid 50,000 WETH and received the bought ACH.
        assert_eq!(weth.balance_of(account("player2")), wad(950_000));
        assert_eq!(
            ach.balance_of(account("player2")),
            wad(1_000_000) + expected_out
        );
        // Ledger custody tracks the reserves.
        assert_eq!(weth.balance_of(pool.account()), pool.reserve0());
        assert_eq!(ach.balance_of(pool.account()), pool.reserve1());
    }

    #[test]
    fn test_swap_reverse_direction() {
        let (mut pool, mut weth, mut ach, _) = deployment(&["player1", "player2"]);
        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };
        pool.add_liquidity(&mut vaults, account("player1"), wad(100_000), wad(100_000))
            .unwrap();

        let k_before = pool.reserve0() * pool.reserve1();
        let amount_out = pool
            .swap(&mut vaults, account("player2"), token("ACH"), wad(10_000))
            .unwrap();

        assert!(amount_out > U256::ZERO);
        assert_eq!(pool.reserve1(), wad(110_000));
        assert_eq!(pool.reserve0(), wad(100_000) - amount_out);
        assert!(pool.reserve0() * pool.reserve1() >= k_before);
    }

    #[test]
    fn test_swap_unknown_token_rejected() {
        let (mut pool, mut weth, mut ach, _) = deployment(&["player1"]);
        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };
        pool.add_liquidity(&mut vaults, account("player1"), wad(100_000), wad(100_000))
            .unwrap();

        let err = pool
            .swap(&mut vaults, account("player1"), token("DOGE"), wad(1))
            .unwrap_err();
        assert!(matches!(err, PoolError::UnknownToken(t) if t == token("DOGE")));
    }

    #[test]
    fn test_swap_against_empty_pool_rejected() {
        let (mut pool, mut weth, mut ach, _) = deployment(&["player1"]);
        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };
        let err = pool
            .swap(&mut vaults, account("player1"), token("WETH"), wad(1))
            .unwrap_err();
        assert!(matches!(err, PoolError::InsufficientLiquidity));
    }

    #[test]
    fn test_remove_liquidity_full_exit_returns_reserves() {
        let (mut pool, mut weth, mut ach, _) = deployment(&["player1"]);
        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };
        pool.add_liquidity(&mut vaults, account("player1"), wad(100_000), wad(80_000))
            .unwrap();

        let (amount0, amount1) = pool
            .remove_liquidity(&mut vaults, account("player1"), wad(100_000))
            .unwrap();

        assert_eq!(amount0, wad(100_000));
        assert_eq!(amount1, wad(80_000));
        assert_eq!(pool.balance_of(account("player1")), U256::ZERO);
        assert_eq!(pool.total_supply(), U256::ZERO);
        assert_eq!(pool.reserve0(), U256::ZERO);
        assert_eq!(pool.reserve1(), U256::ZERO);
        assert_eq!(weth.balance_of(account("player1")), wad(1_000_000));
        assert_eq!(ach.balance_of(account("player1")), wad(1_000_000));
    }

    #[test]
    fn test_remove_liquidity_partial_is_proportional() {
        let (mut pool, mut weth, mut ach, _) = deployment(&["player1", "player2"]);
        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };
        pool.add_liquidity(&mut vaults, account("player1"), wad(100_000), wad(100_000))
            .unwrap();
        pool.add_liquidity(&mut vaults, account("player2"), wad(100_000), wad(100_000))
            .unwrap();

        // Half the pool's shares buy back half of each reserve.
        let (amount0, amount1) = pool
            .remove_liquidity(&mut vaults, account("player1"), wad(100_000))
            .unwrap();
        assert_eq!(amount0, wad(100_000));
        assert_eq!(amount1, wad(100_000));
        assert_eq!(pool.total_supply(), wad(100_000));
        assert_eq!(pool.reserve0(), wad(100_000));
    }

    #[test]
    fn test_remove_more_than_held_fails() {
        let (mut pool, mut weth, mut ach, _) = deployment(&["player1"]);
        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };
        pool.add_liquidity(&mut vaults, account("player1"), wad(100), wad(100))
            .unwrap();

        let err = pool
            .remove_liquidity(&mut vaults, account("player1"), wad(101))
            .unwrap_err();
        assert!(matches!(
            err,
            PoolError::InsufficientShares { requested, available }
                if requested == wad(101) && available == wad(100)
        ));
        assert_eq!(pool.total_supply(), wad(100));
    }

    #[test]
    fn test_reward_per_share_after_one_year() {
        let (mut pool, mut weth, mut ach, clock) = deployment(&["player1"]);
        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };
        pool.add_liquidity(&mut vaults, account("player1"), wad(100_000), wad(100_000))
            .unwrap();

        clock.advance(SECONDS_IN_A_YEAR);
        assert_eq!(pool.reward_per_share(), U256::from(31_536u64));
    }

    #[test]
    fn test_earned_after_one_day() {
        let (mut pool, mut weth, mut ach, clock) = deployment(&["player1"]);
        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };
        pool.add_liquidity(&mut vaults, account("player1"), wad(100_000), wad(100_000))
            .unwrap();

        clock.advance(SECONDS_IN_A_DAY);
        assert_eq!(pool.reward_per_share(), U256::from(86u64));
        assert_eq!(pool.earned(account("player1")), U256::from(8_600_000u64));
    }

    #[test]
    fn test_get_reward_mints_and_resets() {
        let (mut pool, mut weth, mut ach, clock) = deployment(&["player1"]);
        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };
        pool.add_liquidity(&mut vaults, account("player1"), wad(100_000), wad(100_000))
            .unwrap();
        clock.advance(SECONDS_IN_A_DAY);

        let before = ach.balance_of(account("player1"));
        let minted = pool.get_reward(&mut ach, account("player1")).unwrap();

        assert_eq!(minted, U256::from(8_600_000u64));
        assert_eq!(ach.balance_of(account("player1")), before + minted);
        assert_eq!(pool.earned(account("player1")), U256::ZERO);

        // Claiming again at the same instant is a silent no-op.
        let again = pool.get_reward(&mut ach, account("player1")).unwrap();
        assert_eq!(again, U256::ZERO);
        assert_eq!(ach.balance_of(account("player1")), before + minted);
    }

    #[test]
    fn test_deposit_checkpoints_rewards_before_balance_change() {
        let (mut pool, mut weth, mut ach, clock) = deployment(&["player1"]);
        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };
        pool.add_liquidity(&mut vaults, account("player1"), wad(100_000), wad(100_000))
            .unwrap();

        // One day at 100,000 shares, then double the position.
        clock.advance(SECONDS_IN_A_DAY);
        pool.add_liquidity(&mut vaults, account("player1"), wad(100_000), wad(100_000))
            .unwrap();
        clock.advance(SECONDS_IN_A_DAY);

        // Day one banked at the old balance, day two at the doubled one.
        assert_eq!(
            pool.earned(account("player1")),
            U256::from(8_600_000u64 + 17_200_000u64)
        );
    }

    #[test]
    fn test_swap_does_not_touch_shares_or_rewards() {
        let (mut pool, mut weth, mut ach, clock) = deployment(&["player1", "player2"]);
        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };
        pool.add_liquidity(&mut vaults, account("player1"), wad(100_000), wad(100_000))
            .unwrap();
        clock.advance(SECONDS_IN_A_DAY);

        let earned_before = pool.earned(account("player1"));
        pool.swap(&mut vaults, account("player2"), token("WETH"), wad(10_000))
            .unwrap();

        assert_eq!(pool.balance_of(account("player1")), wad(100_000));
        assert_eq!(pool.earned(account("player1")), earned_before);
        assert_eq!(pool.balance_of(account("player2")), U256::ZERO);
    }

    #[test]
    fn test_failed_second_leg_rolls_back_the_first() {
        let (mut pool, mut weth, mut ach, _) = deployment(&["player1"]);
        // "poor" holds token0 but none of token1, so the second pull leg
        // must fail and refund the first.
        weth.mint(account("poor"), wad(500)).unwrap();

        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };
        pool.add_liquidity(&mut vaults, account("player1"), wad(100_000), wad(100_000))
            .unwrap();

        let err = pool
            .add_liquidity(&mut vaults, account("poor"), wad(500), wad(500))
            .unwrap_err();
        assert!(matches!(err, PoolError::TransferFailure(_)));

        assert_eq!(weth.balance_of(account("poor")), wad(500));
        assert_eq!(pool.total_supply(), wad(100_000));
        assert_eq!(pool.reserve0(), wad(100_000));
        assert_eq!(pool.balance_of(account("poor")), U256::ZERO);
    }

    #[test]
    fn test_calculate_counterpart_amounts() {
        let (mut pool, mut weth, mut ach, _) = deployment(&["player1"]);
        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };
        pool.add_liquidity(&mut vaults, account("player1"), wad(100_000), wad(200_000))
            .unwrap();

        assert_eq!(pool.calculate_token1_amount(wad(5)).unwrap(), wad(10));
        assert_eq!(pool.calculate_token0_amount(wad(10)).unwrap(), wad(5));
    }

    #[test]
    fn test_calculate_round_trip_within_rounding() {
        let (mut pool, mut weth, mut ach, _) = deployment(&["player1"]);
        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };
        pool.add_liquidity(&mut vaults, account("player1"), wad(100_000), wad(333_333))
            .unwrap();

        let amount1 = wad(10);
        let amount0 = pool.calculate_token0_amount(amount1).unwrap();
        let back = pool.calculate_token1_amount(amount0).unwrap();
        assert!(back <= amount1);
        assert!(amount1 - back < U256::from(1_000_000u64));
    }

    #[test]
    fn test_calculate_views_on_empty_pool_are_typed_errors() {
        let (pool, _, _, _) = deployment(&[]);
        assert!(matches!(
            pool.calculate_token0_amount(wad(1)).unwrap_err(),
            PoolError::InsufficientLiquidity
        ));
        assert!(matches!(
            pool.calculate_token1_amount(wad(1)).unwrap_err(),
            PoolError::InsufficientLiquidity
        ));
    }

    #[test]
    fn test_pool_reinitializes_after_full_withdrawal() {
        let (mut pool, mut weth, mut ach, _) = deployment(&["player1"]);
        let mut vaults = Vaults {
            token0: &mut weth,
            token1: &mut ach,
        };
        pool.add_liquidity(&mut vaults, account("player1"), wad(100_000), wad(100_000))
            .unwrap();
        pool.remove_liquidity(&mut vaults, account("player1"), wad(100_000))
            .unwrap();

        // A fresh deposit at a new ratio is a first deposit again.
        let shares = pool
            .add_liquidity(&mut vaults, account("player1"), wad(50_000), wad(200_000))
            .unwrap();
        assert_eq!(shares, wad(50_000));
        assert_eq!(pool.reserve1(), wad(200_000));
    }
}
