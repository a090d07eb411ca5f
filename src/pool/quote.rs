//! Pure swap and deposit pricing.
//!
//! Everything here is side-effect free: a quote is computed from a reserve
//! snapshot and amounts alone, and the pool commits it only after every
//! fallible step of the operation has succeeded.

use std::fmt::{self, Debug, Display};

use alloy::primitives::U256;

use crate::utils::constants::{FEE_DENOMINATOR, FEE_NUMERATOR};

use super::errors::{PoolError, Result};

/// The direction of a swap in the pool.
///
/// A swap either sells token0 for token1 or token1 for token0.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Swap from token0 to token1
    ZeroForOne,
    /// Swap from token1 to token0
    OneForZero,
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Debug for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroForOne => write!(f, "0>1"),
            Self::OneForZero => write!(f, "1>0"),
        }
    }
}

/// A priced swap against a reserve snapshot.
///
/// The output solves the fee-adjusted constant product: with a 0.3% fee
/// retained by the pool,
/// `amount_out = reserve_out * (amount_in * 997) / (reserve_in * 1000 + amount_in * 997)`,
/// floor division throughout. Rounding and fee both favor the pool, so
/// `reserve0 * reserve1` never decreases across a committed swap.
#[derive(Debug, Clone)]
pub struct SwapQuote {
    /// Amount of the input token sold into the pool
    amount_in: U256,
    /// Amount of the output token bought out of the pool
    amount_out: U256,
    /// Input-side reserve after the swap commits
    new_reserve_in: U256,
    /// Output-side reserve after the swap commits
    new_reserve_out: U256,
}

impl SwapQuote {
    /// Prices `amount_in` against the `(reserve_in, reserve_out)` snapshot.
    ///
    /// # Errors
    /// * [`PoolError::ZeroAmount`] if `amount_in` is zero
    /// * [`PoolError::InsufficientLiquidity`] if either reserve is zero or
    ///   the output floors to zero or would drain the output reserve
    /// * [`PoolError::Overflow`] if the 256-bit intermediate math overflows
    pub fn new(reserve_in: U256, reserve_out: U256, amount_in: U256) -> Result<Self> {
        if amount_in.is_zero() {
            return Err(PoolError::ZeroAmount);
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(PoolError::InsufficientLiquidity);
        }

        let amount_in_with_fee = amount_in
            .checked_mul(FEE_NUMERATOR)
            .ok_or(PoolError::Overflow)?;
        let numerator = amount_in_with_fee
            .checked_mul(reserve_out)
            .ok_or(PoolError::Overflow)?;
        let denominator = reserve_in
            .checked_mul(FEE_DENOMINATOR)
            .ok_or(PoolError::Overflow)?
            .checked_add(amount_in_with_fee)
            .ok_or(PoolError::Overflow)?;
        let amount_out = numerator / denominator;

        if amount_out.is_zero() || amount_out >= reserve_out {
            return Err(PoolError::InsufficientLiquidity);
        }

        Ok(Self {
            amount_in,
            amount_out,
            // Additions cannot overflow: numerator above bounds the products
            new_reserve_in: reserve_in + amount_in,
            new_reserve_out: reserve_out - amount_out,
        })
    }

    /// Amount of the input token sold into the pool.
    #[must_use]
    pub const fn amount_in(&self) -> U256 {
        self.amount_in
    }

    /// Amount of the output token bought out of the pool.
    #[must_use]
    pub const fn amount_out(&self) -> U256 {
        self.amount_out
    }

    /// Input-side reserve after the swap commits.
    #[must_use]
    pub const fn new_reserve_in(&self) -> U256 {
        self.new_reserve_in
    }

    /// Output-side reserve after the swap commits.
    #[must_use]
    pub const fn new_reserve_out(&self) -> U256 {
        self.new_reserve_out
    }
}

/// `amount * numerator / denominator` with overflow-checked math.
///
/// # Errors
/// * [`PoolError::InsufficientLiquidity`] if `denominator` is zero (an
///   uninitialized pool has no ratio to price against)
/// * [`PoolError::Overflow`] if the product overflows
pub fn mul_div(amount: U256, numerator: U256, denominator: U256) -> Result<U256> {
    if denominator.is_zero() {
        return Err(PoolError::InsufficientLiquidity);
    }
    let product = amount
        .checked_mul(numerator)
        .ok_or(PoolError::Overflow)?;
    Ok(product / denominator)
}

/// Exact cross-multiplied ratio check for a deposit against current
/// reserves: `reserve0 * amount1 == reserve1 * amount0`.
///
/// # Errors
/// * [`PoolError::Overflow`] if either cross product overflows
pub fn ratio_matches(
    reserve0: U256,
    reserve1: U256,
    amount0: U256,
    amount1: U256,
) -> Result<bool> {
    let lhs = reserve0
        .checked_mul(amount1)
        .ok_or(PoolError::Overflow)?;
    let rhs = reserve1
        .checked_mul(amount0)
        .ok_or(PoolError::Overflow)?;
    Ok(lhs == rhs)
}
