//! Pool error taxonomy.
//!
//! Every failure aborts the whole operation: the pool state and the
//! underlying ledgers are left exactly as they were. Nothing is retried
//! internally; retry policy belongs to the caller.

use alloy::primitives::U256;

use crate::ledger::LedgerError;

use super::token::TokenId;

/// All errors returned by pool operations.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    // ── Input validation ─────────────────────────────────────────────────────
    /// An operation was invoked with a zero amount.
    #[error("amount must be greater than zero")]
    ZeroAmount,

    /// The input token of a swap is neither side of the pair.
    #[error("unknown token {0}")]
    UnknownToken(TokenId),

    // ── Deposit / withdrawal ─────────────────────────────────────────────────
    /// A deposit's ratio deviates from the current reserve ratio.
    #[error("x / y != dx / dy")]
    RatioMismatch,

    /// A withdrawal asked for more shares than the holder owns.
    #[error("insufficient shares: requested {requested}, available {available}")]
    InsufficientShares {
        /// Shares the caller tried to burn.
        requested: U256,
        /// Shares the caller actually holds.
        available: U256,
    },

    // ── Swap ─────────────────────────────────────────────────────────────────
    /// A swap would exhaust or invert a reserve, or the pool has no ratio
    /// to price against.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    // ── Arithmetic ───────────────────────────────────────────────────────────
    /// 256-bit arithmetic overflowed.
    #[error("math overflow")]
    Overflow,

    // ── External collaborators ───────────────────────────────────────────────
    /// An underlying token ledger call failed.
    #[error("transfer failure: {0}")]
    TransferFailure(#[from] LedgerError),
}

/// Convenience alias so every pool module can write `Result<T>`.
pub type Result<T> = std::result::Result<T, PoolError>;
