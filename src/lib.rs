/*!
 * # Mutuals - Constant-Product Liquidity Pool Engine
 *
 * Mutuals is a Rust implementation of a two-asset constant-product
 * liquidity pool with proportional share accounting and continuous
 * time-based reward accrual.
 *
 * ## Core Features
 *
 * - **Constant-Product Swaps**: x * y = k pricing with rounding and fee in
 *   the pool's favor
 * - **Share Accounting**: proportional mint and burn of pool shares against
 *   exact-ratio deposits
 * - **Time-Weighted Rewards**: lazy reward-per-share accumulator settled
 *   before any share balance changes
 * - **Atomic Operations**: staged commits, so any failure leaves pool and
 *   ledgers untouched
 *
 * ## Module Structure
 *
 * - `config`: Configuration management for the engine
 * - `ledger`: Token custody and reward-mint collaborator traits
 * - `pool`: The pool aggregate, pricing math, and reward accrual
 * - `service`: Single-writer serialization over a deployment
 * - `utils`: Utility functions and helpers
 */

/// Configuration management for the engine
pub mod config;
/// Token custody and reward-mint collaborator traits
pub mod ledger;
/// The pool aggregate, pricing math, and reward accrual
pub mod pool;
/// Single-writer serialization over a deployment
pub mod service;
/// Utility functions and helpers
pub mod utils;
