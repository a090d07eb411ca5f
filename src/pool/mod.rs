//! # Liquidity Pool Module
//!
//! This module contains the core pool engine: constant-product swap
//! pricing, proportional share accounting, and time-weighted reward
//! accrual, behind a typed error taxonomy. Token custody stays outside,
//! in the `ledger` module's collaborator traits.

/// Pool error taxonomy
pub mod errors;
/// The pool aggregate and its operations
pub mod pool;
/// Pure swap and deposit pricing
pub mod quote;
/// Time-weighted reward accrual
pub mod rewards;
/// Test helpers and utilities
mod test_helpers;
/// Token and account identity newtypes
pub mod token;
