use alloy::primitives::{address, Address, U256};

/// 18-decimal fixed-point scale shared by amounts and shares.
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Reward-accumulator growth per elapsed second, WAD-scaled: 0.001/s.
pub const REWARD_RATE: U256 = U256::from_limbs([1_000_000_000_000_000, 0, 0, 0]);

/// Swap fee factor numerator (0.3% fee stays in the pool).
pub const FEE_NUMERATOR: U256 = U256::from_limbs([997, 0, 0, 0]);

/// Swap fee factor denominator.
pub const FEE_DENOMINATOR: U256 = U256::from_limbs([1000, 0, 0, 0]);

/// Account that holds pooled reserves in the underlying token ledgers.
pub const POOL_ACCOUNT: Address = address!("0x4d757475616c7300000000000000000000000000");
