use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use alloy::primitives::Address;
use eyre::Error;

/// Identity of one of the two underlying assets.
///
/// Wraps an address for strict typing so a token can never be confused
/// with an account in an operation signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(Address);

impl TokenId {
    /// The underlying address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.0
    }
}

impl From<Address> for TokenId {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl TryFrom<&str> for TokenId {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Error> {
        Ok(Self(Address::from_str(s)?))
    }
}

impl Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Token(0x1234..cdef)
        let hex = format!("{}", self.0);
        write!(f, "Token({}..{})", &hex[..6], &hex[hex.len() - 4..])
    }
}

/// Identity of a share holder, trader, or the pool itself in the
/// underlying token ledgers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(Address);

impl AccountId {
    /// The underlying address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.0
    }
}

impl From<Address> for AccountId {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl TryFrom<&str> for AccountId {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self, Error> {
        Ok(Self(Address::from_str(s)?))
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = format!("{}", self.0);
        write!(f, "Account({}..{})", &hex[..6], &hex[hex.len() - 4..])
    }
}
