//! Identifier types for ledger-rpc.
//!
//! Account identifiers are assigned by the store on insert (an
//! auto-increment column) and never change afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned account identifier.
///
/// Serialized as a bare integer so it fits the positional account tuple
/// returned over the wire.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i32);

impl AccountId {
    /// Wrap a raw identifier read from the store.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Return the raw integer value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for AccountId {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl From<AccountId> for i32 {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl FromStr for AccountId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.0)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_serializes_as_integer() {
        let id = AccountId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");

        let parsed: AccountId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed.get(), 42);
    }

    #[test]
    fn account_id_from_str() {
        let id: AccountId = "13".parse().unwrap();
        assert_eq!(id, AccountId::from(13));
        assert!("abc".parse::<AccountId>().is_err());
    }
}
