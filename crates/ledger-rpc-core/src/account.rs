//! Account types for ledger-rpc.
//!
//! This module defines the account record and the validation applied to
//! new accounts before they reach the store.

use serde::{Deserialize, Serialize};

use crate::credits::{Credit, CreditInput};
use crate::error::{LedgerError, ValidationError};
use crate::ids::AccountId;

// ============================================================================
// Constants
// ============================================================================

/// Maximum account name length in characters (`VARCHAR(50)`).
pub const NAME_MAX_LEN: usize = 50;

/// Maximum address length in characters (`VARCHAR(255)`).
pub const ADDRESS_MAX_LEN: usize = 255;

/// Positional wire representation: `(Id, Name, Address, Credit)`.
type AccountTuple = (AccountId, String, String, Credit);

/// A row of the `Accounts` table.
///
/// Serialized as the positional tuple `[Id, Name, Address, Credit]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AccountTuple", into = "AccountTuple")]
pub struct Account {
    /// Store-assigned identifier.
    pub id: AccountId,

    /// Unique customer name.
    pub name: String,

    /// Free-form postal address.
    pub address: String,

    /// Current credit balance.
    pub credit: Credit,
}

impl From<AccountTuple> for Account {
    fn from((id, name, address, credit): AccountTuple) -> Self {
        Self {
            id,
            name,
            address,
            credit,
        }
    }
}

impl From<Account> for AccountTuple {
    fn from(account: Account) -> Self {
        (account.id, account.name, account.address, account.credit)
    }
}

/// A validated account that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Unique customer name.
    pub name: String,

    /// Free-form postal address.
    pub address: String,

    /// Opening credit balance.
    pub credit: Credit,
}

impl NewAccount {
    /// Validate caller input for a new account.
    ///
    /// Checks run in order: name alphabetic, name length, address length,
    /// credit numeric, credit non-negative, credit in range.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a `LedgerError`.
    pub fn validate(name: &str, address: &str, credit: &CreditInput) -> Result<Self, LedgerError> {
        validate_name(name)?;
        validate_address(address)?;
        let credit = credit.resolve()?;

        Ok(Self {
            name: name.to_string(),
            address: address.to_string(),
            credit,
        })
    }

    /// Build an already-trusted record, such as a seed row.
    #[must_use]
    pub fn trusted(name: impl Into<String>, address: impl Into<String>, credit: Credit) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            credit,
        }
    }

    /// Attach a store-assigned identifier.
    #[must_use]
    pub fn with_id(self, id: AccountId) -> Account {
        Account {
            id,
            name: self.name,
            address: self.address,
            credit: self.credit,
        }
    }
}

/// Check that a name is non-empty, letters only, and fits the column.
///
/// # Errors
///
/// - `ValidationError::NameNotAlphabetic` for empty names or any non-letter.
/// - `ValidationError::NameTooLong` past [`NAME_MAX_LEN`] characters.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() || !name.chars().all(char::is_alphabetic) {
        return Err(ValidationError::NameNotAlphabetic {
            name: name.to_string(),
        });
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(ValidationError::NameTooLong { max: NAME_MAX_LEN });
    }
    Ok(())
}

/// Check that an address fits the column.
///
/// # Errors
///
/// Returns `ValidationError::AddressTooLong` past [`ADDRESS_MAX_LEN`] characters.
pub fn validate_address(address: &str) -> Result<(), ValidationError> {
    if address.chars().count() > ADDRESS_MAX_LEN {
        return Err(ValidationError::AddressTooLong {
            max: ADDRESS_MAX_LEN,
        });
    }
    Ok(())
}
