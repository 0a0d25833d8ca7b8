//! Account operations.
//!
//! `AccountService` applies validation and existence checks and then issues
//! a single store statement per mutation. Existence is re-read from the
//! store on every call. Nothing serializes two calls on the same name, so a
//! check and its following write can interleave with another caller's; on
//! insert the store's unique constraint still rejects the second name and
//! the caller sees the same duplicate-name fault.

use std::sync::Arc;

use tracing::{debug, info};

use ledger_rpc_core::{Account, AccountId, Credit, CreditInput, LedgerError, NewAccount, Result};
use ledger_rpc_store::AccountStore;

/// The six ledger operations, backed by an [`AccountStore`].
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
}

impl AccountService {
    /// Create a service over a store.
    #[must_use]
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn AccountStore> {
        &self.store
    }

    /// Every account, in store scan order.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Store` if the read fails.
    pub async fn get_all_accounts(&self) -> Result<Vec<Account>> {
        info!("get_all_accounts");
        Ok(self.store.list_accounts().await?)
    }

    /// The account with exactly this name, or `None`.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Store` if the read fails.
    pub async fn get_account(&self, name: &str) -> Result<Option<Account>> {
        info!(name = %name, "get_account");
        self.lookup(name).await
    }

    /// Insert a new account.
    ///
    /// # Errors
    ///
    /// - `LedgerError::Validation` for a non-alphabetic name or non-integer credit.
    /// - `LedgerError::NegativeCredit` for a negative opening credit.
    /// - `LedgerError::DuplicateName` if the name is taken.
    pub async fn add_account(
        &self,
        name: &str,
        address: &str,
        credit: &CreditInput,
    ) -> Result<AccountId> {
        info!(name = %name, address = %address, credit = %credit, "add_account");

        let account = NewAccount::validate(name, address, credit)?;
        if self.lookup(name).await?.is_some() {
            return Err(LedgerError::DuplicateName {
                name: name.to_string(),
            });
        }

        let id = self.store.insert_account(&account).await?;
        debug!(name = %name, id = %id, "Account inserted");
        Ok(id)
    }

    /// Delete the account with this name.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NoSuchName` if no such account exists.
    pub async fn delete_account(&self, name: &str) -> Result<()> {
        info!(name = %name, "delete_account");

        self.require(name).await?;
        let removed = self.store.delete_account(name).await?;
        debug!(name = %name, removed, "Account deleted");
        Ok(())
    }

    /// The credit of the account with this name.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NoSuchName` if no such account exists.
    pub async fn get_credit(&self, name: &str) -> Result<Credit> {
        info!(name = %name, "get_credit");

        self.require(name).await?;
        self.store
            .credit_of(name)
            .await?
            .ok_or_else(|| no_such_name(name))
    }

    /// Overwrite the credit of the account with this name.
    ///
    /// # Errors
    ///
    /// - `LedgerError::NoSuchName` if no such account exists.
    /// - `LedgerError::Validation` for a non-integer credit.
    /// - `LedgerError::NegativeCredit` for a negative credit.
    pub async fn update_credit(&self, name: &str, credit: &CreditInput) -> Result<()> {
        info!(name = %name, credit = %credit, "update_credit");

        self.require(name).await?;
        let credit = credit.resolve()?;
        let matched = self.store.set_credit(name, credit).await?;
        debug!(name = %name, credit = %credit, matched, "Credit updated");
        Ok(())
    }

    async fn lookup(&self, name: &str) -> Result<Option<Account>> {
        Ok(self.store.find_account(name).await?)
    }

    async fn require(&self, name: &str) -> Result<Account> {
        self.lookup(name).await?.ok_or_else(|| no_such_name(name))
    }
}

fn no_such_name(name: &str) -> LedgerError {
    LedgerError::NoSuchName {
        name: name.to_string(),
    }
}
