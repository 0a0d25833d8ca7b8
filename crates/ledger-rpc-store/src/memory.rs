//! In-memory storage implementation.
//!
//! Mirrors the MySQL backend's observable behavior: exact-match names, a
//! unique name constraint, auto-increment identifiers that are never reused,
//! and insertion-order scans. A fresh store has no `Accounts` table until
//! [`AccountStore::ensure_schema`] runs.

use async_trait::async_trait;
use tokio::sync::RwLock;

use ledger_rpc_core::{Account, AccountId, Credit, NewAccount};

use crate::error::{Result, StoreError};
use crate::schema::{seed_accounts, TABLE};
use crate::AccountStore;

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Account>,
    next_id: i32,
}

impl Table {
    fn insert(&mut self, account: &NewAccount) -> Result<AccountId> {
        if self.rows.iter().any(|row| row.name == account.name) {
            return Err(StoreError::DuplicateName {
                name: account.name.clone(),
            });
        }

        self.next_id += 1;
        let id = AccountId::new(self.next_id);
        self.rows.push(account.clone().with_id(id));
        Ok(id)
    }

    fn find(&self, name: &str) -> Option<&Account> {
        self.rows.iter().find(|row| row.name == name)
    }
}

/// `RwLock`-guarded in-memory account table.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<Option<Table>>,
}

impl MemoryStore {
    /// Create a store without an `Accounts` table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose `Accounts` table exists but holds no rows.
    #[must_use]
    pub fn with_empty_table() -> Self {
        Self {
            table: RwLock::new(Some(Table::default())),
        }
    }

    fn missing_table() -> StoreError {
        StoreError::Database(format!("table '{TABLE}' doesn't exist"))
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ensure_schema(&self) -> Result<bool> {
        let mut guard = self.table.write().await;
        if guard.is_some() {
            return Ok(false);
        }

        let mut table = Table::default();
        for seed in seed_accounts() {
            table.insert(&seed)?;
        }
        *guard = Some(table);
        Ok(true)
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let guard = self.table.read().await;
        let table = guard.as_ref().ok_or_else(Self::missing_table)?;
        Ok(table.rows.clone())
    }

    async fn find_account(&self, name: &str) -> Result<Option<Account>> {
        let guard = self.table.read().await;
        let table = guard.as_ref().ok_or_else(Self::missing_table)?;
        Ok(table.find(name).cloned())
    }

    async fn credit_of(&self, name: &str) -> Result<Option<Credit>> {
        let guard = self.table.read().await;
        let table = guard.as_ref().ok_or_else(Self::missing_table)?;
        Ok(table.find(name).map(|row| row.credit))
    }

    async fn insert_account(&self, account: &NewAccount) -> Result<AccountId> {
        let mut guard = self.table.write().await;
        let table = guard.as_mut().ok_or_else(Self::missing_table)?;
        table.insert(account)
    }

    async fn delete_account(&self, name: &str) -> Result<u64> {
        let mut guard = self.table.write().await;
        let table = guard.as_mut().ok_or_else(Self::missing_table)?;
        let before = table.rows.len();
        table.rows.retain(|row| row.name != name);
        Ok((before - table.rows.len()) as u64)
    }

    async fn set_credit(&self, name: &str, credit: Credit) -> Result<u64> {
        let mut guard = self.table.write().await;
        let table = guard.as_mut().ok_or_else(Self::missing_table)?;
        let mut matched = 0;
        for row in table.rows.iter_mut().filter(|row| row.name == name) {
            row.credit = credit;
            matched += 1;
        }
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(name: &str, credit: u32) -> NewAccount {
        NewAccount::trusted(name, format!("{name} street"), Credit::new(credit))
    }

    #[tokio::test]
    async fn operations_fail_before_schema_exists() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.list_accounts().await,
            Err(StoreError::Database(_))
        ));
    }

    #[tokio::test]
    async fn ensure_schema_seeds_once() {
        let store = MemoryStore::new();
        assert!(store.ensure_schema().await.unwrap());

        let rows = store.list_accounts().await.unwrap();
        let names: Vec<_> = rows.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            ["Customer1", "Customer2", "Customer3", "Customer4", "Customer5"]
        );
        assert_eq!(rows[0].id, AccountId::new(1));
        assert_eq!(rows[3].credit, Credit::new(8_450));

        assert!(!store.ensure_schema().await.unwrap());
        assert_eq!(store.list_accounts().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = MemoryStore::with_empty_table();
        let first = store.insert_account(&account("Alpha", 1)).await.unwrap();
        let second = store.insert_account(&account("Beta", 2)).await.unwrap();
        assert!(second > first);

        // Identifiers are not reused after a delete.
        store.delete_account("Beta").await.unwrap();
        let third = store.insert_account(&account("Gamma", 3)).await.unwrap();
        assert!(third > second);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_names() {
        let store = MemoryStore::with_empty_table();
        store.insert_account(&account("Alpha", 1)).await.unwrap();

        let err = store
            .insert_account(&account("Alpha", 99))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName { name } if name == "Alpha"));
        assert_eq!(store.list_accounts().await.unwrap().len(), 1);
        assert_eq!(
            store.credit_of("Alpha").await.unwrap(),
            Some(Credit::new(1))
        );
    }

    #[tokio::test]
    async fn names_match_exactly() {
        let store = MemoryStore::with_empty_table();
        store.insert_account(&account("Alpha", 1)).await.unwrap();

        assert!(store.find_account("alpha").await.unwrap().is_none());
        assert!(store.find_account("Alpha").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_and_update_report_matched_rows() {
        let store = MemoryStore::with_empty_table();
        store.insert_account(&account("Alpha", 1)).await.unwrap();

        assert_eq!(store.set_credit("Alpha", Credit::new(7)).await.unwrap(), 1);
        assert_eq!(store.set_credit("Nobody", Credit::new(7)).await.unwrap(), 0);
        assert_eq!(
            store.credit_of("Alpha").await.unwrap(),
            Some(Credit::new(7))
        );

        assert_eq!(store.delete_account("Alpha").await.unwrap(), 1);
        assert_eq!(store.delete_account("Alpha").await.unwrap(), 0);
        assert!(store.find_account("Alpha").await.unwrap().is_none());
    }
}
