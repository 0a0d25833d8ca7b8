//! Storage layer for ledger-rpc.
//!
//! This crate provides persistent storage for the `Accounts` ledger table in
//! a MySQL/MariaDB server, plus an in-memory implementation with identical
//! semantics for tests and local runs.
//!
//! # Architecture
//!
//! - [`AccountStore`]: the async trait every backend implements. Each method
//!   executes exactly one statement, so every write is atomic on its own.
//! - [`MySqlStore`]: sqlx-backed implementation. Opens a fresh connection per
//!   statement by default ([`ConnectionMode::PerCall`]) or draws from a pool.
//! - [`MemoryStore`]: `tokio::sync::RwLock`-guarded table.
//! - [`bootstrap`]: bounded connect retry and create-if-absent schema setup.
//!
//! # Example
//!
//! ```no_run
//! use ledger_rpc_store::{bootstrap, AccountStore, ConnectionMode, MySqlStore, RetryPolicy, StoreConfig};
//!
//! # async fn example() -> ledger_rpc_store::Result<()> {
//! let config = StoreConfig::new("127.0.0.1", 3306, "root", "secret", "ledger");
//! let store = MySqlStore::connect_with_retry(&config, ConnectionMode::PerCall, &RetryPolicy::default()).await?;
//! bootstrap::prepare_schema(&store).await?;
//!
//! let accounts = store.list_accounts().await?;
//! println!("{} accounts", accounts.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bootstrap;
pub mod error;
pub mod memory;
pub mod mysql;
pub mod schema;

pub use bootstrap::{connect_with_retry, RetryPolicy};
pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use mysql::{ConnectionMode, MySqlStore, StoreConfig};

use async_trait::async_trait;
use ledger_rpc_core::{Account, AccountId, Credit, NewAccount};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (MySQL/MariaDB, in-memory for testing).
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;

    // =========================================================================
    // Schema
    // =========================================================================

    /// Create and seed the `Accounts` table if it does not exist.
    ///
    /// Returns `true` if the table was created by this call.
    ///
    /// # Errors
    ///
    /// Returns an error if the probe fails for a reason other than a missing
    /// table, or if creating or seeding fails.
    async fn ensure_schema(&self) -> Result<bool>;

    // =========================================================================
    // Reads
    // =========================================================================

    /// List every account in the store's natural scan order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_accounts(&self) -> Result<Vec<Account>>;

    /// Find the account whose name matches exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn find_account(&self, name: &str) -> Result<Option<Account>>;

    /// Read the credit of the account whose name matches exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn credit_of(&self, name: &str) -> Result<Option<Credit>>;

    // =========================================================================
    // Writes
    // =========================================================================

    /// Insert a new account and return its assigned identifier.
    ///
    /// # Errors
    ///
    /// - `StoreError::DuplicateName` if the unique name constraint rejects it.
    /// - Any other database failure.
    async fn insert_account(&self, account: &NewAccount) -> Result<AccountId>;

    /// Delete the account with this name. Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn delete_account(&self, name: &str) -> Result<u64>;

    /// Overwrite the credit of the account with this name. Returns the number
    /// of rows matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn set_credit(&self, name: &str, credit: Credit) -> Result<u64>;
}
