//! MySQL/MariaDB storage implementation.
//!
//! This module provides the `MySqlStore` implementation of the
//! `AccountStore` trait. In [`ConnectionMode::PerCall`] every statement runs
//! on its own freshly opened connection, which is closed when the
//! [`StoreConnection`] guard drops, on success and error paths alike.

use std::fmt;
use std::ops::{Deref, DerefMut};

use async_trait::async_trait;
use sqlx::mysql::{MySql, MySqlConnectOptions, MySqlConnection, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::pool::PoolConnection;
use sqlx::{Connection, Row};
use tracing::{debug, info};

use ledger_rpc_core::{Account, AccountId, Credit, NewAccount};

use crate::bootstrap::{connect_with_retry, RetryPolicy};
use crate::error::{Result, StoreError};
use crate::schema::{seed_accounts, sql};
use crate::AccountStore;

/// Default pool size in [`ConnectionMode::Pooled`].
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// How store connections are obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Open a new connection for every statement and close it afterwards.
    #[default]
    PerCall,
    /// Share a bounded connection pool.
    Pooled {
        /// Upper bound on open connections.
        max_connections: u32,
    },
}

impl fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerCall => write!(f, "per-call"),
            Self::Pooled { max_connections } => write!(f, "pooled({max_connections})"),
        }
    }
}

/// Connection parameters for the MySQL/MariaDB server.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Server host name or address.
    pub host: String,
    /// Server TCP port.
    pub port: u16,
    /// Login user.
    pub user: String,
    /// Login password.
    pub password: String,
    /// Database holding the `Accounts` table.
    pub database: String,
}

impl StoreConfig {
    /// Create a configuration.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            user: user.into(),
            password: password.into(),
            database: database.into(),
        }
    }

    /// `host:port`, for logs and errors.
    #[must_use]
    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

enum Handle {
    PerCall(MySqlConnectOptions),
    Pooled(MySqlPool),
}

/// A connection held for the duration of one statement.
///
/// Dropping the guard closes a per-call connection or returns a pooled one.
pub enum StoreConnection {
    /// Connection opened for this statement only.
    Dedicated(MySqlConnection),
    /// Connection borrowed from the pool.
    Pooled(PoolConnection<MySql>),
}

impl Deref for StoreConnection {
    type Target = MySqlConnection;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Dedicated(conn) => conn,
            Self::Pooled(conn) => conn,
        }
    }
}

impl DerefMut for StoreConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Self::Dedicated(conn) => conn,
            Self::Pooled(conn) => conn,
        }
    }
}

/// MySQL/MariaDB-backed storage implementation.
pub struct MySqlStore {
    handle: Handle,
    mode: ConnectionMode,
}

impl MySqlStore {
    /// Connect once to verify the server is reachable.
    ///
    /// In per-call mode the verification connection is closed again; in
    /// pooled mode the pool keeps it.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached or rejects the login.
    pub async fn connect(config: &StoreConfig, mode: ConnectionMode) -> Result<Self> {
        let options = config.connect_options();

        let handle = match mode {
            ConnectionMode::PerCall => {
                let conn = MySqlConnection::connect_with(&options).await?;
                conn.close().await?;
                Handle::PerCall(options)
            }
            ConnectionMode::Pooled { max_connections } => {
                let pool = MySqlPoolOptions::new()
                    .max_connections(max_connections)
                    .connect_with(options)
                    .await?;
                Handle::Pooled(pool)
            }
        };

        Ok(Self { handle, mode })
    }

    /// [`MySqlStore::connect`] under a bounded retry policy.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unreachable` once the policy is exhausted.
    pub async fn connect_with_retry(
        config: &StoreConfig,
        mode: ConnectionMode,
        policy: &RetryPolicy,
    ) -> Result<Self> {
        let target = config.target();
        info!(
            target_addr = %target,
            database = %config.database,
            mode = %mode,
            max_attempts = policy.max_attempts(),
            "Connecting to store"
        );

        connect_with_retry(policy, &target, |_| Self::connect(config, mode)).await
    }

    /// The connection mode in use.
    #[must_use]
    pub const fn mode(&self) -> ConnectionMode {
        self.mode
    }

    /// Obtain a connection for one statement.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection can be opened or borrowed.
    pub async fn acquire(&self) -> Result<StoreConnection> {
        match &self.handle {
            Handle::PerCall(options) => Ok(StoreConnection::Dedicated(
                MySqlConnection::connect_with(options).await?,
            )),
            Handle::Pooled(pool) => Ok(StoreConnection::Pooled(pool.acquire().await?)),
        }
    }

    async fn create_and_seed(conn: &mut MySqlConnection) -> Result<()> {
        sqlx::query(sql::CREATE_TABLE).execute(&mut *conn).await?;

        for seed in seed_accounts() {
            sqlx::query(sql::INSERT)
                .bind(&seed.name)
                .bind(&seed.address)
                .bind(seed.credit.get())
                .execute(&mut *conn)
                .await?;
        }

        Ok(())
    }
}

fn account_from_row(row: &MySqlRow) -> Result<Account> {
    let id: i32 = row.try_get("Id")?;
    let name: String = row.try_get("Name")?;
    let address: String = row.try_get("Address")?;
    let credit: u32 = row.try_get("Credit")?;

    Ok(Account {
        id: AccountId::new(id),
        name,
        address,
        credit: Credit::new(credit),
    })
}

#[async_trait]
impl AccountStore for MySqlStore {
    fn backend(&self) -> &'static str {
        "mysql"
    }

    async fn ensure_schema(&self) -> Result<bool> {
        let mut conn = self.acquire().await?;

        match sqlx::query(sql::PROBE).fetch_optional(&mut *conn).await {
            Ok(_) => Ok(false),
            Err(sqlx::Error::Database(e)) => {
                debug!(reason = %e, "Accounts probe failed, creating table");
                Self::create_and_seed(&mut conn).await?;
                Ok(true)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn list_accounts(&self) -> Result<Vec<Account>> {
        let mut conn = self.acquire().await?;
        let rows = sqlx::query(sql::SELECT_ALL).fetch_all(&mut *conn).await?;
        rows.iter().map(account_from_row).collect()
    }

    async fn find_account(&self, name: &str) -> Result<Option<Account>> {
        let mut conn = self.acquire().await?;
        let row = sqlx::query(sql::SELECT_BY_NAME)
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;
        row.as_ref().map(account_from_row).transpose()
    }

    async fn credit_of(&self, name: &str) -> Result<Option<Credit>> {
        let mut conn = self.acquire().await?;
        let row = sqlx::query(sql::SELECT_CREDIT)
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;

        row.map(|row| row.try_get::<u32, _>("Credit").map(Credit::new))
            .transpose()
            .map_err(StoreError::from)
    }

    async fn insert_account(&self, account: &NewAccount) -> Result<AccountId> {
        let mut conn = self.acquire().await?;
        let result = sqlx::query(sql::INSERT)
            .bind(&account.name)
            .bind(&account.address)
            .bind(account.credit.get())
            .execute(&mut *conn)
            .await;

        match result {
            Ok(done) => i32::try_from(done.last_insert_id())
                .map(AccountId::new)
                .map_err(|_| {
                    StoreError::Decode(format!(
                        "insert id out of range: {}",
                        done.last_insert_id()
                    ))
                }),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::DuplicateName {
                    name: account.name.clone(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_account(&self, name: &str) -> Result<u64> {
        let mut conn = self.acquire().await?;
        let done = sqlx::query(sql::DELETE_BY_NAME)
            .bind(name)
            .execute(&mut *conn)
            .await?;
        Ok(done.rows_affected())
    }

    async fn set_credit(&self, name: &str, credit: Credit) -> Result<u64> {
        let mut conn = self.acquire().await?;
        let done = sqlx::query(sql::UPDATE_CREDIT)
            .bind(credit.get())
            .bind(name)
            .execute(&mut *conn)
            .await?;
        Ok(done.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_password() {
        let config = StoreConfig::new("db", 3306, "root", "hunter2", "ledger");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
        assert_eq!(config.target(), "db:3306");
    }

    #[test]
    fn connection_mode_display() {
        assert_eq!(ConnectionMode::PerCall.to_string(), "per-call");
        assert_eq!(
            ConnectionMode::Pooled { max_connections: 4 }.to_string(),
            "pooled(4)"
        );
        assert_eq!(ConnectionMode::default(), ConnectionMode::PerCall);
    }
}
