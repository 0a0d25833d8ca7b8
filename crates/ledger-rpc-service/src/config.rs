//! Service configuration.
//!
//! Read once at startup from the environment. Store connection parameters
//! follow the container-link variable names of the reference deployment.

use std::time::Duration;

use ledger_rpc_store::bootstrap::{DEFAULT_CONNECT_ATTEMPTS, DEFAULT_CONNECT_DELAY};
use ledger_rpc_store::mysql::DEFAULT_MAX_CONNECTIONS;
use ledger_rpc_store::{ConnectionMode, RetryPolicy, StoreConfig};

/// Environment variable names.
pub mod vars {
    /// Instance name, used for the startup banner.
    pub const HOSTNAME: &str = "HOSTNAME";
    /// Store host.
    pub const STORE_HOST: &str = "MARIADB_PORT_3306_TCP_ADDR";
    /// Store port.
    pub const STORE_PORT: &str = "MARIADB_PORT_3306_TCP_PORT";
    /// Store password.
    pub const STORE_PASSWORD: &str = "MARIADB_ENV_MYSQL_ROOT_PASSWORD";
    /// Store database name.
    pub const STORE_DATABASE: &str = "MARIADB_ENV_MYSQL_DATABASE";
    /// Store user (optional).
    pub const STORE_USER: &str = "MARIADB_USER";
    /// Listen address (optional).
    pub const LISTEN_ADDR: &str = "LISTEN_ADDR";
    /// `per-call` or `pooled` (optional).
    pub const CONNECTION_MODE: &str = "STORE_CONNECTION_MODE";
    /// Pool size in pooled mode (optional).
    pub const MAX_CONNECTIONS: &str = "STORE_MAX_CONNECTIONS";
    /// Startup connection attempts (optional).
    pub const CONNECT_ATTEMPTS: &str = "STORE_CONNECT_ATTEMPTS";
    /// Seconds between startup connection attempts (optional).
    pub const CONNECT_DELAY_SECS: &str = "STORE_CONNECT_DELAY_SECS";
    /// Maximum request body size in bytes (optional).
    pub const MAX_BODY_BYTES: &str = "MAX_BODY_BYTES";
    /// Maximum concurrently handled requests (optional).
    pub const MAX_CONCURRENT_REQUESTS: &str = "MAX_CONCURRENT_REQUESTS";
}

/// Default listen address; port 8000 as in the reference deployment.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";

/// Default store login.
pub const DEFAULT_STORE_USER: &str = "root";

/// Default maximum request body size (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Default maximum concurrently handled requests.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 64;

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// One or more required variables are not set.
    #[error("environment variable not set: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    /// A variable is set but cannot be interpreted.
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// The offending value.
        value: String,
        /// What was expected.
        reason: &'static str,
    },
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Instance name shown in the startup banner.
    pub instance_name: String,

    /// Address to listen on (default: "0.0.0.0:8000").
    pub listen_addr: String,

    /// Store connection parameters.
    pub store: StoreConfig,

    /// Per-call connections (default) or a pool.
    pub connection_mode: ConnectionMode,

    /// Startup connection retry budget.
    pub connect_retry: RetryPolicy,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Maximum number of requests handled at once.
    pub max_concurrent_requests: usize,
}

impl ServiceConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or any
    /// variable is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or any
    /// variable is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = [
            vars::HOSTNAME,
            vars::STORE_HOST,
            vars::STORE_PORT,
            vars::STORE_PASSWORD,
            vars::STORE_DATABASE,
        ];
        let missing: Vec<_> = required
            .iter()
            .copied()
            .filter(|name| lookup(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }
        let get = |name: &'static str| lookup(name).unwrap_or_default();

        let port_raw = get(vars::STORE_PORT);
        let port = port_raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name: vars::STORE_PORT,
            value: port_raw.clone(),
            reason: "expected a TCP port number",
        })?;

        let store = StoreConfig::new(
            get(vars::STORE_HOST),
            port,
            lookup(vars::STORE_USER).unwrap_or_else(|| DEFAULT_STORE_USER.into()),
            get(vars::STORE_PASSWORD),
            get(vars::STORE_DATABASE),
        );

        let connection_mode = match lookup(vars::CONNECTION_MODE).as_deref() {
            None | Some("per-call") => ConnectionMode::PerCall,
            Some("pooled") => {
                let max_connections =
                    parse_or(&lookup, vars::MAX_CONNECTIONS, DEFAULT_MAX_CONNECTIONS)?;
                if max_connections == 0 {
                    return Err(ConfigError::Invalid {
                        name: vars::MAX_CONNECTIONS,
                        value: max_connections.to_string(),
                        reason: "pool size must be at least 1",
                    });
                }
                ConnectionMode::Pooled { max_connections }
            }
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: vars::CONNECTION_MODE,
                    value: other.to_string(),
                    reason: "expected `per-call` or `pooled`",
                })
            }
        };

        let connect_retry = RetryPolicy::new(
            parse_or(&lookup, vars::CONNECT_ATTEMPTS, DEFAULT_CONNECT_ATTEMPTS)?,
            Duration::from_secs(parse_or(
                &lookup,
                vars::CONNECT_DELAY_SECS,
                DEFAULT_CONNECT_DELAY.as_secs(),
            )?),
        );

        Ok(Self {
            instance_name: get(vars::HOSTNAME),
            listen_addr: lookup(vars::LISTEN_ADDR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.into()),
            store,
            connection_mode,
            connect_retry,
            max_body_bytes: parse_or(&lookup, vars::MAX_BODY_BYTES, DEFAULT_MAX_BODY_BYTES)?,
            max_concurrent_requests: parse_or(
                &lookup,
                vars::MAX_CONCURRENT_REQUESTS,
                DEFAULT_MAX_CONCURRENT_REQUESTS,
            )?,
        })
    }
}

/// Parse an optional numeric variable, falling back to `default` when unset.
fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw,
            reason: "expected a non-negative integer",
        }),
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            instance_name: "localhost".into(),
            listen_addr: DEFAULT_LISTEN_ADDR.into(),
            store: StoreConfig::new("127.0.0.1", 3306, DEFAULT_STORE_USER, "", "ledger"),
            connection_mode: ConnectionMode::PerCall,
            connect_retry: RetryPolicy::default(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}
