//! Startup helpers: bounded connect retry and schema preparation.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::AccountStore;

/// Default number of connection attempts.
pub const DEFAULT_CONNECT_ATTEMPTS: u32 = 30;

/// Default pause between connection attempts.
pub const DEFAULT_CONNECT_DELAY: Duration = Duration::from_secs(2);

/// Fixed-delay retry budget for reaching a store that may still be starting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Create a policy. Zero attempts is treated as one.
    #[must_use]
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Total attempts allowed.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Pause between attempts.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECT_ATTEMPTS, DEFAULT_CONNECT_DELAY)
    }
}

/// Run `connect` until it succeeds or the policy is exhausted.
///
/// `connect` receives the 1-based attempt number. The policy's delay is
/// slept between attempts, not after the last one.
///
/// # Errors
///
/// Returns `StoreError::Unreachable` carrying the last attempt's error once
/// every attempt has failed.
pub async fn connect_with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    target: &str,
    mut connect: F,
) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Display,
{
    let mut last_error = String::new();

    for attempt in 1..=policy.max_attempts() {
        match connect(attempt).await {
            Ok(value) => {
                info!(target_addr = %target, attempt, "Connected to store");
                return Ok(value);
            }
            Err(e) => {
                warn!(
                    target_addr = %target,
                    attempt,
                    max_attempts = policy.max_attempts(),
                    error = %e,
                    "Store not reachable yet"
                );
                last_error = e.to_string();
            }
        }

        if attempt < policy.max_attempts() {
            tokio::time::sleep(policy.delay()).await;
        }
    }

    Err(StoreError::Unreachable {
        target: target.to_string(),
        attempts: policy.max_attempts(),
        last_error,
    })
}

/// Make sure the `Accounts` table exists, creating and seeding it if needed.
///
/// Not guarded against a second instance bootstrapping the same store
/// concurrently.
///
/// # Errors
///
/// Propagates any error from [`AccountStore::ensure_schema`].
pub async fn prepare_schema<S>(store: &S) -> Result<bool>
where
    S: AccountStore + ?Sized,
{
    debug!(backend = store.backend(), "Checking for Accounts table");
    let created = store.ensure_schema().await?;

    if created {
        info!(backend = store.backend(), "Created table 'Accounts' with seed rows");
    } else {
        info!(backend = store.backend(), "Table 'Accounts' already present");
    }

    Ok(created)
}
