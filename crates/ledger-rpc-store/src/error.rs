//! Error types for ledger-rpc storage.

use ledger_rpc_core::LedgerError;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Insert violated the unique `Name` constraint.
    #[error("duplicate name: {name}")]
    DuplicateName {
        /// The conflicting name.
        name: String,
    },

    /// A row could not be decoded into an account.
    #[error("row decode error: {0}")]
    Decode(String),

    /// The store never became reachable during bootstrap.
    #[error("unable to connect to {target} after {attempts} attempts: {last_error}")]
    Unreachable {
        /// `host:port` that was tried.
        target: String,
        /// Number of attempts made.
        attempts: u32,
        /// The error from the final attempt.
        last_error: String,
    },
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_) => {
                Self::Decode(err.to_string())
            }
            other => Self::Database(other.to_string()),
        }
    }
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateName { name } => Self::DuplicateName { name },
            other => Self::Store(other.to_string()),
        }
    }
}
