//! Ledger RPC Client SDK.
//!
//! This crate provides a client library for tools and test harnesses that
//! talk to the ledger-rpc service.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use ledger_rpc_client::LedgerClient;
//!
//! # async fn example() -> Result<(), ledger_rpc_client::ClientError> {
//! let client = LedgerClient::new("http://ledger:8000")?;
//!
//! // Wait for the service to come up
//! client.wait_until_ready(30, Duration::from_secs(2)).await?;
//!
//! client.add_account("Test", "Test address", 45000).await?;
//! for account in client.get_all_accounts().await? {
//!     println!("{} {} {} {}", account.id, account.name, account.address, account.credit);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, LedgerClient};
pub use error::{ClientError, Result};
pub use ledger_rpc_core::{Account, AccountId, Credit};
