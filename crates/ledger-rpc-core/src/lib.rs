//! Core types and utilities for ledger-rpc.
//!
//! This crate provides the foundational types shared by the store, the
//! service, and the client:
//!
//! - **Identifiers**: `AccountId`
//! - **Accounts**: `Account`, `NewAccount`, name and address validation
//! - **Credits**: `Credit`, `CreditInput`
//! - **Errors**: `LedgerError`, the fault taxonomy reported to callers
//!
//! # Credit Unit
//!
//! Credits are whole, non-negative units stored as `u32` to match the
//! `INT UNSIGNED` column of the `Accounts` table.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod credits;
pub mod error;
pub mod ids;

pub use account::{
    validate_address, validate_name, Account, NewAccount, ADDRESS_MAX_LEN, NAME_MAX_LEN,
};
pub use credits::{Credit, CreditInput};
pub use error::{FaultKind, LedgerError, Result, ValidationError, FAULT_CODE};
pub use ids::AccountId;
