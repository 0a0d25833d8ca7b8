//! Account ledger RPC service.
//!
//! This crate serves six account operations over JSON-RPC 2.0:
//!
//! - `get_all_accounts`, `get_account`, `add_account`
//! - `delete_account`, `get_credit`, `update_credit`
//!
//! plus `system.listMethods` and `system.methodHelp` for introspection.
//! Calls arrive as `POST /` (or `POST /RPC2`) and are answered with a
//! result or a fault. Faults raised by the operations carry code 1.
//!
//! The endpoint speaks JSON only. XML-RPC clients (such as scripts built on
//! Python's `xmlrpc.client`) are not wire-compatible and must be ported to
//! JSON-RPC or to `ledger-rpc-client`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)] // RPC handlers all return HandlerResult
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod ledger;
pub mod routes;
pub mod rpc;
pub mod state;

pub use config::{ConfigError, ServiceConfig};
pub use error::RpcFault;
pub use ledger::AccountService;
pub use routes::create_router;
pub use state::AppState;
