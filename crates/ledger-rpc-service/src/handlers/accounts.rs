//! Account RPC methods.
//!
//! Thin adapters between positional JSON arguments and [`AccountService`].
//! Accounts are returned as `[id, name, address, credit]` arrays.
//! Operations without a result return `null`.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::error::RpcFault;
use crate::ledger::AccountService;
use crate::rpc::{Dispatcher, HandlerResult, Params};

/// Shared state handed to every account method.
pub type Service = Arc<AccountService>;

/// Register the account methods on `dispatcher`.
pub fn register(dispatcher: &mut Dispatcher<Service>) {
    dispatcher
        .register(
            "get_all_accounts",
            "get_all_accounts() => [[id, name, address, credit], ...]\n\nList every account.",
            get_all_accounts,
        )
        .register(
            "get_account",
            "get_account(name) => [id, name, address, credit] | null\n\nLook up an account by exact name.",
            get_account,
        )
        .register(
            "add_account",
            "add_account(name, address, credit) => null\n\nCreate an account. The name must be alphabetic and unused; credit must be a non-negative integer.",
            add_account,
        )
        .register(
            "delete_account",
            "delete_account(name) => null\n\nDelete an existing account.",
            delete_account,
        )
        .register(
            "get_credit",
            "get_credit(name) => credit\n\nRead the credit of an existing account.",
            get_credit,
        )
        .register(
            "update_credit",
            "update_credit(name, credit) => null\n\nSet the credit of an existing account to a non-negative integer.",
            update_credit,
        );
}

async fn get_all_accounts(service: Service, params: Params) -> HandlerResult {
    params.expect_arity("get_all_accounts", 0)?;
    encode(service.get_all_accounts().await?)
}

async fn get_account(service: Service, params: Params) -> HandlerResult {
    params.expect_arity("get_account", 1)?;
    let name = params.string(0, "name")?;
    encode(service.get_account(name).await?)
}

async fn add_account(service: Service, params: Params) -> HandlerResult {
    params.expect_arity("add_account", 3)?;
    let name = params.string(0, "name")?;
    let address = params.string(1, "address")?;
    let credit = params.credit(2)?;
    service.add_account(name, address, &credit).await?;
    Ok(Value::Null)
}

async fn delete_account(service: Service, params: Params) -> HandlerResult {
    params.expect_arity("delete_account", 1)?;
    let name = params.string(0, "name")?;
    service.delete_account(name).await?;
    Ok(Value::Null)
}

async fn get_credit(service: Service, params: Params) -> HandlerResult {
    params.expect_arity("get_credit", 1)?;
    let name = params.string(0, "name")?;
    encode(service.get_credit(name).await?)
}

async fn update_credit(service: Service, params: Params) -> HandlerResult {
    params.expect_arity("update_credit", 2)?;
    let name = params.string(0, "name")?;
    let credit = params.credit(1)?;
    service.update_credit(name, &credit).await?;
    Ok(Value::Null)
}

fn encode<T: Serialize>(value: T) -> HandlerResult {
    serde_json::to_value(value).map_err(RpcFault::internal)
}
