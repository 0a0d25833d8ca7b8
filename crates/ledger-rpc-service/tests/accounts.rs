//! Account operation integration tests.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use common::TestHarness;
use ledger_rpc_core::{Account, AccountId, Credit, NewAccount};
use ledger_rpc_store::{bootstrap, AccountStore, MemoryStore};

const FAULT: i32 = 1;

// ============================================================================
// Seed data
// ============================================================================

#[tokio::test]
async fn fresh_store_lists_exactly_the_seed_rows() {
    let harness = TestHarness::new().await;

    let result = harness.result("get_all_accounts", json!([])).await;

    assert_eq!(
        result,
        json!([
            [1, "Customer1", "Street 1, City1", 25000],
            [2, "Customer2", "Street 2, City2", 13500],
            [3, "Customer3", "Street 3, City3", 1_255_000],
            [4, "Customer4", "Street 4, City4", 8450],
            [5, "Customer5", "Street 5, City5", 56720],
        ])
    );
}

#[tokio::test]
async fn params_may_be_omitted_for_zero_argument_calls() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/")
        .json(&json!({"jsonrpc": "2.0", "method": "get_all_accounts", "id": 9}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], 9);
    assert_eq!(body["result"].as_array().map(Vec::len), Some(5));
}

// ============================================================================
// Concrete scenario
// ============================================================================

#[tokio::test]
async fn add_update_delete_scenario() {
    let harness = TestHarness::new().await;

    let added = harness
        .result("add_account", json!(["Test", "Test address", 45000]))
        .await;
    assert_eq!(added, Value::Null);

    let all = harness.result("get_all_accounts", json!([])).await;
    let rows = all.as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert!(rows.contains(&json!([6, "Test", "Test address", 45000])));

    let (code, message) = harness
        .fault("update_credit", json!(["Test", -2000]))
        .await;
    assert_eq!(code, FAULT);
    assert_eq!(message, "Credit value cannot be less than 0.");

    let credit = harness.result("get_credit", json!(["Test"])).await;
    assert_eq!(credit, json!(45000));

    let deleted = harness.result("delete_account", json!(["Test"])).await;
    assert_eq!(deleted, Value::Null);

    let account = harness.result("get_account", json!(["Test"])).await;
    assert_eq!(account, Value::Null);
}

// ============================================================================
// add_account
// ============================================================================

#[tokio::test]
async fn add_then_get_returns_the_inputs_with_a_fresh_id() {
    let harness = TestHarness::new().await;

    harness
        .result("add_account", json!(["Zoe", "Harbour Road 9", 0]))
        .await;
    let account = harness.result("get_account", json!(["Zoe"])).await;

    let id = account[0].as_i64().unwrap();
    assert!(id > 5);
    assert_eq!(account, json!([id, "Zoe", "Harbour Road 9", 0]));
}

#[tokio::test]
async fn numeric_string_credit_is_accepted() {
    let harness = TestHarness::new().await;

    harness
        .result("add_account", json!(["Ann", "Main Street", " 120 "]))
        .await;

    assert_eq!(harness.result("get_credit", json!(["Ann"])).await, json!(120));
}

#[tokio::test]
async fn duplicate_name_fails_and_leaves_store_unchanged() {
    let harness = TestHarness::new().await;
    harness
        .result("add_account", json!(["Dup", "First Street", 10]))
        .await;
    let before = harness.result("get_all_accounts", json!([])).await;

    let (code, message) = harness
        .fault("add_account", json!(["Dup", "Second Street", 99]))
        .await;

    assert_eq!(code, FAULT);
    assert_eq!(message, "Duplicate name: 'Dup'");
    assert_eq!(harness.result("get_all_accounts", json!([])).await, before);
}

#[tokio::test]
async fn seed_names_fail_the_alphabetic_check_before_the_duplicate_check() {
    let harness = TestHarness::new().await;

    let (code, message) = harness
        .fault("add_account", json!(["Customer1", "Elsewhere", 1]))
        .await;

    assert_eq!(code, FAULT);
    assert!(message.starts_with("Name must be"), "{message}");
}

#[tokio::test]
async fn non_alphabetic_names_are_rejected() {
    let harness = TestHarness::new().await;

    for name in ["", "Bob1", "Mary Ann", "O'Brien"] {
        let (code, message) = harness
            .fault("add_account", json!([name, "Somewhere", 10]))
            .await;
        assert_eq!(code, FAULT, "{name:?}");
        assert!(message.starts_with("Name must be"), "{name:?}: {message}");
    }

    let all = harness.result("get_all_accounts", json!([])).await;
    assert_eq!(all.as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn unicode_letters_are_alphabetic() {
    let harness = TestHarness::new().await;

    harness
        .result("add_account", json!(["Zoë", "Straße 3", 5]))
        .await;

    assert_eq!(harness.result("get_credit", json!(["Zoë"])).await, json!(5));
}

#[tokio::test]
async fn add_account_rejects_bad_credit() {
    let harness = TestHarness::new().await;

    for credit in [json!("lots"), json!(1.5), json!(null), json!(true)] {
        let (code, message) = harness
            .fault("add_account", json!(["Carl", "Somewhere", credit]))
            .await;
        assert_eq!(code, FAULT);
        assert_eq!(message, "Credit must be a number.");
    }

    let (_, message) = harness
        .fault("add_account", json!(["Carl", "Somewhere", -1]))
        .await;
    assert_eq!(message, "Credit value cannot be less than 0.");

    assert_eq!(harness.result("get_account", json!(["Carl"])).await, Value::Null);
}

// ============================================================================
// Not found
// ============================================================================

#[tokio::test]
async fn missing_name_faults_without_side_effects() {
    let harness = TestHarness::new().await;
    let before = harness.result("get_all_accounts", json!([])).await;

    for (method, params) in [
        ("get_credit", json!(["Ghost"])),
        ("delete_account", json!(["Ghost"])),
        ("update_credit", json!(["Ghost", 10])),
        ("update_credit", json!(["Ghost", "abc"])),
        ("update_credit", json!(["Ghost", -10])),
    ] {
        let (code, message) = harness.fault(method, params).await;
        assert_eq!(code, FAULT, "{method}");
        assert_eq!(message, "No such name: 'Ghost'", "{method}");
    }

    assert_eq!(harness.result("get_all_accounts", json!([])).await, before);
}

#[tokio::test]
async fn names_match_exactly() {
    let harness = TestHarness::new().await;

    assert_eq!(
        harness.result("get_account", json!(["customer1"])).await,
        Value::Null
    );
    let (_, message) = harness.fault("get_credit", json!(["CUSTOMER1"])).await;
    assert_eq!(message, "No such name: 'CUSTOMER1'");
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let harness = TestHarness::new().await;

    for name in ["Customer1", "Customer2", "Customer3", "Customer4", "Customer5"] {
        harness.result("delete_account", json!([name])).await;
        assert_eq!(harness.result("get_account", json!([name])).await, Value::Null);
    }

    assert_eq!(harness.result("get_all_accounts", json!([])).await, json!([]));
}

// ============================================================================
// update_credit
// ============================================================================

#[tokio::test]
async fn update_credit_overwrites_balance() {
    let harness = TestHarness::new().await;

    harness
        .result("update_credit", json!(["Customer4", 100]))
        .await;

    assert_eq!(
        harness.result("get_account", json!(["Customer4"])).await,
        json!([4, "Customer4", "Street 4, City4", 100])
    );
}

#[tokio::test]
async fn invalid_updates_leave_credit_unchanged() {
    let harness = TestHarness::new().await;

    let (_, message) = harness
        .fault("update_credit", json!(["Customer2", "abc"]))
        .await;
    assert_eq!(message, "Credit must be a number.");

    let (_, message) = harness
        .fault("update_credit", json!(["Customer2", "-5"]))
        .await;
    assert_eq!(message, "Credit value cannot be less than 0.");

    let (code, _) = harness
        .fault("update_credit", json!(["Customer2", 5_000_000_000_i64]))
        .await;
    assert_eq!(code, FAULT);

    assert_eq!(
        harness.result("get_credit", json!(["Customer2"])).await,
        json!(13500)
    );
}

// ============================================================================
// Check-then-act race
// ============================================================================

/// Store whose name lookups never see `hidden`, simulating another caller
/// inserting it between the duplicate check and the insert.
struct LaggingStore {
    inner: MemoryStore,
    hidden: &'static str,
}

#[async_trait]
impl AccountStore for LaggingStore {
    fn backend(&self) -> &'static str {
        "lagging"
    }

    async fn ensure_schema(&self) -> ledger_rpc_store::Result<bool> {
        self.inner.ensure_schema().await
    }

    async fn list_accounts(&self) -> ledger_rpc_store::Result<Vec<Account>> {
        self.inner.list_accounts().await
    }

    async fn find_account(&self, name: &str) -> ledger_rpc_store::Result<Option<Account>> {
        if name == self.hidden {
            return Ok(None);
        }
        self.inner.find_account(name).await
    }

    async fn credit_of(&self, name: &str) -> ledger_rpc_store::Result<Option<Credit>> {
        self.inner.credit_of(name).await
    }

    async fn insert_account(&self, account: &NewAccount) -> ledger_rpc_store::Result<AccountId> {
        self.inner.insert_account(account).await
    }

    async fn delete_account(&self, name: &str) -> ledger_rpc_store::Result<u64> {
        self.inner.delete_account(name).await
    }

    async fn set_credit(&self, name: &str, credit: Credit) -> ledger_rpc_store::Result<u64> {
        self.inner.set_credit(name, credit).await
    }
}

#[tokio::test]
async fn unique_constraint_backstops_the_duplicate_check() {
    let inner = MemoryStore::new();
    bootstrap::prepare_schema(&inner).await.unwrap();
    inner
        .insert_account(&NewAccount::trusted("Dana", "Quay 1", Credit::new(10)))
        .await
        .unwrap();
    let store = LaggingStore {
        inner,
        hidden: "Dana",
    };
    let harness = TestHarness::with_store(Arc::new(store));

    let (code, message) = harness
        .fault("add_account", json!(["Dana", "Elsewhere", 1]))
        .await;

    assert_eq!(code, FAULT);
    assert_eq!(message, "Duplicate name: 'Dana'");
    let all = harness.result("get_all_accounts", json!([])).await;
    assert_eq!(all.as_array().map(Vec::len), Some(6));
    assert!(all
        .as_array()
        .unwrap()
        .contains(&json!([6, "Dana", "Quay 1", 10])));
}

#[tokio::test]
async fn store_failures_surface_as_faults() {
    // No Accounts table: every statement fails at the store.
    let harness = TestHarness::with_store(Arc::new(MemoryStore::new()));

    let (code, message) = harness.fault("get_all_accounts", json!([])).await;

    assert_eq!(code, FAULT);
    assert!(message.starts_with("store error:"), "{message}");
}
