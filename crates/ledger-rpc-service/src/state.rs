//! Application state.

use std::sync::Arc;

use ledger_rpc_store::AccountStore;

use crate::config::ServiceConfig;
use crate::handlers::accounts::{self, Service};
use crate::ledger::AccountService;
use crate::rpc::Dispatcher;

/// Application state shared across handlers.
pub struct AppState {
    /// Account operations.
    pub service: Service,

    /// Registered RPC methods.
    pub dispatcher: Dispatcher<Service>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create the application state over a ready store.
    #[must_use]
    pub fn new(store: Arc<dyn AccountStore>, config: ServiceConfig) -> Self {
        let service = Arc::new(AccountService::new(store));

        let mut dispatcher = Dispatcher::with_introspection();
        accounts::register(&mut dispatcher);
        tracing::debug!(methods = ?dispatcher.method_names(), "RPC methods registered");

        Self {
            service,
            dispatcher,
            config,
        }
    }
}
