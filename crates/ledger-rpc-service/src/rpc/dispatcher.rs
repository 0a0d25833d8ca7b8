//! Method registry.
//!
//! Maps method names to async handlers. With introspection enabled the
//! registry also answers `system.listMethods` and `system.methodHelp`
//! from its own table.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::RpcFault;
use crate::rpc::envelope::{RpcRequest, RpcResponse};
use crate::rpc::params::Params;

/// Name of the built-in method listing.
pub const LIST_METHODS: &str = "system.listMethods";

/// Name of the built-in help lookup.
pub const METHOD_HELP: &str = "system.methodHelp";

/// Result of one handler invocation.
pub type HandlerResult = Result<Value, RpcFault>;

type Handler<S> = Arc<dyn Fn(S, Params) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

enum Entry<S> {
    Handler(Handler<S>),
    ListMethods,
    MethodHelp,
}

struct Method<S> {
    help: &'static str,
    entry: Entry<S>,
}

/// Registry of callable methods over a shared handler state `S`.
pub struct Dispatcher<S> {
    methods: BTreeMap<&'static str, Method<S>>,
}

impl<S> Default for Dispatcher<S>
where
    S: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Dispatcher<S>
where
    S: Clone + Send + 'static,
{
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            methods: BTreeMap::new(),
        }
    }

    /// Registry with the `system.*` introspection methods pre-registered.
    #[must_use]
    pub fn with_introspection() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.methods.insert(
            LIST_METHODS,
            Method {
                help: "system.listMethods() => [names]\n\nList the names of all callable methods.",
                entry: Entry::ListMethods,
            },
        );
        dispatcher.methods.insert(
            METHOD_HELP,
            Method {
                help: "system.methodHelp(name) => string\n\nReturn the help text of a method.",
                entry: Entry::MethodHelp,
            },
        );
        dispatcher
    }

    /// Register `handler` under `name`, replacing any previous registration.
    pub fn register<F, Fut>(&mut self, name: &'static str, help: &'static str, handler: F) -> &mut Self
    where
        F: Fn(S, Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        let handler: Handler<S> = Arc::new(move |state, params| handler(state, params).boxed());
        self.methods.insert(
            name,
            Method {
                help,
                entry: Entry::Handler(handler),
            },
        );
        self
    }

    /// Registered method names, sorted.
    #[must_use]
    pub fn method_names(&self) -> Vec<&'static str> {
        self.methods.keys().copied().collect()
    }

    /// Help text for `name`, if registered.
    #[must_use]
    pub fn help(&self, name: &str) -> Option<&'static str> {
        self.methods.get(name).map(|m| m.help)
    }

    /// Invoke `method` with `params`.
    ///
    /// # Errors
    ///
    /// Returns the handler's fault, or a method-not-found fault.
    pub async fn call(&self, state: S, method: &str, params: Params) -> HandlerResult {
        let Some(entry) = self.methods.get(method).map(|m| &m.entry) else {
            warn!(method = %method, "Unknown method");
            return Err(RpcFault::method_not_found(method));
        };

        match entry {
            Entry::Handler(handler) => handler(state, params).await,
            Entry::ListMethods => {
                params.expect_arity(LIST_METHODS, 0)?;
                Ok(Value::from(self.method_names()))
            }
            Entry::MethodHelp => {
                params.expect_arity(METHOD_HELP, 1)?;
                let name = params.string(0, "method name")?;
                Ok(Value::from(self.help(name).unwrap_or_default()))
            }
        }
    }

    /// Decode a raw request body, dispatch it, and build the response.
    pub async fn handle(&self, state: S, body: &[u8]) -> RpcResponse {
        let request = match RpcRequest::decode(body) {
            Ok(request) => request,
            Err(response) => {
                debug!(error = ?response.error, "Rejected request envelope");
                return *response;
            }
        };

        let outcome = match request.positional_params() {
            Ok(params) => self.call(state, &request.method, params).await,
            Err(fault) => Err(fault),
        };

        match outcome {
            Ok(result) => RpcResponse::success(request.id, result),
            Err(fault) => {
                debug!(method = %request.method, code = fault.code, message = %fault.message, "Call faulted");
                RpcResponse::failure(request.id, fault)
            }
        }
    }
}
