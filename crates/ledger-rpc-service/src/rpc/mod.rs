//! JSON-RPC plumbing: envelopes, positional params, and the method registry.

pub mod dispatcher;
pub mod envelope;
pub mod params;

pub use dispatcher::{Dispatcher, HandlerResult, LIST_METHODS, METHOD_HELP};
pub use envelope::{RpcRequest, RpcResponse, JSONRPC_VERSION};
pub use params::Params;
