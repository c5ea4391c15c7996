//! JSON-RPC tool registry and dispatch core shared by every transport.

mod dispatch;
mod envelope;
mod registry;
mod state;
mod tools;

pub use dispatch::{dispatch, parse_request};
pub use envelope::{RpcError, RpcRequest, RpcResponse};
pub use registry::{catalog, find, validate_args, ToolSpec};
pub use state::AppState;
