//! HTTP-mode transports: the single-shot `/mcp` endpoint and the SSE
//! session pair, assembled into one axum router.

mod http;
mod router;
mod session;
mod sse;

pub use router::{build_router, AppContext};
