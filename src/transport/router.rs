//! Router assembly for the HTTP-mode server: binds the SSE and single-shot
//! transports onto one axum `Router`, with permissive CORS.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::rpc::AppState as RpcState;

use super::http::{health_handler, mcp_get_handler, mcp_post_handler};
use super::session::SessionManager;
use super::sse::{messages_handler, sse_handler};

/// Shared state handed to every axum handler: the RPC dispatch state plus
/// the SSE session registry.
#[derive(Clone)]
pub struct AppContext {
    /// State shared with the dispatch core (DB pool, cached rates).
    pub rpc_state: RpcState,
    /// Registry of live SSE sessions.
    pub sessions: SessionManager,
}

impl AppContext {
    /// Builds a fresh context with no active SSE sessions.
    pub fn new(rpc_state: RpcState) -> Self {
        AppContext {
            rpc_state,
            sessions: SessionManager::default(),
        }
    }
}

/// Builds the full HTTP router: health checks, the single-shot `/mcp`
/// endpoint, and the `/sse` + `/messages/` pair.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
        .route("/mcp", get(mcp_get_handler).post(mcp_post_handler))
        .route("/sse", get(sse_handler))
        .route("/messages/", post(messages_handler))
        .layer(cors)
        .with_state(ctx)
}
