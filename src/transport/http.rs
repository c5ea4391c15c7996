//! The single-shot HTTP transport: `GET /mcp` for discovery, `POST /mcp`
//! for synchronous request/response dispatch.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

use crate::rpc::{dispatch, RpcRequest};

use super::router::AppContext;

/// `GET /mcp`: returns an `initialize`-shaped result for discovery clients
/// that probe before opening a session.
pub async fn mcp_get_handler() -> impl IntoResponse {
    Json(json!({
        "jsonrpc": "2.0",
        "result": {
            "protocolVersion": "2024-11-05",
            "serverInfo": {"name": "asistencia-mcp", "version": env!("CARGO_PKG_VERSION")},
            "capabilities": {"tools": {}},
        }
    }))
}

/// `POST /mcp`: dispatches one JSON-RPC request synchronously and returns
/// the response as a single JSON body.
pub async fn mcp_post_handler(
    State(ctx): State<AppContext>,
    payload: Result<Json<RpcRequest>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "jsonrpc": "2.0",
                    "id": Value::Null,
                    "error": {"code": -32700, "message": rejection.to_string()},
                })),
            )
                .into_response();
        }
    };

    let response = dispatch(&ctx.rpc_state, request).await;
    (StatusCode::OK, Json(response)).into_response()
}

/// `GET /` and `GET /health`: a liveness probe.
pub async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "asistencia-mcp",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
