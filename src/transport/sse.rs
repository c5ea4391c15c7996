//! The SSE transport: `GET /sse` opens a long-lived event stream and
//! `POST /messages/?session_id=…` feeds it JSON-RPC requests out of band.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::Json;
use futures::Stream;
use serde::Deserialize;
use uuid::Uuid;

use crate::rpc::{dispatch, parse_request};

use super::router::AppContext;
use super::session::SessionManager;

/// Query parameters accepted by `POST /messages/`.
#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    session_id: Uuid,
}

/// `GET /sse`: opens the event stream and hands back the session id and the
/// paired POST endpoint in the first event.
pub async fn sse_handler(
    State(ctx): State<AppContext>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (session_id, mut inbound_rx, mut outbound_rx) = ctx.sessions.create().await;

    let state = ctx.rpc_state.clone();
    let sessions = ctx.sessions.clone();
    tokio::spawn(async move {
        while let Some(request) = inbound_rx.recv().await {
            let response = dispatch(&state, request).await;
            sessions.push_outbound(session_id, response).await;
        }
    });

    let sessions_for_stream = ctx.sessions.clone();
    let stream = async_stream::stream! {
        let _guard = SessionCleanupGuard {
            sessions: sessions_for_stream,
            session_id,
        };

        let endpoint = format!("/messages/?session_id={session_id}");
        let initial = serde_json::json!({"sessionId": session_id, "endpoint": endpoint});
        yield Ok(Event::default().event("endpoint").data(initial.to_string()));

        while let Some(response) = outbound_rx.recv().await {
            let data = serde_json::to_string(&response).unwrap_or_default();
            yield Ok(Event::default().data(data));
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

struct SessionCleanupGuard {
    sessions: SessionManager,
    session_id: Uuid,
}

impl Drop for SessionCleanupGuard {
    fn drop(&mut self) {
        let sessions = self.sessions.clone();
        let session_id = self.session_id;
        tokio::spawn(async move {
            sessions.remove(session_id).await;
        });
    }
}

/// `POST /messages/?session_id=…`: pushes one JSON-RPC request into the
/// named session's inbound queue and returns 202, or 429 if the queue is
/// full, or 404 if the session does not exist.
pub async fn messages_handler(
    State(ctx): State<AppContext>,
    Query(query): Query<MessagesQuery>,
    body: String,
) -> impl IntoResponse {
    let request = match parse_request(&body) {
        Ok(request) => request,
        Err(response) => return (StatusCode::BAD_REQUEST, Json(response)).into_response(),
    };

    match ctx.sessions.push_inbound(query.session_id, request).await {
        Some(Ok(())) => StatusCode::ACCEPTED.into_response(),
        Some(Err(())) => StatusCode::TOO_MANY_REQUESTS.into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
