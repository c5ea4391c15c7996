//! Per-session SSE state: one inbound queue, one outbound queue, and a
//! cancellation flag, torn down when the paired `GET /sse` connection
//! closes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;

use crate::rpc::{RpcRequest, RpcResponse};

/// Inbound queue capacity; a full queue causes `POST /messages` to answer
/// 429 rather than block.
const INBOUND_CAPACITY: usize = 32;

/// One active SSE session's channels and cancellation flag.
pub struct SessionHandle {
    inbound_tx: mpsc::Sender<RpcRequest>,
    outbound_tx: mpsc::UnboundedSender<RpcResponse>,
    cancelled: Arc<AtomicBool>,
}

impl SessionHandle {
    /// Pushes a request into this session's inbound queue.
    ///
    /// Returns `Err(())` if the queue is full, which the caller should
    /// surface as HTTP 429.
    pub fn try_push_inbound(&self, request: RpcRequest) -> Result<(), ()> {
        self.inbound_tx.try_send(request).map_err(|_| ())
    }

    /// Whether this session has been cancelled (its SSE connection closed).
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Pushes a response onto this session's outbound stream. Silently
    /// dropped if the SSE connection already closed (receiver gone).
    fn push_outbound(&self, response: RpcResponse) {
        let _ = self.outbound_tx.send(response);
    }
}

/// Registry of live SSE sessions, guarded by a single lock — contention is
/// bounded by the number of concurrent SSE clients.
#[derive(Clone, Default)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<Uuid, SessionHandle>>>,
}

impl SessionManager {
    /// Registers a new session, returning its id and the channel ends the
    /// caller should consume (inbound receiver) and produce into (outbound
    /// sender is kept internally; the caller gets the corresponding
    /// receiver).
    pub async fn create(&self) -> (Uuid, mpsc::Receiver<RpcRequest>, mpsc::UnboundedReceiver<RpcResponse>) {
        let id = Uuid::new_v4();
        let (inbound_tx, inbound_rx) = mpsc::channel(INBOUND_CAPACITY);
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let cancelled = Arc::new(AtomicBool::new(false));

        let handle = SessionHandle {
            inbound_tx,
            outbound_tx,
            cancelled,
        };
        self.sessions.lock().await.insert(id, handle);
        (id, inbound_rx, outbound_rx)
    }

    /// Pushes a request into `session_id`'s inbound queue.
    ///
    /// Returns `Some(Err(()))` when the session exists but is full, `None`
    /// when no such session is registered.
    pub async fn push_inbound(&self, session_id: Uuid, request: RpcRequest) -> Option<Result<(), ()>> {
        let sessions = self.sessions.lock().await;
        sessions.get(&session_id).map(|h| h.try_push_inbound(request))
    }

    /// Pushes a dispatch result onto `session_id`'s outbound stream, if that
    /// session still exists.
    pub async fn push_outbound(&self, session_id: Uuid, response: RpcResponse) {
        if let Some(handle) = self.sessions.lock().await.get(&session_id) {
            handle.push_outbound(response);
        }
    }

    /// Tears down a session: marks it cancelled and removes it from the
    /// registry. Called when the `GET /sse` connection closes.
    pub async fn remove(&self, session_id: Uuid) {
        if let Some(handle) = self.sessions.lock().await.remove(&session_id) {
            handle.cancelled.store(true, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sample_request() -> RpcRequest {
        serde_json::from_value(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_registers_session() {
        let manager = SessionManager::default();
        let (id, _inbound_rx, _outbound_rx) = manager.create().await;
        let pushed = manager.push_inbound(id, sample_request()).await;
        assert!(matches!(pushed, Some(Ok(()))));
    }

    #[tokio::test]
    async fn test_push_inbound_unknown_session_returns_none() {
        let manager = SessionManager::default();
        let pushed = manager.push_inbound(Uuid::new_v4(), sample_request()).await;
        assert!(pushed.is_none());
    }

    #[tokio::test]
    async fn test_remove_tears_down_session() {
        let manager = SessionManager::default();
        let (id, _inbound_rx, _outbound_rx) = manager.create().await;
        manager.remove(id).await;
        let pushed = manager.push_inbound(id, sample_request()).await;
        assert!(pushed.is_none());
    }

    #[tokio::test]
    async fn test_inbound_queue_rejects_when_full() {
        let manager = SessionManager::default();
        let (id, _inbound_rx, _outbound_rx) = manager.create().await;
        for _ in 0..INBOUND_CAPACITY {
            assert!(manager.push_inbound(id, sample_request()).await.unwrap().is_ok());
        }
        let overflow = manager.push_inbound(id, sample_request()).await;
        assert!(matches!(overflow, Some(Err(()))));
    }

    #[test]
    fn test_request_deserializes_for_fixtures() {
        let req = sample_request();
        assert_eq!(req.method, "initialize");
        let _: Value = serde_json::to_value(&req.params).unwrap();
    }
}
