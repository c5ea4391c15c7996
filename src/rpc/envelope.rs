//! JSON-RPC 2.0 message envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An inbound JSON-RPC request or notification.
///
/// `id` is `None` for notifications; this dialect still sends a response for
/// them (see [`crate::rpc::dispatch`]), so the distinction matters only for
/// what `id` the reply carries.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcRequest {
    /// Must be `"2.0"`; not otherwise validated.
    #[serde(default)]
    pub jsonrpc: String,
    /// Request identifier, echoed back on the response.
    #[serde(default)]
    pub id: Option<Value>,
    /// The method name, e.g. `"tools/call"`.
    pub method: String,
    /// Method parameters, if any.
    #[serde(default)]
    pub params: Value,
}

/// An outbound JSON-RPC response.
#[derive(Debug, Clone, Serialize)]
pub struct RpcResponse {
    /// Always `"2.0"`.
    pub jsonrpc: &'static str,
    /// Echoes the request id, or `null` for notifications.
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Present on success.
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Present on failure; mutually exclusive with `result`.
    pub error: Option<RpcError>,
}

/// A JSON-RPC error object.
#[derive(Debug, Clone, Serialize)]
pub struct RpcError {
    /// The JSON-RPC error code.
    pub code: i64,
    /// A short human-readable message.
    pub message: String,
}

impl RpcResponse {
    /// Builds a success response.
    pub fn success(id: Value, result: Value) -> Self {
        RpcResponse {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Builds an error response.
    pub fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        RpcResponse {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_params_default_to_null() {
        let req: RpcRequest = serde_json::from_str(r#"{"jsonrpc":"2.0","method":"initialize"}"#).unwrap();
        assert_eq!(req.params, Value::Null);
        assert_eq!(req.id, None);
    }

    #[test]
    fn test_success_response_omits_error_field() {
        let resp = RpcResponse::success(Value::from(1), serde_json::json!({"ok": true}));
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["result"]["ok"], true);
    }

    #[test]
    fn test_failure_response_omits_result_field() {
        let resp = RpcResponse::failure(Value::Null, -32601, "Method not found: x");
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("result").is_none());
        assert_eq!(json["error"]["code"], -32601);
    }
}
