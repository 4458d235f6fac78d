//! JSON-RPC 2.0 protocol types.
//!
//! Client-side subset of the JSON-RPC 2.0 specification: enough to frame
//! requests and decode the orchestrator's responses.
//! See: https://www.jsonrpc.org/specification

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC 2.0 request object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Must be exactly "2.0"
    pub jsonrpc: String,
    /// Method name to invoke
    pub method: String,
    /// Optional parameters (object or array)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Request identifier
    pub id: Value,
}

impl Request {
    pub fn new(method: impl Into<String>, params: Option<Value>, id: i64) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method: method.into(),
            params,
            id: Value::Number(id.into()),
        }
    }
}

/// JSON-RPC 2.0 response object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Always "2.0"
    pub jsonrpc: String,
    /// Result on success (mutually exclusive with error)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error on failure (mutually exclusive with result)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    /// Request identifier (echoed from request)
    pub id: Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    /// Error code
    pub code: i32,
    /// Short error description
    pub message: String,
    /// Optional additional error data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_request() {
        let request = Request::new(
            "jobs.progress",
            Some(serde_json::json!({ "execution_ids": ["EXEC-1"] })),
            1,
        );
        let json = serde_json::to_string(&request).unwrap();

        assert!(json.contains(r#""jsonrpc":"2.0""#));
        assert!(json.contains(r#""method":"jobs.progress""#));
        assert!(json.contains(r#""id":1"#));
    }

    #[test]
    fn test_serialize_request_without_params() {
        let request = Request::new("daemon.status", None, 2);
        let json = serde_json::to_string(&request).unwrap();

        assert!(!json.contains("params"));
    }

    #[test]
    fn test_parse_success_response() {
        let json = r#"{"jsonrpc":"2.0","result":{"execution_id":"EXEC-1"},"id":1}"#;
        let response: Response = serde_json::from_str(json).unwrap();

        assert!(response.error.is_none());
        assert_eq!(response.result.unwrap()["execution_id"], "EXEC-1");
    }

    #[test]
    fn test_parse_error_response() {
        let json = r#"{"jsonrpc":"2.0","error":{"code":-32602,"message":"unknown subject"},"id":1}"#;
        let response: Response = serde_json::from_str(json).unwrap();

        assert!(response.result.is_none());
        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert_eq!(error.message, "unknown subject");
        assert!(error.data.is_none());
    }
}
