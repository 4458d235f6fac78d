//! RPC client for connecting to the orchestrator daemon.
//!
//! Sends newline-delimited JSON-RPC requests over TCP, one connection per
//! call.

use std::net::SocketAddr;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use super::protocol::{Request, Response, RpcError};

/// Error returned by RPC client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to connect to orchestrator: {0}")]
    Connect(#[source] std::io::Error),
    #[error("communication error: {0}")]
    Io(#[source] std::io::Error),
    #[error("failed to serialize request: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to parse response: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("rpc error {}: {}", .0.code, .0.message)]
    Rpc(RpcError),
}

/// Client for the orchestrator's JSON-RPC endpoint.
pub struct RpcClient {
    addr: SocketAddr,
}

impl RpcClient {
    /// Create a new client that will connect to the given address.
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }

    /// Call an RPC method and deserialize its result.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Option<Value>,
    ) -> Result<T, ClientError> {
        let mut stream = TcpStream::connect(self.addr)
            .await
            .map_err(ClientError::Connect)?;

        let request = Request::new(method, params, 1);
        let mut request_json = serde_json::to_string(&request).map_err(ClientError::Serialize)?;
        request_json.push('\n');

        stream
            .write_all(request_json.as_bytes())
            .await
            .map_err(ClientError::Io)?;

        let mut reader = BufReader::new(stream);
        let mut response_line = String::new();
        reader
            .read_line(&mut response_line)
            .await
            .map_err(ClientError::Io)?;

        let response: Response =
            serde_json::from_str(&response_line).map_err(ClientError::Parse)?;

        if let Some(error) = response.error {
            return Err(ClientError::Rpc(error));
        }

        let result = response.result.unwrap_or(Value::Null);
        serde_json::from_value(result).map_err(ClientError::Parse)
    }
}
