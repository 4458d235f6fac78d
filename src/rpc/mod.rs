//! JSON-RPC plumbing for talking to the orchestrator daemon.
//!
//! - `protocol`: client-side JSON-RPC 2.0 request/response types
//! - `client`: TCP client with newline-delimited JSON framing

mod client;
mod protocol;

pub use client::{ClientError, RpcClient};
pub use protocol::{Request, Response, RpcError};
