//! Backend contracts for starting jobs and fetching progress.
//!
//! The monitor core never talks to an orchestrator directly; it goes through
//! `ProgressBackend`, with one implementation speaking JSON-RPC to a real
//! daemon and one simulating a job in-process.

mod rpc;
mod simulated;

pub use rpc::RpcBackend;
pub use simulated::SimulatedBackend;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::AppConfig;
use crate::core::models::ProgressSnapshot;
use crate::rpc::{ClientError, RpcClient};

/// Errors surfaced by backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend refused the request (validation, authorization, unknown
    /// subject).
    #[error("request rejected by backend: {0}")]
    Rejected(String),
    /// Transport-level failure talking to the backend.
    #[error(transparent)]
    Transport(#[from] ClientError),
}

/// The two operations the monitor core depends on.
#[async_trait]
pub trait ProgressBackend: Send + Sync {
    /// Begin a backend job for the given subject record. Resolves with the
    /// execution id once the job is accepted, not once it completes.
    async fn start_job(&self, subject_id: &str) -> Result<String, BackendError>;

    /// Fetch step/execution/history data for the given execution ids. An
    /// empty slice asks for all executions the caller can see.
    async fn fetch_progress(
        &self,
        execution_ids: &[String],
    ) -> Result<ProgressSnapshot, BackendError>;
}

/// Pick the backend implementation the config asks for.
pub fn create_backend(config: &AppConfig) -> Arc<dyn ProgressBackend> {
    if config.simulation {
        Arc::new(SimulatedBackend::new())
    } else {
        Arc::new(RpcBackend::new(RpcClient::new(config.rpc_addr)))
    }
}
