//! JSON-RPC implementation of the backend contracts.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{BackendError, ProgressBackend};
use crate::core::models::ProgressSnapshot;
use crate::rpc::RpcClient;

/// Backend that forwards both contracts to the orchestrator daemon.
pub struct RpcBackend {
    client: RpcClient,
}

impl RpcBackend {
    pub fn new(client: RpcClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProgressBackend for RpcBackend {
    async fn start_job(&self, subject_id: &str) -> Result<String, BackendError> {
        #[derive(Deserialize)]
        struct ExecuteReply {
            execution_id: String,
        }

        let reply: ExecuteReply = self
            .client
            .call("jobs.execute", Some(json!({ "subject_id": subject_id })))
            .await?;

        Ok(reply.execution_id)
    }

    async fn fetch_progress(
        &self,
        execution_ids: &[String],
    ) -> Result<ProgressSnapshot, BackendError> {
        let snapshot = self
            .client
            .call("jobs.progress", Some(json!({ "execution_ids": execution_ids })))
            .await?;

        Ok(snapshot)
    }
}
