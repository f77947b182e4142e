//! MCP deployment management.
//!
//! Deploying publishes an agent as an MCP server; the deployment itself is
//! an opaque backend operation and this service only shuttles requests and
//! status.

use crate::access::{DataAccess, ErrorCallback, Subscription, ValueCallback};
use crate::error::Result;
use crate::types::{Ack, McpDeployRequest, McpDeployment};
use std::sync::Arc;

/// Service for deploying agents as MCP servers.
#[derive(Clone)]
pub struct McpService {
    access: Arc<dyn DataAccess>,
}

impl std::fmt::Debug for McpService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpService")
            .field("adapter", &self.access.adapter_name())
            .finish()
    }
}

impl McpService {
    #[must_use]
    pub fn new(access: Arc<dyn DataAccess>) -> Self {
        Self { access }
    }

    pub async fn deploy(&self, agent_id: &str, req: &McpDeployRequest) -> Result<McpDeployment> {
        let deployment = self.access.deploy_mcp(agent_id, req).await?;
        tracing::info!(agent_id, deployment_id = %deployment.id, "MCP deployment requested");
        Ok(deployment)
    }

    pub async fn teardown(&self, agent_id: &str) -> Result<Ack> {
        self.access.teardown_mcp(agent_id).await
    }

    /// Current deployment, `None` when the agent was never deployed.
    pub async fn status(&self, agent_id: &str) -> Result<Option<McpDeployment>> {
        self.access.get_mcp_deployment(agent_id).await
    }

    /// Deployment history, newest first.
    pub async fn history(&self, agent_id: &str) -> Result<Vec<McpDeployment>> {
        self.access.list_mcp_deployments(agent_id).await
    }

    /// Watch deployment history; polls on the slow cadence in REST
    /// deployments.
    pub fn watch_history(
        &self,
        agent_id: &str,
        on_value: ValueCallback<Vec<McpDeployment>>,
        on_error: Option<ErrorCallback>,
    ) -> Subscription {
        self.access
            .subscribe_mcp_deployments(agent_id, on_value, on_error)
    }
}
