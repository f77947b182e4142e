//! Agent CRUD and status.

use crate::access::{DataAccess, ErrorCallback, Subscription, ValueCallback};
use crate::error::Result;
use crate::types::{
    Agent, AgentStatus, CreateAgentRequest, UpdateAgentRequest,
};
use std::sync::Arc;

/// Service for managing agents.
#[derive(Clone)]
pub struct AgentService {
    access: Arc<dyn DataAccess>,
}

impl std::fmt::Debug for AgentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentService")
            .field("adapter", &self.access.adapter_name())
            .finish()
    }
}

impl AgentService {
    #[must_use]
    pub fn new(access: Arc<dyn DataAccess>) -> Self {
        Self { access }
    }

    /// List all agents in an organization.
    pub async fn list(&self, org_id: &str) -> Result<Vec<Agent>> {
        self.access.list_agents(org_id).await
    }

    /// Look up a single agent; `None` when it does not exist.
    pub async fn get(&self, agent_id: &str) -> Result<Option<Agent>> {
        self.access.get_agent(agent_id).await
    }

    pub async fn create(&self, req: &CreateAgentRequest) -> Result<Agent> {
        self.access.create_agent(req).await
    }

    pub async fn update(&self, agent_id: &str, req: &UpdateAgentRequest) -> Result<Agent> {
        self.access.update_agent(agent_id, req).await
    }

    pub async fn delete(&self, agent_id: &str) -> Result<()> {
        self.access.delete_agent(agent_id).await
    }

    /// Live runtime status of a deployed agent.
    pub async fn status(&self, agent_id: &str) -> Result<Option<AgentStatus>> {
        self.access.get_agent_status(agent_id).await
    }

    /// Watch an agent's configuration for changes.
    pub fn watch(
        &self,
        agent_id: &str,
        on_value: ValueCallback<Option<Agent>>,
        on_error: Option<ErrorCallback>,
    ) -> Subscription {
        self.access.subscribe_agent(agent_id, on_value, on_error)
    }

    /// Watch runtime status; polls on the fast status cadence in REST
    /// deployments.
    pub fn watch_status(
        &self,
        agent_id: &str,
        on_value: ValueCallback<Option<AgentStatus>>,
        on_error: Option<ErrorCallback>,
    ) -> Subscription {
        self.access
            .subscribe_agent_status(agent_id, on_value, on_error)
    }
}
