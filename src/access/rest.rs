//! REST data access adapter.
//!
//! Every operation is a single REST call against the agent-builder backend
//! (or the channel bridge for integrations). Subscriptions are emulated
//! with [`Poller`] loops at per-resource cadences.
//!
//! List endpoints wrap their payload in an envelope whose collection key
//! varies by resource (`data` on newer routes, a resource-specific key on
//! older ones); the envelope types below accept both and decode an absent
//! payload as empty.

use crate::access::DataAccess;
use crate::access::poll::{
    DEFAULT_POLL_INTERVAL, ErrorCallback, HISTORY_POLL_INTERVAL, Poller, STATUS_POLL_INTERVAL,
    Subscription, ValueCallback,
};
use crate::config::StudioConfig;
use crate::error::Result;
use crate::transport::{Credential, Transport};
use crate::types::*;
use async_trait::async_trait;
use futures::FutureExt;
use serde::Deserialize;

/// Data access over plain REST with polling subscriptions.
#[derive(Debug, Clone)]
pub struct RestDataAccess {
    api: Transport,
    bridge: Transport,
}

impl RestDataAccess {
    /// Build from configuration, sharing the configured API key across both
    /// backend services.
    pub fn from_config(config: &StudioConfig) -> Result<Self> {
        let credential = config.api_key.clone().map(Credential::ApiKey);
        let api = Transport::new(&config.api_base_url, credential.clone())?;
        let bridge = Transport::new(&config.bridge_base_url, credential)?;
        Ok(Self::new(api, bridge))
    }

    /// Build from pre-configured transports.
    #[must_use]
    pub fn new(api: Transport, bridge: Transport) -> Self {
        Self { api, bridge }
    }
}

// =============================================================================
// List envelopes
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct AgentListPayload {
    #[serde(default, alias = "agents")]
    data: Vec<Agent>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiKeyListPayload {
    #[serde(default, alias = "api_keys")]
    data: Vec<ApiKey>,
}

#[derive(Debug, Default, Deserialize)]
struct DocumentListPayload {
    #[serde(default, alias = "documents")]
    data: Vec<Document>,
}

#[derive(Debug, Default, Deserialize)]
struct SessionListPayload {
    #[serde(default, alias = "sessions")]
    data: Vec<SessionSummary>,
}

#[derive(Debug, Default, Deserialize)]
struct MessageListPayload {
    #[serde(default, alias = "messages")]
    data: Vec<ChatMessage>,
}

#[derive(Debug, Default, Deserialize)]
struct DailyUsagePayload {
    #[serde(default, alias = "daily")]
    data: Vec<DailyUsage>,
}

#[derive(Debug, Default, Deserialize)]
struct DeploymentListPayload {
    #[serde(default, alias = "deployments")]
    data: Vec<McpDeployment>,
}

// =============================================================================
// Fetch functions
// =============================================================================
//
// Shared between the one-shot trait methods and the polling closures, which
// need owned arguments for the `'static` task boundary.

async fn fetch_agent(api: Transport, agent_id: String) -> Result<Option<Agent>> {
    api.get_optional(&format!("/api/agents/{agent_id}")).await
}

async fn fetch_agent_status(api: Transport, agent_id: String) -> Result<Option<AgentStatus>> {
    api.get_optional(&format!("/api/agents/{agent_id}/status"))
        .await
}

async fn fetch_documents(api: Transport, agent_id: String) -> Result<Vec<Document>> {
    let payload: DocumentListPayload = api
        .get(&format!("/api/agents/{agent_id}/documents"))
        .await?;
    Ok(payload.data)
}

async fn fetch_sessions(api: Transport, agent_id: String) -> Result<Vec<SessionSummary>> {
    let payload: SessionListPayload =
        api.get(&format!("/api/agents/{agent_id}/sessions")).await?;
    Ok(payload.data)
}

async fn fetch_mcp_deployments(api: Transport, agent_id: String) -> Result<Vec<McpDeployment>> {
    let payload: DeploymentListPayload = api
        .get(&format!("/api/agents/{agent_id}/mcp/deployments"))
        .await?;
    Ok(payload.data)
}

#[async_trait]
impl DataAccess for RestDataAccess {
    fn adapter_name(&self) -> &'static str {
        "rest"
    }

    // ─────────────────────────────────────────────────────────────────────
    // Organizations and agents
    // ─────────────────────────────────────────────────────────────────────

    async fn get_organization(&self, org_id: &str) -> Result<Option<Organization>> {
        self.api
            .get_optional(&format!("/api/organizations/{org_id}"))
            .await
    }

    async fn list_agents(&self, org_id: &str) -> Result<Vec<Agent>> {
        let payload: AgentListPayload = self
            .api
            .get_with_query("/api/agents", &[("org_id", org_id)])
            .await?;
        Ok(payload.data)
    }

    async fn get_agent(&self, agent_id: &str) -> Result<Option<Agent>> {
        fetch_agent(self.api.clone(), agent_id.to_string()).await
    }

    async fn create_agent(&self, req: &CreateAgentRequest) -> Result<Agent> {
        self.api.post("/api/agents", req).await
    }

    async fn update_agent(&self, agent_id: &str, req: &UpdateAgentRequest) -> Result<Agent> {
        self.api.patch(&format!("/api/agents/{agent_id}"), req).await
    }

    async fn delete_agent(&self, agent_id: &str) -> Result<()> {
        self.api.delete(&format!("/api/agents/{agent_id}")).await
    }

    async fn get_agent_status(&self, agent_id: &str) -> Result<Option<AgentStatus>> {
        fetch_agent_status(self.api.clone(), agent_id.to_string()).await
    }

    // ─────────────────────────────────────────────────────────────────────
    // API keys
    // ─────────────────────────────────────────────────────────────────────

    async fn list_api_keys(&self, agent_id: &str) -> Result<Vec<ApiKey>> {
        let payload: ApiKeyListPayload = self
            .api
            .get(&format!("/api/v1/agents/{agent_id}/api-keys"))
            .await?;
        Ok(payload.data)
    }

    async fn create_api_key(&self, agent_id: &str, req: &CreateApiKeyRequest) -> Result<ApiKey> {
        self.api
            .post(&format!("/api/v1/agents/{agent_id}/api-keys"), req)
            .await
    }

    async fn revoke_api_key(&self, agent_id: &str, key_id: &str) -> Result<()> {
        self.api
            .delete(&format!("/api/v1/agents/{agent_id}/api-keys/{key_id}"))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Documents
    // ─────────────────────────────────────────────────────────────────────

    async fn list_documents(&self, agent_id: &str) -> Result<Vec<Document>> {
        fetch_documents(self.api.clone(), agent_id.to_string()).await
    }

    async fn get_document(&self, agent_id: &str, document_id: &str) -> Result<Option<Document>> {
        self.api
            .get_optional(&format!("/api/agents/{agent_id}/documents/{document_id}"))
            .await
    }

    async fn create_document(
        &self,
        agent_id: &str,
        req: &CreateDocumentRequest,
    ) -> Result<Document> {
        self.api
            .post(&format!("/api/agents/{agent_id}/documents"), req)
            .await
    }

    async fn delete_document(&self, agent_id: &str, document_id: &str) -> Result<()> {
        self.api
            .delete(&format!("/api/agents/{agent_id}/documents/{document_id}"))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Conversations
    // ─────────────────────────────────────────────────────────────────────

    async fn list_sessions(&self, agent_id: &str) -> Result<Vec<SessionSummary>> {
        fetch_sessions(self.api.clone(), agent_id.to_string()).await
    }

    async fn list_messages(&self, agent_id: &str, session_id: &str) -> Result<Vec<ChatMessage>> {
        let payload: MessageListPayload = self
            .api
            .get(&format!("/api/agents/{agent_id}/sessions/{session_id}/messages"))
            .await?;
        Ok(payload.data)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Usage analytics
    // ─────────────────────────────────────────────────────────────────────

    async fn get_usage_summary(&self, agent_id: &str) -> Result<Option<UsageSummary>> {
        self.api
            .get_optional(&format!("/api/agents/{agent_id}/analytics/summary"))
            .await
    }

    async fn list_daily_usage(&self, agent_id: &str) -> Result<Vec<DailyUsage>> {
        let payload: DailyUsagePayload = self
            .api
            .get(&format!("/api/agents/{agent_id}/analytics/daily"))
            .await?;
        Ok(payload.data)
    }

    // ─────────────────────────────────────────────────────────────────────
    // MCP deployment
    // ─────────────────────────────────────────────────────────────────────

    async fn get_mcp_deployment(&self, agent_id: &str) -> Result<Option<McpDeployment>> {
        self.api
            .get_optional(&format!("/api/agents/{agent_id}/mcp/status"))
            .await
    }

    async fn list_mcp_deployments(&self, agent_id: &str) -> Result<Vec<McpDeployment>> {
        fetch_mcp_deployments(self.api.clone(), agent_id.to_string()).await
    }

    async fn deploy_mcp(&self, agent_id: &str, req: &McpDeployRequest) -> Result<McpDeployment> {
        self.api
            .post(&format!("/api/agents/{agent_id}/mcp/deploy"), req)
            .await
    }

    async fn teardown_mcp(&self, agent_id: &str) -> Result<Ack> {
        self.api
            .delete_json(&format!("/api/agents/{agent_id}/mcp/deploy"))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Channel integrations
    // ─────────────────────────────────────────────────────────────────────

    async fn get_tiledesk_bot(&self, agent_id: &str) -> Result<Option<TiledeskBot>> {
        self.bridge
            .get_optional(&format!("/api/agents/{agent_id}/integrations/tiledesk"))
            .await
    }

    async fn connect_tiledesk_bot(
        &self,
        agent_id: &str,
        req: &ConnectTiledeskRequest,
    ) -> Result<TiledeskBot> {
        self.bridge
            .post(&format!("/api/agents/{agent_id}/integrations/tiledesk"), req)
            .await
    }

    async fn disconnect_tiledesk_bot(&self, agent_id: &str) -> Result<Ack> {
        self.bridge
            .delete_json(&format!("/api/agents/{agent_id}/integrations/tiledesk"))
            .await
    }

    async fn get_whatsapp_channel(&self, agent_id: &str) -> Result<Option<WhatsappChannel>> {
        self.bridge
            .get_optional(&format!("/api/agents/{agent_id}/integrations/whatsapp"))
            .await
    }

    async fn connect_whatsapp_channel(
        &self,
        agent_id: &str,
        req: &ConnectWhatsappRequest,
    ) -> Result<WhatsappChannel> {
        self.bridge
            .post(&format!("/api/agents/{agent_id}/integrations/whatsapp"), req)
            .await
    }

    async fn disconnect_whatsapp_channel(&self, agent_id: &str) -> Result<Ack> {
        self.bridge
            .delete_json(&format!("/api/agents/{agent_id}/integrations/whatsapp"))
            .await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Subscriptions
    // ─────────────────────────────────────────────────────────────────────

    fn subscribe_agent(
        &self,
        agent_id: &str,
        on_value: ValueCallback<Option<Agent>>,
        on_error: Option<ErrorCallback>,
    ) -> Subscription {
        let api = self.api.clone();
        let agent_id = agent_id.to_string();
        Poller::spawn(
            DEFAULT_POLL_INTERVAL,
            true,
            move || fetch_agent(api.clone(), agent_id.clone()).boxed(),
            on_value,
            on_error,
        )
    }

    fn subscribe_agent_status(
        &self,
        agent_id: &str,
        on_value: ValueCallback<Option<AgentStatus>>,
        on_error: Option<ErrorCallback>,
    ) -> Subscription {
        let api = self.api.clone();
        let agent_id = agent_id.to_string();
        Poller::spawn(
            STATUS_POLL_INTERVAL,
            true,
            move || fetch_agent_status(api.clone(), agent_id.clone()).boxed(),
            on_value,
            on_error,
        )
    }

    fn subscribe_documents(
        &self,
        agent_id: &str,
        on_value: ValueCallback<Vec<Document>>,
        on_error: Option<ErrorCallback>,
    ) -> Subscription {
        let api = self.api.clone();
        let agent_id = agent_id.to_string();
        Poller::spawn(
            DEFAULT_POLL_INTERVAL,
            true,
            move || fetch_documents(api.clone(), agent_id.clone()).boxed(),
            on_value,
            on_error,
        )
    }

    fn subscribe_sessions(
        &self,
        agent_id: &str,
        on_value: ValueCallback<Vec<SessionSummary>>,
        on_error: Option<ErrorCallback>,
    ) -> Subscription {
        let api = self.api.clone();
        let agent_id = agent_id.to_string();
        Poller::spawn(
            DEFAULT_POLL_INTERVAL,
            true,
            move || fetch_sessions(api.clone(), agent_id.clone()).boxed(),
            on_value,
            on_error,
        )
    }

    fn subscribe_mcp_deployments(
        &self,
        agent_id: &str,
        on_value: ValueCallback<Vec<McpDeployment>>,
        on_error: Option<ErrorCallback>,
    ) -> Subscription {
        let api = self.api.clone();
        let agent_id = agent_id.to_string();
        Poller::spawn(
            HISTORY_POLL_INTERVAL,
            false,
            move || fetch_mcp_deployments(api.clone(), agent_id.clone()).boxed(),
            on_value,
            on_error,
        )
    }
}
