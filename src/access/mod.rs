//! Uniform data access over the platform's two transports.
//!
//! The [`DataAccess`] trait is the single operation surface the service
//! layer consumes. Two adapters implement it: [`rest::RestDataAccess`]
//! issues one REST call per operation and emulates subscriptions by
//! polling; `realtime::RealtimeDataAccess` (feature `realtime`) attaches
//! live event-stream listeners instead. Which adapter backs a client is
//! decided once, at construction, by [`factory::build_data_access`].
//!
//! Read semantics are uniform across adapters: an absent single resource is
//! `Ok(None)` and an absent or empty collection is `Ok(vec![])` — never an
//! error.

pub mod factory;
pub mod poll;
pub mod rest;

#[cfg(feature = "realtime")]
pub mod realtime;

pub use factory::build_data_access;
pub use poll::{ErrorCallback, Subscription, ValueCallback};
pub use rest::RestDataAccess;

use crate::error::Result;
use crate::types::*;
use async_trait::async_trait;

/// Uniform interface over the REST and realtime transports.
///
/// Adapters are stateless pass-throughs: payloads are forwarded verbatim
/// (modulo the normalization in [`crate::types`]) and no client-side
/// validation is performed. Instances are immutable after construction and
/// safe to share behind an `Arc`.
#[async_trait]
pub trait DataAccess: Send + Sync + std::fmt::Debug {
    /// Adapter name for logging and diagnostics.
    fn adapter_name(&self) -> &'static str;

    // ─────────────────────────────────────────────────────────────────────
    // Organizations and agents
    // ─────────────────────────────────────────────────────────────────────

    async fn get_organization(&self, org_id: &str) -> Result<Option<Organization>>;

    async fn list_agents(&self, org_id: &str) -> Result<Vec<Agent>>;

    async fn get_agent(&self, agent_id: &str) -> Result<Option<Agent>>;

    async fn create_agent(&self, req: &CreateAgentRequest) -> Result<Agent>;

    async fn update_agent(&self, agent_id: &str, req: &UpdateAgentRequest) -> Result<Agent>;

    async fn delete_agent(&self, agent_id: &str) -> Result<()>;

    async fn get_agent_status(&self, agent_id: &str) -> Result<Option<AgentStatus>>;

    // ─────────────────────────────────────────────────────────────────────
    // API keys
    // ─────────────────────────────────────────────────────────────────────

    /// List every key for an agent, system keys included; filtering is the
    /// service layer's concern.
    async fn list_api_keys(&self, agent_id: &str) -> Result<Vec<ApiKey>>;

    async fn create_api_key(&self, agent_id: &str, req: &CreateApiKeyRequest) -> Result<ApiKey>;

    async fn revoke_api_key(&self, agent_id: &str, key_id: &str) -> Result<()>;

    // ─────────────────────────────────────────────────────────────────────
    // Documents
    // ─────────────────────────────────────────────────────────────────────

    async fn list_documents(&self, agent_id: &str) -> Result<Vec<Document>>;

    async fn get_document(&self, agent_id: &str, document_id: &str) -> Result<Option<Document>>;

    async fn create_document(
        &self,
        agent_id: &str,
        req: &CreateDocumentRequest,
    ) -> Result<Document>;

    async fn delete_document(&self, agent_id: &str, document_id: &str) -> Result<()>;

    // ─────────────────────────────────────────────────────────────────────
    // Conversations
    // ─────────────────────────────────────────────────────────────────────

    async fn list_sessions(&self, agent_id: &str) -> Result<Vec<SessionSummary>>;

    async fn list_messages(&self, agent_id: &str, session_id: &str) -> Result<Vec<ChatMessage>>;

    // ─────────────────────────────────────────────────────────────────────
    // Usage analytics
    // ─────────────────────────────────────────────────────────────────────

    async fn get_usage_summary(&self, agent_id: &str) -> Result<Option<UsageSummary>>;

    async fn list_daily_usage(&self, agent_id: &str) -> Result<Vec<DailyUsage>>;

    // ─────────────────────────────────────────────────────────────────────
    // MCP deployment
    // ─────────────────────────────────────────────────────────────────────

    async fn get_mcp_deployment(&self, agent_id: &str) -> Result<Option<McpDeployment>>;

    /// Deployment history, newest first.
    async fn list_mcp_deployments(&self, agent_id: &str) -> Result<Vec<McpDeployment>>;

    async fn deploy_mcp(&self, agent_id: &str, req: &McpDeployRequest) -> Result<McpDeployment>;

    async fn teardown_mcp(&self, agent_id: &str) -> Result<Ack>;

    // ─────────────────────────────────────────────────────────────────────
    // Channel integrations (bridge service)
    // ─────────────────────────────────────────────────────────────────────

    /// Bot lookup; a bridge-side 404 is `None`, not an error.
    async fn get_tiledesk_bot(&self, agent_id: &str) -> Result<Option<TiledeskBot>>;

    async fn connect_tiledesk_bot(
        &self,
        agent_id: &str,
        req: &ConnectTiledeskRequest,
    ) -> Result<TiledeskBot>;

    async fn disconnect_tiledesk_bot(&self, agent_id: &str) -> Result<Ack>;

    async fn get_whatsapp_channel(&self, agent_id: &str) -> Result<Option<WhatsappChannel>>;

    async fn connect_whatsapp_channel(
        &self,
        agent_id: &str,
        req: &ConnectWhatsappRequest,
    ) -> Result<WhatsappChannel>;

    async fn disconnect_whatsapp_channel(&self, agent_id: &str) -> Result<Ack>;

    // ─────────────────────────────────────────────────────────────────────
    // Subscriptions
    // ─────────────────────────────────────────────────────────────────────
    //
    // Each returns a handle owning the background work; dropping or
    // cancelling the handle detaches it. A deleted resource is delivered as
    // `None` / an empty list rather than an error.

    fn subscribe_agent(
        &self,
        agent_id: &str,
        on_value: ValueCallback<Option<Agent>>,
        on_error: Option<ErrorCallback>,
    ) -> Subscription;

    fn subscribe_agent_status(
        &self,
        agent_id: &str,
        on_value: ValueCallback<Option<AgentStatus>>,
        on_error: Option<ErrorCallback>,
    ) -> Subscription;

    fn subscribe_documents(
        &self,
        agent_id: &str,
        on_value: ValueCallback<Vec<Document>>,
        on_error: Option<ErrorCallback>,
    ) -> Subscription;

    fn subscribe_sessions(
        &self,
        agent_id: &str,
        on_value: ValueCallback<Vec<SessionSummary>>,
        on_error: Option<ErrorCallback>,
    ) -> Subscription;

    fn subscribe_mcp_deployments(
        &self,
        agent_id: &str,
        on_value: ValueCallback<Vec<McpDeployment>>,
        on_error: Option<ErrorCallback>,
    ) -> Subscription;
}
