//! Realtime data access adapter (feature `realtime`).
//!
//! Cloud deployments expose a watch gateway that pushes one snapshot event
//! on attach and one event per subsequent change over SSE. Subscriptions
//! attach a listener there; reads and writes still go over the same REST
//! transport. Structurally symmetric with the REST adapter — only the
//! subscription mechanism differs — and never selected in self-hosted
//! builds.

use crate::access::DataAccess;
use crate::access::poll::{ErrorCallback, Subscription, ValueCallback};
use crate::access::rest::RestDataAccess;
use crate::config::StudioConfig;
use crate::error::{Error, Result};
use crate::types::*;
use async_trait::async_trait;
use eventsource_client as es;
use es::Client as _;
use serde::de::DeserializeOwned;
use tokio_stream::StreamExt;
use url::Url;
use uuid::Uuid;

/// Data access with live event-stream subscriptions.
#[derive(Debug)]
pub struct RealtimeDataAccess {
    rest: RestDataAccess,
    gateway_url: Url,
    auth_header: Option<String>,
}

impl RealtimeDataAccess {
    /// Build from configuration. The watch gateway lives under the API base
    /// URL.
    pub fn from_config(config: &StudioConfig) -> Result<Self> {
        Ok(Self {
            rest: RestDataAccess::from_config(config)?,
            gateway_url: Url::parse(&config.api_base_url)?,
            auth_header: config.api_key.as_ref().map(|key| format!("ApiKey {key}")),
        })
    }

    /// Attach an SSE listener on a watch path.
    ///
    /// The task owns the connection; cancelling the returned handle drops
    /// the stream and detaches with no residual work.
    fn listen<T>(
        &self,
        path: &str,
        on_value: ValueCallback<T>,
        on_error: Option<ErrorCallback>,
    ) -> Subscription
    where
        T: DeserializeOwned + Send + 'static,
    {
        let id = Uuid::new_v4();
        let url = self
            .gateway_url
            .join(path)
            .unwrap_or_else(|_| self.gateway_url.clone());
        let auth_header = self.auth_header.clone();
        tracing::debug!(subscription = %id, url = %url, "attaching watch listener");

        let handle = tokio::spawn(async move {
            let builder = match es::ClientBuilder::for_url(url.as_str()) {
                Ok(builder) => builder,
                Err(err) => {
                    tracing::error!(subscription = %id, error = %err, "invalid watch URL");
                    if let Some(callback) = &on_error {
                        callback(Error::Stream(err.to_string()));
                    }
                    return;
                }
            };
            let builder = match auth_header {
                Some(value) => match builder.header("Authorization", &value) {
                    Ok(builder) => builder,
                    Err(err) => {
                        tracing::error!(subscription = %id, error = %err, "invalid auth header");
                        if let Some(callback) = &on_error {
                            callback(Error::Stream(err.to_string()));
                        }
                        return;
                    }
                },
                None => builder,
            };

            let client = builder.build();
            let mut stream = client.stream();
            while let Some(event) = stream.next().await {
                match event {
                    Ok(es::SSE::Event(event)) => match serde_json::from_str::<T>(&event.data) {
                        Ok(value) => on_value(value),
                        Err(err) => {
                            tracing::error!(
                                subscription = %id,
                                error = %err,
                                "undecodable watch event"
                            );
                            if let Some(callback) = &on_error {
                                callback(Error::Json(err));
                            }
                        }
                    },
                    Ok(_) => {}
                    Err(err) => {
                        tracing::error!(subscription = %id, error = %err, "watch stream error");
                        if let Some(callback) = &on_error {
                            callback(Error::Stream(err.to_string()));
                        }
                    }
                }
            }
            tracing::debug!(subscription = %id, "watch stream ended");
        });

        Subscription::new(id, handle)
    }
}

#[async_trait]
impl DataAccess for RealtimeDataAccess {
    fn adapter_name(&self) -> &'static str {
        "realtime"
    }

    async fn get_organization(&self, org_id: &str) -> Result<Option<Organization>> {
        self.rest.get_organization(org_id).await
    }

    async fn list_agents(&self, org_id: &str) -> Result<Vec<Agent>> {
        self.rest.list_agents(org_id).await
    }

    async fn get_agent(&self, agent_id: &str) -> Result<Option<Agent>> {
        self.rest.get_agent(agent_id).await
    }

    async fn create_agent(&self, req: &CreateAgentRequest) -> Result<Agent> {
        self.rest.create_agent(req).await
    }

    async fn update_agent(&self, agent_id: &str, req: &UpdateAgentRequest) -> Result<Agent> {
        self.rest.update_agent(agent_id, req).await
    }

    async fn delete_agent(&self, agent_id: &str) -> Result<()> {
        self.rest.delete_agent(agent_id).await
    }

    async fn get_agent_status(&self, agent_id: &str) -> Result<Option<AgentStatus>> {
        self.rest.get_agent_status(agent_id).await
    }

    async fn list_api_keys(&self, agent_id: &str) -> Result<Vec<ApiKey>> {
        self.rest.list_api_keys(agent_id).await
    }

    async fn create_api_key(&self, agent_id: &str, req: &CreateApiKeyRequest) -> Result<ApiKey> {
        self.rest.create_api_key(agent_id, req).await
    }

    async fn revoke_api_key(&self, agent_id: &str, key_id: &str) -> Result<()> {
        self.rest.revoke_api_key(agent_id, key_id).await
    }

    async fn list_documents(&self, agent_id: &str) -> Result<Vec<Document>> {
        self.rest.list_documents(agent_id).await
    }

    async fn get_document(&self, agent_id: &str, document_id: &str) -> Result<Option<Document>> {
        self.rest.get_document(agent_id, document_id).await
    }

    async fn create_document(
        &self,
        agent_id: &str,
        req: &CreateDocumentRequest,
    ) -> Result<Document> {
        self.rest.create_document(agent_id, req).await
    }

    async fn delete_document(&self, agent_id: &str, document_id: &str) -> Result<()> {
        self.rest.delete_document(agent_id, document_id).await
    }

    async fn list_sessions(&self, agent_id: &str) -> Result<Vec<SessionSummary>> {
        self.rest.list_sessions(agent_id).await
    }

    async fn list_messages(&self, agent_id: &str, session_id: &str) -> Result<Vec<ChatMessage>> {
        self.rest.list_messages(agent_id, session_id).await
    }

    async fn get_usage_summary(&self, agent_id: &str) -> Result<Option<UsageSummary>> {
        self.rest.get_usage_summary(agent_id).await
    }

    async fn list_daily_usage(&self, agent_id: &str) -> Result<Vec<DailyUsage>> {
        self.rest.list_daily_usage(agent_id).await
    }

    async fn get_mcp_deployment(&self, agent_id: &str) -> Result<Option<McpDeployment>> {
        self.rest.get_mcp_deployment(agent_id).await
    }

    async fn list_mcp_deployments(&self, agent_id: &str) -> Result<Vec<McpDeployment>> {
        self.rest.list_mcp_deployments(agent_id).await
    }

    async fn deploy_mcp(&self, agent_id: &str, req: &McpDeployRequest) -> Result<McpDeployment> {
        self.rest.deploy_mcp(agent_id, req).await
    }

    async fn teardown_mcp(&self, agent_id: &str) -> Result<Ack> {
        self.rest.teardown_mcp(agent_id).await
    }

    async fn get_tiledesk_bot(&self, agent_id: &str) -> Result<Option<TiledeskBot>> {
        self.rest.get_tiledesk_bot(agent_id).await
    }

    async fn connect_tiledesk_bot(
        &self,
        agent_id: &str,
        req: &ConnectTiledeskRequest,
    ) -> Result<TiledeskBot> {
        self.rest.connect_tiledesk_bot(agent_id, req).await
    }

    async fn disconnect_tiledesk_bot(&self, agent_id: &str) -> Result<Ack> {
        self.rest.disconnect_tiledesk_bot(agent_id).await
    }

    async fn get_whatsapp_channel(&self, agent_id: &str) -> Result<Option<WhatsappChannel>> {
        self.rest.get_whatsapp_channel(agent_id).await
    }

    async fn connect_whatsapp_channel(
        &self,
        agent_id: &str,
        req: &ConnectWhatsappRequest,
    ) -> Result<WhatsappChannel> {
        self.rest.connect_whatsapp_channel(agent_id, req).await
    }

    async fn disconnect_whatsapp_channel(&self, agent_id: &str) -> Result<Ack> {
        self.rest.disconnect_whatsapp_channel(agent_id).await
    }

    fn subscribe_agent(
        &self,
        agent_id: &str,
        on_value: ValueCallback<Option<Agent>>,
        on_error: Option<ErrorCallback>,
    ) -> Subscription {
        self.listen(&format!("/api/watch/agents/{agent_id}"), on_value, on_error)
    }

    fn subscribe_agent_status(
        &self,
        agent_id: &str,
        on_value: ValueCallback<Option<AgentStatus>>,
        on_error: Option<ErrorCallback>,
    ) -> Subscription {
        self.listen(
            &format!("/api/watch/agents/{agent_id}/status"),
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
        self.listen(
            &format!("/api/watch/agents/{agent_id}/documents"),
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
        self.listen(
            &format!("/api/watch/agents/{agent_id}/sessions"),
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
        self.listen(
            &format!("/api/watch/agents/{agent_id}/mcp/deployments"),
            on_value,
            on_error,
        )
    }
}
