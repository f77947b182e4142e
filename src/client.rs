//! High-level client for the Agent Studio platform.

use crate::access::{DataAccess, build_data_access};
use crate::config::StudioConfig;
use crate::error::{Error, Result};
use crate::services::{
    AgentService, ApiKeyService, ChannelService, ConversationService, DocumentService, McpService,
    UsageService,
};
use std::sync::Arc;

/// Client for the Agent Studio platform.
///
/// Owns the data-access adapter selected for the configured deployment and
/// hands out the domain services that wrap it. Cheap to clone; every clone
/// (and every service) shares the same adapter instance.
///
/// # Example
///
/// ```rust,no_run
/// use agent_studio_sdk::{StudioClient, StudioConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StudioConfig::new("http://localhost:8080", Some("ak_...".into()));
/// let client = StudioClient::new(config)?;
///
/// for agent in client.agents().list("org-1").await? {
///     println!("{} ({})", agent.name, agent.id);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct StudioClient {
    config: StudioConfig,
    access: Arc<dyn DataAccess>,
}

impl std::fmt::Debug for StudioClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudioClient")
            .field("adapter", &self.access.adapter_name())
            .field("deployment_mode", &self.config.deployment_mode)
            .finish()
    }
}

impl StudioClient {
    /// Create a client, selecting the data-access adapter for the
    /// configured deployment mode.
    pub fn new(config: StudioConfig) -> Result<Self> {
        let access = build_data_access(&config)?;
        Ok(Self { config, access })
    }

    /// Create a client from `STUDIO_`-prefixed environment variables.
    pub fn from_env() -> Result<Self> {
        let config = StudioConfig::load().map_err(|err| Error::Config(err.to_string()))?;
        Self::new(config)
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// The underlying data-access adapter, for callers that want the raw
    /// operation surface.
    #[must_use]
    pub fn data_access(&self) -> Arc<dyn DataAccess> {
        Arc::clone(&self.access)
    }

    /// Whether subscriptions are live change feeds rather than polling.
    #[must_use]
    pub fn supports_realtime_subscriptions(&self) -> bool {
        self.config.deployment_mode.supports_realtime_subscriptions()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Service accessors
    // ─────────────────────────────────────────────────────────────────────

    /// Access the agents API.
    #[must_use]
    pub fn agents(&self) -> AgentService {
        AgentService::new(Arc::clone(&self.access))
    }

    /// Access the API-key API.
    #[must_use]
    pub fn api_keys(&self) -> ApiKeyService {
        ApiKeyService::new(Arc::clone(&self.access))
    }

    /// Access the document-library API.
    #[must_use]
    pub fn documents(&self) -> DocumentService {
        DocumentService::new(Arc::clone(&self.access))
    }

    /// Access the usage-analytics API.
    #[must_use]
    pub fn usage(&self) -> UsageService {
        UsageService::new(Arc::clone(&self.access))
    }

    /// Access conversation history.
    #[must_use]
    pub fn conversations(&self) -> ConversationService {
        ConversationService::new(Arc::clone(&self.access))
    }

    /// Access the MCP deployment API.
    #[must_use]
    pub fn mcp(&self) -> McpService {
        McpService::new(Arc::clone(&self.access))
    }

    /// Access channel integrations.
    #[must_use]
    pub fn channels(&self) -> ChannelService {
        ChannelService::new(Arc::clone(&self.access))
    }
}
