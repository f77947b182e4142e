//! SDK configuration and deployment-mode capabilities.
//!
//! The deployment mode is a build/startup-time constant, not a runtime
//! toggle: it decides once, when a client is constructed, which data-access
//! adapter backs every call for the rest of the process lifetime.

use config::{Config, Environment};
use serde::Deserialize;

/// Where the backing platform is deployed.
///
/// Self-hosted (container) deployments expose only the REST API, so
/// subscriptions are emulated with polling. Cloud deployments additionally
/// expose a realtime event-stream gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentMode {
    /// Container deployment: REST only, polling subscriptions.
    SelfHosted,
    /// Managed cloud deployment: realtime listener gateway available.
    Cloud,
}

impl DeploymentMode {
    /// Whether this is a self-hosted (container) deployment.
    #[must_use]
    pub fn is_self_hosted(self) -> bool {
        matches!(self, Self::SelfHosted)
    }

    /// Whether live change feeds are available, or subscriptions fall back
    /// to interval polling.
    ///
    /// Requires both a cloud deployment and the `realtime` feature; the
    /// default build always answers `false`.
    #[must_use]
    pub fn supports_realtime_subscriptions(self) -> bool {
        match self {
            Self::SelfHosted => false,
            Self::Cloud => cfg!(feature = "realtime"),
        }
    }
}

/// Configuration for an Agent Studio client.
#[derive(Debug, Clone, Deserialize)]
pub struct StudioConfig {
    /// Base URL of the agent-builder backend (agent CRUD, keys, documents,
    /// analytics, MCP deployment).
    pub api_base_url: String,
    /// Base URL of the channel-integration bridge service (Tiledesk,
    /// WhatsApp).
    pub bridge_base_url: String,
    /// Organization-level API key. Requests are still sent when absent; the
    /// transport logs a warning instead of failing.
    pub api_key: Option<String>,
    /// Deployment mode of the backing platform.
    pub deployment_mode: DeploymentMode,
    /// Default organization id for listing calls.
    pub org_id: Option<String>,
}

impl StudioConfig {
    /// Create a configuration for a self-hosted deployment, deriving the
    /// bridge URL from the API URL.
    pub fn new(api_base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let api_base_url = api_base_url.into();
        Self {
            bridge_base_url: api_base_url.clone(),
            api_base_url,
            api_key,
            deployment_mode: DeploymentMode::SelfHosted,
            org_id: None,
        }
    }

    /// Load configuration from the environment.
    ///
    /// Every setting maps to a `STUDIO_`-prefixed variable, e.g.
    /// `STUDIO_API_BASE_URL`, `STUDIO_API_KEY`, `STUDIO_DEPLOYMENT_MODE`
    /// (`self-hosted` or `cloud`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = Config::builder()
            .set_default("api_base_url", "http://localhost:8080")?
            .set_default("bridge_base_url", "http://localhost:8081")?
            .set_default("deployment_mode", "self-hosted")?
            .add_source(Environment::with_prefix("STUDIO").try_parsing(true));

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_hosted_has_no_realtime() {
        let mode = DeploymentMode::SelfHosted;
        assert!(mode.is_self_hosted());
        assert!(!mode.supports_realtime_subscriptions());
    }

    #[test]
    fn test_cloud_realtime_follows_feature_set() {
        let mode = DeploymentMode::Cloud;
        assert!(!mode.is_self_hosted());
        assert_eq!(
            mode.supports_realtime_subscriptions(),
            cfg!(feature = "realtime")
        );
    }

    #[test]
    fn test_new_defaults_to_self_hosted() {
        let config = StudioConfig::new("http://localhost:9000", None);
        assert_eq!(config.deployment_mode, DeploymentMode::SelfHosted);
        assert_eq!(config.bridge_base_url, "http://localhost:9000");
        assert!(config.api_key.is_none());
    }
}
