//! Adapter selection based on deployment mode.
//!
//! One adapter instance is constructed per call and shared by cloning the
//! returned `Arc`; consumers receive it by injection rather than reaching
//! for process-global state. The choice cannot change at runtime —
//! deployment mode is a startup constant.

use crate::access::DataAccess;
use crate::access::rest::RestDataAccess;
use crate::config::{DeploymentMode, StudioConfig};
use crate::error::Result;
use std::sync::Arc;

/// Construct the data-access adapter for the configured deployment.
///
/// Self-hosted deployments always get the REST adapter with polling
/// subscriptions. Cloud deployments get the realtime adapter when the
/// `realtime` feature is compiled in, and otherwise fall back to REST with
/// a warning.
pub fn build_data_access(config: &StudioConfig) -> Result<Arc<dyn DataAccess>> {
    match config.deployment_mode {
        DeploymentMode::SelfHosted => {
            tracing::info!("using REST data access (polling subscriptions)");
            Ok(Arc::new(RestDataAccess::from_config(config)?))
        }
        DeploymentMode::Cloud => {
            #[cfg(feature = "realtime")]
            {
                tracing::info!("using realtime data access (event-stream subscriptions)");
                Ok(Arc::new(crate::access::realtime::RealtimeDataAccess::from_config(config)?))
            }
            #[cfg(not(feature = "realtime"))]
            {
                tracing::warn!(
                    "cloud deployment requested but realtime support is not compiled in; \
                     falling back to REST polling"
                );
                Ok(Arc::new(RestDataAccess::from_config(config)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_hosted_selects_rest() {
        let config = StudioConfig::new("http://localhost:8080", None);
        let access = build_data_access(&config).unwrap();
        assert_eq!(access.adapter_name(), "rest");
    }

    #[test]
    fn test_cloud_selection_matches_feature_set() {
        let mut config = StudioConfig::new("http://localhost:8080", None);
        config.deployment_mode = DeploymentMode::Cloud;
        let access = build_data_access(&config).unwrap();
        if cfg!(feature = "realtime") {
            assert_eq!(access.adapter_name(), "realtime");
        } else {
            assert_eq!(access.adapter_name(), "rest");
        }
    }
}
