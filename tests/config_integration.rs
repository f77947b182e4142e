use agent_studio_sdk::{DeploymentMode, StudioConfig};
use serial_test::serial;
use std::env;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("STUDIO_API_BASE_URL");
        env::remove_var("STUDIO_BRIDGE_BASE_URL");
        env::remove_var("STUDIO_API_KEY");
        env::remove_var("STUDIO_DEPLOYMENT_MODE");
        env::remove_var("STUDIO_ORG_ID");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = StudioConfig::load().expect("defaults should load");
    assert_eq!(config.api_base_url, "http://localhost:8080");
    assert_eq!(config.bridge_base_url, "http://localhost:8081");
    assert_eq!(config.deployment_mode, DeploymentMode::SelfHosted);
    assert!(config.api_key.is_none());
    assert!(config.org_id.is_none());
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("STUDIO_API_BASE_URL", "https://api.example.test");
        env::set_var("STUDIO_API_KEY", "ak_testing");
        env::set_var("STUDIO_DEPLOYMENT_MODE", "cloud");
    }

    let config = StudioConfig::load().expect("Failed to load config");
    assert_eq!(config.api_base_url, "https://api.example.test");
    assert_eq!(config.api_key.as_deref(), Some("ak_testing"));
    assert_eq!(config.deployment_mode, DeploymentMode::Cloud);

    clear_env_vars();
}

#[test]
#[serial]
fn test_org_id_from_env() {
    clear_env_vars();
    unsafe {
        env::set_var("STUDIO_ORG_ID", "org-42");
    }

    let config = StudioConfig::load().expect("Failed to load config");
    assert_eq!(config.org_id.as_deref(), Some("org-42"));

    clear_env_vars();
}

#[test]
#[serial]
fn test_invalid_deployment_mode_rejected() {
    clear_env_vars();
    unsafe {
        env::set_var("STUDIO_DEPLOYMENT_MODE", "mainframe");
    }

    assert!(StudioConfig::load().is_err());

    clear_env_vars();
}
