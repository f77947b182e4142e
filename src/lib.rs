//! Rust SDK for Agent Studio.
//!
//! Typed data access for the agent-builder platform: agents, API keys,
//! document libraries, conversations, usage analytics, MCP deployment, and
//! channel integrations, over a uniform interface that works against both
//! platform transports.
//!
//! # Architecture
//!
//! - **Transport**: a credential-injecting HTTP client per backend service
//! - **Data access**: one operation surface ([`DataAccess`]), two adapters —
//!   REST with polling-emulated subscriptions (the default), and a realtime
//!   event-stream adapter for cloud deployments (feature `realtime`)
//! - **Services**: thin stateless domain wrappers consumed by dashboards
//!
//! # Example
//!
//! ```rust,no_run
//! use agent_studio_sdk::{StudioClient, StudioConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StudioClient::new(StudioConfig::new(
//!         "http://localhost:8080",
//!         Some("ak_...".into()),
//!     ))?;
//!
//!     // One-shot reads
//!     let agents = client.agents().list("org-1").await?;
//!     println!("{} agents", agents.len());
//!
//!     // Subscriptions (polling in self-hosted deployments)
//!     let sub = client.agents().watch_status(
//!         "agent-1",
//!         Box::new(|status| println!("status: {status:?}")),
//!         None,
//!     );
//!     // ... later
//!     sub.cancel();
//!
//!     Ok(())
//! }
//! ```

pub mod access;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod services;
pub mod transport;
pub mod types;

// Re-exports
pub use access::{DataAccess, ErrorCallback, Subscription, ValueCallback, build_data_access};
pub use client::StudioClient;
pub use config::{DeploymentMode, StudioConfig};
pub use error::{Error, Result};
pub use transport::{Credential, Transport};
pub use types::*;
