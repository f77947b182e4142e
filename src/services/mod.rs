//! Domain service modules.
//!
//! Thin, stateless wrappers that translate a dashboard-level intent
//! ("create this API key", "get this month's usage") into one or more
//! [`DataAccess`](crate::access::DataAccess) calls plus client-side shaping.
//! None of them keep state between calls; every method is plain
//! request/response.

pub mod agents;
pub mod api_keys;
pub mod channels;
pub mod conversations;
pub mod documents;
pub mod mcp;
pub mod usage;

pub use agents::AgentService;
pub use api_keys::{ApiKeyService, IssuedApiKey};
pub use channels::ChannelService;
pub use conversations::{ConversationService, RuntimeClient};
pub use documents::DocumentService;
pub use mcp::McpService;
pub use usage::UsageService;
