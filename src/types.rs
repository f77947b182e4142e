//! Shared wire types for the SDK.
//!
//! These types mirror the backend's API DTOs. Payloads are otherwise passed
//! through verbatim; the only shaping done here is light field renaming
//! (e.g. the legacy `project_id` key normalizes to `id`) and lenient
//! timestamp coercion, so shape drift surfaces as a decode error instead of
//! silently propagating.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Organizations and agents
// =============================================================================

/// An organization (tenant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Subscription plan, if the backend reports one.
    #[serde(default)]
    pub plan: Option<String>,
    #[serde(default, deserialize_with = "timestamp::lenient_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A configured agent.
///
/// Older backend routes still emit the agent id under `project_id`; both
/// spellings decode into `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier.
    #[serde(alias = "project_id")]
    pub id: String,
    /// Owning organization.
    #[serde(default)]
    pub org_id: Option<String>,
    /// Display name.
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Model identifier the agent is configured with.
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Lifecycle state as reported by the backend (e.g. "draft",
    /// "deployed").
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "timestamp::lenient_opt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::lenient_opt")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Live status of a deployed agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentStatus {
    /// Runtime state (e.g. "running", "stopped", "deploying").
    pub state: String,
    /// Public endpoint of the deployed runtime.
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default)]
    pub healthy: Option<bool>,
    #[serde(default, deserialize_with = "timestamp::lenient_opt")]
    pub last_deployed_at: Option<DateTime<Utc>>,
}

/// Request to create an agent.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAgentRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

/// Partial update for an agent. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateAgentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

// =============================================================================
// API keys
// =============================================================================

/// A stored API key record. The full secret is never part of this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKey {
    /// Unique identifier.
    pub id: String,
    #[serde(default)]
    pub agent_id: Option<String>,
    /// Display name chosen at creation.
    pub name: String,
    /// Display prefix of the secret (`ak_` plus the first characters).
    #[serde(default)]
    pub key_prefix: Option<String>,
    /// Key state (e.g. "active", "revoked").
    #[serde(default)]
    pub status: Option<String>,
    /// System/test keys, excluded from default listings.
    #[serde(default)]
    pub is_system: bool,
    #[serde(default, deserialize_with = "timestamp::lenient_opt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::lenient_opt")]
    pub last_used_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::lenient_opt")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Request to persist a new API key.
///
/// Only the hash and display prefix travel to the backend; the secret stays
/// with the caller.
#[derive(Debug, Clone, Serialize)]
pub struct CreateApiKeyRequest {
    pub name: String,
    /// SHA-256 hex digest of the full key.
    pub key_hash: String,
    pub key_prefix: String,
    pub is_system: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Documents
// =============================================================================

/// A document in an agent's library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier.
    pub id: String,
    #[serde(default)]
    pub agent_id: Option<String>,
    /// Original filename.
    pub filename: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size_bytes: Option<u64>,
    /// Processing status (e.g. "pending", "indexed", "failed").
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub chunk_count: Option<usize>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default, deserialize_with = "timestamp::lenient_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request to add a document to an agent's library.
#[derive(Debug, Clone, Serialize)]
pub struct CreateDocumentRequest {
    pub filename: String,
    /// Raw text content.
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

// =============================================================================
// Conversations
// =============================================================================

/// Summary of one conversation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Unique identifier.
    #[serde(alias = "session_id")]
    pub id: String,
    #[serde(default)]
    pub agent_id: Option<String>,
    /// Originating channel ("web", "whatsapp", ...).
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub message_count: Option<usize>,
    #[serde(default, deserialize_with = "timestamp::lenient_opt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::lenient_opt")]
    pub last_activity_at: Option<DateTime<Utc>>,
}

/// A message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub id: Option<String>,
    /// The role of the message sender.
    pub role: String,
    /// The message content.
    pub content: String,
    #[serde(default, deserialize_with = "timestamp::lenient_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Usage analytics
// =============================================================================

/// Pre-aggregated usage totals for an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageSummary {
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub total_requests: Option<u64>,
    /// Period label the backend aggregated over, if any.
    #[serde(default)]
    pub period: Option<String>,
}

/// One day of usage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyUsage {
    /// Calendar day (UTC).
    pub date: NaiveDate,
    #[serde(default)]
    pub total_tokens: u64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub requests: Option<u64>,
}

/// Client-side monthly aggregate over [`DailyUsage`] records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyUsage {
    pub year: i32,
    pub month: u32,
    pub total_tokens: u64,
    pub total_cost: f64,
}

// =============================================================================
// MCP deployment
// =============================================================================

/// An MCP server deployment for an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpDeployment {
    /// Unique identifier.
    pub id: String,
    #[serde(default)]
    pub agent_id: Option<String>,
    /// Deployment state (e.g. "deploying", "active", "failed").
    pub status: String,
    #[serde(default)]
    pub endpoint_url: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "timestamp::lenient_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request to deploy an agent as an MCP server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct McpDeployRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,
    /// Tool names to expose; `None` exposes the agent's full set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
    /// Opaque deployment configuration, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

// =============================================================================
// Channel integrations
// =============================================================================

/// A Tiledesk bot connected to an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TiledeskBot {
    /// Bot identifier on the Tiledesk side.
    pub id: String,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub webhook_url: Option<String>,
}

/// Request to connect an agent to a Tiledesk project.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectTiledeskRequest {
    pub tiledesk_project_id: String,
    pub api_token: String,
}

/// A WhatsApp channel bound to an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatsappChannel {
    /// Channel identifier.
    pub id: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub verified: Option<bool>,
}

/// Request to connect an agent to a WhatsApp phone number.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectWhatsappRequest {
    pub phone_number_id: String,
    pub access_token: String,
}

/// Generic acknowledgement returned by write endpoints without a resource
/// body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Timestamp coercion
// =============================================================================

pub(crate) mod timestamp {
    //! Lenient timestamp decoding.
    //!
    //! The two backend services disagree on timestamp encoding: RFC 3339
    //! strings, epoch seconds, or epoch milliseconds. Everything funnels
    //! through here and unparseable values decode as `None`.

    use chrono::{DateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer};

    // Epoch-second values above this are treated as milliseconds.
    const MILLIS_CUTOVER: i64 = 10_000_000_000;

    pub(crate) fn lenient_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw.and_then(coerce))
    }

    pub(crate) fn coerce(value: serde_json::Value) -> Option<DateTime<Utc>> {
        match value {
            serde_json::Value::String(s) => DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            serde_json::Value::Number(n) => {
                let raw = n.as_i64()?;
                if raw >= MILLIS_CUTOVER {
                    Utc.timestamp_millis_opt(raw).single()
                } else {
                    Utc.timestamp_opt(raw, 0).single()
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_agent_id_normalized_from_project_id() {
        let agent: Agent =
            serde_json::from_str(r#"{"project_id": "a-1", "name": "Support bot"}"#).unwrap();
        assert_eq!(agent.id, "a-1");
        assert!(agent.status.is_none());
    }

    #[test]
    fn test_timestamp_coercion_rfc3339() {
        let agent: Agent = serde_json::from_str(
            r#"{"id": "a-1", "name": "x", "created_at": "2026-03-01T12:00:00Z"}"#,
        )
        .unwrap();
        let created = agent.created_at.unwrap();
        assert_eq!(created.year(), 2026);
        assert_eq!(created.month(), 3);
    }

    #[test]
    fn test_timestamp_coercion_epoch_seconds_and_millis() {
        let secs = timestamp::coerce(serde_json::json!(1_700_000_000)).unwrap();
        let millis = timestamp::coerce(serde_json::json!(1_700_000_000_000i64)).unwrap();
        assert_eq!(secs, millis);
    }

    #[test]
    fn test_timestamp_coercion_garbage_is_none() {
        assert!(timestamp::coerce(serde_json::json!("yesterday")).is_none());
        assert!(timestamp::coerce(serde_json::json!(true)).is_none());
    }

    #[test]
    fn test_api_key_is_system_defaults_false() {
        let key: ApiKey =
            serde_json::from_str(r#"{"id": "k-1", "name": "prod"}"#).unwrap();
        assert!(!key.is_system);
    }

    #[test]
    fn test_daily_usage_date_parses() {
        let day: DailyUsage =
            serde_json::from_str(r#"{"date": "2026-08-01", "total_tokens": 10}"#).unwrap();
        assert_eq!(day.date.month(), 8);
        assert_eq!(day.total_cost, 0.0);
    }
}
