//! Conversation history and the live-testing runtime client.
//!
//! Two distinct backends are involved: conversation *history* comes from
//! the agent-builder backend through the data-access layer, while the
//! live-testing chat widget talks directly to the deployed agent's own
//! runtime endpoint with a session-level bearer credential.

use crate::access::{DataAccess, ErrorCallback, Subscription, ValueCallback};
use crate::error::Result;
use crate::transport::{Credential, Transport};
use crate::types::{Ack, ChatMessage, SessionSummary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Budget for the runtime health probe; the only explicit timeout in the
/// data-access layer.
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Service for browsing an agent's conversation history.
#[derive(Clone)]
pub struct ConversationService {
    access: Arc<dyn DataAccess>,
}

impl std::fmt::Debug for ConversationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationService")
            .field("adapter", &self.access.adapter_name())
            .finish()
    }
}

impl ConversationService {
    #[must_use]
    pub fn new(access: Arc<dyn DataAccess>) -> Self {
        Self { access }
    }

    /// List an agent's conversation sessions.
    pub async fn sessions(&self, agent_id: &str) -> Result<Vec<SessionSummary>> {
        self.access.list_sessions(agent_id).await
    }

    /// List the messages of one session.
    pub async fn messages(&self, agent_id: &str, session_id: &str) -> Result<Vec<ChatMessage>> {
        self.access.list_messages(agent_id, session_id).await
    }

    /// Watch the session list for new conversations.
    pub fn watch_sessions(
        &self,
        agent_id: &str,
        on_value: ValueCallback<Vec<SessionSummary>>,
        on_error: Option<ErrorCallback>,
    ) -> Subscription {
        self.access.subscribe_sessions(agent_id, on_value, on_error)
    }

    /// Delete a session.
    ///
    /// Disabled in embed mode — the backend exposes no deletion endpoint
    /// there — so this always resolves to `None` without issuing a request.
    pub async fn delete_session(
        &self,
        _agent_id: &str,
        _session_id: &str,
    ) -> Result<Option<Ack>> {
        Ok(None)
    }

    /// Export a session transcript.
    ///
    /// Disabled in embed mode; always resolves to an empty transcript
    /// without issuing a request.
    pub async fn export_transcript(
        &self,
        _agent_id: &str,
        _session_id: &str,
    ) -> Result<Vec<ChatMessage>> {
        Ok(Vec::new())
    }
}

// =============================================================================
// Runtime client
// =============================================================================

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatedSession {
    #[serde(alias = "session_id")]
    id: String,
}

#[derive(Debug, Default, Deserialize)]
struct RuntimeMessages {
    #[serde(default, alias = "messages")]
    data: Vec<ChatMessage>,
}

/// Client for a deployed agent's own runtime endpoint, used by the
/// live-testing chat widget.
#[derive(Debug, Clone)]
pub struct RuntimeClient {
    transport: Transport,
}

impl RuntimeClient {
    /// Connect to a deployed runtime with a session-level key.
    pub fn connect(endpoint_url: impl AsRef<str>, session_key: impl Into<String>) -> Result<Self> {
        let transport = Transport::new(
            endpoint_url,
            Some(Credential::Bearer(session_key.into())),
        )?;
        Ok(Self { transport })
    }

    /// Open a new chat session, returning its id.
    pub async fn create_session(&self) -> Result<String> {
        let created: CreatedSession = self
            .transport
            .post("/sessions", &serde_json::json!({}))
            .await?;
        Ok(created.id)
    }

    /// Post a user message; the response is the agent's reply.
    pub async fn send_message(&self, session_id: &str, content: &str) -> Result<ChatMessage> {
        self.transport
            .post(
                &format!("/sessions/{session_id}/messages"),
                &SendMessageRequest { content },
            )
            .await
    }

    /// Messages of one runtime session.
    pub async fn messages(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
        let payload: RuntimeMessages = self
            .transport
            .get(&format!("/sessions/{session_id}/messages"))
            .await?;
        Ok(payload.data)
    }

    /// Probe the runtime's health endpoint, bounded to five seconds.
    pub async fn health_check(&self) -> Result<()> {
        self.transport.probe("/health", HEALTH_CHECK_TIMEOUT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_session_accepts_both_id_keys() {
        let bare: CreatedSession = serde_json::from_str(r#"{"id": "s-1"}"#).unwrap();
        assert_eq!(bare.id, "s-1");
        let legacy: CreatedSession = serde_json::from_str(r#"{"session_id": "s-2"}"#).unwrap();
        assert_eq!(legacy.id, "s-2");
    }

    #[test]
    fn test_runtime_messages_default_empty() {
        let payload: RuntimeMessages = serde_json::from_str("{}").unwrap();
        assert!(payload.data.is_empty());
    }
}
