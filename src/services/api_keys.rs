//! API key management.
//!
//! Key material is generated client-side and only its SHA-256 digest is
//! persisted: the backend stores hash and display prefix, never the secret.
//! The secret is therefore available exactly once, on the
//! [`IssuedApiKey`] returned from creation, and cannot be re-derived
//! afterwards.

use crate::access::DataAccess;
use crate::error::Result;
use crate::types::{ApiKey, CreateApiKeyRequest};
use chrono::{DateTime, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::sync::Arc;

const KEY_PREFIX: &str = "ak_";
const KEY_RANDOM_BYTES: usize = 32; // 64 hex chars
const DISPLAY_PREFIX_CHARS: usize = 8;

/// A freshly created key: the stored record plus the one-time secret.
#[derive(Debug, Clone)]
pub struct IssuedApiKey {
    /// The persisted record (hash and prefix only).
    pub record: ApiKey,
    /// The full secret. Not recoverable after this value is dropped.
    pub secret: String,
}

#[derive(Debug)]
struct GeneratedKey {
    secret: String,
    key_hash: String,
    key_prefix: String,
}

fn generate_key() -> GeneratedKey {
    let mut bytes = [0u8; KEY_RANDOM_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    let random_part = hex_encode(&bytes);

    let secret = format!("{KEY_PREFIX}{random_part}");
    let key_hash = hex_encode(&Sha256::digest(secret.as_bytes()));
    let key_prefix = format!("{KEY_PREFIX}{}", &random_part[..DISPLAY_PREFIX_CHARS]);

    GeneratedKey {
        secret,
        key_hash,
        key_prefix,
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Service for managing an agent's API keys.
#[derive(Clone)]
pub struct ApiKeyService {
    access: Arc<dyn DataAccess>,
}

impl std::fmt::Debug for ApiKeyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyService")
            .field("adapter", &self.access.adapter_name())
            .finish()
    }
}

impl ApiKeyService {
    #[must_use]
    pub fn new(access: Arc<dyn DataAccess>) -> Self {
        Self { access }
    }

    /// List an agent's keys, excluding system/test keys.
    pub async fn list(&self, agent_id: &str) -> Result<Vec<ApiKey>> {
        let keys = self.access.list_api_keys(agent_id).await?;
        Ok(keys.into_iter().filter(|key| !key.is_system).collect())
    }

    /// List every key, system/test keys included.
    pub async fn list_all(&self, agent_id: &str) -> Result<Vec<ApiKey>> {
        self.access.list_api_keys(agent_id).await
    }

    /// Create a key for dashboard use.
    pub async fn create(
        &self,
        agent_id: &str,
        name: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<IssuedApiKey> {
        self.create_key(agent_id, name, expires_at, false).await
    }

    /// Create a system/test key, hidden from default listings. Used by the
    /// live-testing widget to mint short-lived session credentials.
    pub async fn create_system(
        &self,
        agent_id: &str,
        name: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<IssuedApiKey> {
        self.create_key(agent_id, name, expires_at, true).await
    }

    async fn create_key(
        &self,
        agent_id: &str,
        name: &str,
        expires_at: Option<DateTime<Utc>>,
        is_system: bool,
    ) -> Result<IssuedApiKey> {
        let generated = generate_key();
        let req = CreateApiKeyRequest {
            name: name.to_string(),
            key_hash: generated.key_hash,
            key_prefix: generated.key_prefix,
            is_system,
            expires_at,
        };
        let record = self.access.create_api_key(agent_id, &req).await?;
        tracing::info!(agent_id, key_id = %record.id, "API key created");
        Ok(IssuedApiKey {
            record,
            secret: generated.secret,
        })
    }

    /// Revoke a key by id.
    pub async fn revoke(&self, agent_id: &str, key_id: &str) -> Result<()> {
        self.access.revoke_api_key(agent_id, key_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_key_shape() {
        let generated = generate_key();
        assert!(generated.secret.starts_with("ak_"));
        assert_eq!(generated.secret.len(), 3 + 64);
        assert!(
            generated.secret[3..]
                .bytes()
                .all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_key_hash_matches_secret_digest() {
        let generated = generate_key();
        let expected = hex_encode(&Sha256::digest(generated.secret.as_bytes()));
        assert_eq!(generated.key_hash, expected);
        assert_eq!(generated.key_hash.len(), 64);
    }

    #[test]
    fn test_display_prefix_is_start_of_secret() {
        let generated = generate_key();
        assert_eq!(generated.key_prefix.len(), 3 + 8);
        assert!(generated.secret.starts_with(&generated.key_prefix));
    }

    #[test]
    fn test_keys_are_unique() {
        let a = generate_key();
        let b = generate_key();
        assert_ne!(a.secret, b.secret);
    }
}
