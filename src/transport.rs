//! HTTP transport with credential injection and centralized error logging.
//!
//! Every outgoing request carries the configured credential in the
//! `Authorization` header. Failures are logged once here, at the adapter
//! boundary, before being surfaced to the caller; there are no retries, no
//! circuit breaking, and no timeout policy beyond library defaults (the lone
//! exception is [`Transport::probe`], used for runtime health checks).

use crate::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const MAX_LOG_BODY_CHARS: usize = 512;

/// Credential attached to outgoing requests.
///
/// Organization-level services expect `Authorization: ApiKey <key>`; a
/// deployed agent's own runtime expects `Authorization: Bearer <key>`.
#[derive(Debug, Clone)]
pub enum Credential {
    /// Organization/agent-builder API key.
    ApiKey(String),
    /// Session-level bearer token for a deployed agent runtime.
    Bearer(String),
}

impl Credential {
    fn header_value(&self) -> String {
        match self {
            Self::ApiKey(key) => format!("ApiKey {key}"),
            Self::Bearer(key) => format!("Bearer {key}"),
        }
    }
}

/// Configured HTTP client for one backend service.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: Url,
    credential: Option<Credential>,
}

impl Transport {
    /// Create a transport for the given base URL.
    ///
    /// A missing credential is not fatal: requests are still sent
    /// unauthenticated and a warning is logged once here.
    pub fn new(base_url: impl AsRef<str>, credential: Option<Credential>) -> Result<Self> {
        Self::with_client(base_url, credential, reqwest::Client::new())
    }

    /// Create a transport with a custom reqwest client.
    pub fn with_client(
        base_url: impl AsRef<str>,
        credential: Option<Credential>,
        http: reqwest::Client,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        if credential.is_none() {
            tracing::warn!(
                base_url = %base_url,
                "no API credential configured; requests will be sent unauthenticated"
            );
        }
        Ok(Self {
            http,
            base_url,
            credential,
        })
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Url {
        self.base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone())
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credential {
            Some(credential) => request.header("Authorization", credential.header_value()),
            None => request,
        }
    }

    /// GET a resource.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.authorize(self.http.get(self.url(path))).send().await?;
        Self::handle_response(response).await
    }

    /// GET a resource with query parameters.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .authorize(self.http.get(self.url(path)).query(query))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// GET a single resource, mapping 404 to `None`.
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let response = self.authorize(self.http.get(self.url(path))).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::handle_response(response).await.map(Some)
    }

    /// POST a JSON body.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .authorize(self.http.post(self.url(path)).json(body))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// PUT a JSON body.
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .authorize(self.http.put(self.url(path)).json(body))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// PATCH a JSON body.
    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .authorize(self.http.patch(self.url(path)).json(body))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// DELETE a resource, ignoring the response body.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let response = self
            .authorize(self.http.delete(self.url(path)))
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            Self::log_failure(status, &message);
            Err(Error::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// DELETE a resource and parse the acknowledgement body.
    pub async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .authorize(self.http.delete(self.url(path)))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Probe an endpoint with an explicit timeout.
    ///
    /// Used by the runtime health check; the 5-second budget there is the
    /// only explicit timeout anywhere in the data-access layer.
    pub async fn probe(&self, path: &str, timeout: Duration) -> Result<()> {
        let response = self
            .authorize(self.http.get(self.url(path)).timeout(timeout))
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            Self::log_failure(status, &message);
            Err(Error::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            Self::log_failure(status, &message);
            Err(Error::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    fn log_failure(status: reqwest::StatusCode, body: &str) {
        let mut preview = body.chars().take(MAX_LOG_BODY_CHARS).collect::<String>();
        if body.chars().count() > MAX_LOG_BODY_CHARS {
            preview.push_str("...");
        }
        tracing::error!(status = %status, body = %preview, "API request failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_header_values() {
        let org = Credential::ApiKey("ak_abc123".to_string());
        assert_eq!(org.header_value(), "ApiKey ak_abc123");

        let session = Credential::Bearer("ak_abc123".to_string());
        assert_eq!(session.header_value(), "Bearer ak_abc123");
    }

    #[test]
    fn test_url_join() {
        let transport = Transport::new("http://localhost:8080", None).unwrap();
        assert_eq!(
            transport.url("/api/agents/a-1").as_str(),
            "http://localhost:8080/api/agents/a-1"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(Transport::new("not a url", None).is_err());
    }
}
