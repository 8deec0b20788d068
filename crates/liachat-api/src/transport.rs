use serde_json::Value;
use std::env;

use liachat_types::SourceError;

/// Default development endpoint of the chat backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "LIA_API_URL";

/// Endpoint configuration for [`Transport`].
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl TransportConfig {
    /// Read the base URL from the environment, falling back to the local
    /// development endpoint.
    pub fn from_env() -> Self {
        Self {
            base_url: env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        }
    }
}

/// One-shot JSON exchange against a configured base endpoint.
pub struct Transport {
    base_url: String,
    client: reqwest::Client,
}

impl Transport {
    pub fn new(config: TransportConfig) -> Self {
        // Ensure base_url doesn't end with a slash
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// POST `payload` to `path` and decode the JSON reply. Every failure mode
    /// maps into [`SourceError`]; nothing else escapes.
    pub async fn send(&self, path: &str, payload: Value) -> Result<Value, SourceError> {
        let url = self.url_for(path);
        tracing::debug!(%url, "sending backend request");

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_backend() {
        let transport = Transport::new(TransportConfig::default());
        assert_eq!(transport.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let transport = Transport::new(TransportConfig {
            base_url: "http://lia.example.com/".to_string(),
        });
        assert_eq!(transport.base_url(), "http://lia.example.com");
        assert_eq!(
            transport.url_for("/api/chat"),
            "http://lia.example.com/api/chat"
        );
        assert_eq!(
            transport.url_for("api/chat"),
            "http://lia.example.com/api/chat"
        );
    }

    #[test]
    fn test_env_override() {
        env::set_var(BASE_URL_ENV, "http://staging.example.com:9000");
        let config = TransportConfig::from_env();
        env::remove_var(BASE_URL_ENV);
        assert_eq!(config.base_url, "http://staging.example.com:9000");
    }
}
