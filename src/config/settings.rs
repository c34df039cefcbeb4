//! Client Settings
//!
//! Connection settings for one API endpoint. There is deliberately no
//! built-in default base URL; every client is constructed against an
//! explicit endpoint so clients with different endpoints can coexist.

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured API key
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Configuration for a chat completion client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the API, e.g. "https://openrouter.ai/api/v1"
    pub base_url: String,

    /// API key sent as a bearer token
    #[serde(default)]
    pub api_key: String,

    /// Attribution URL sent as `HTTP-Referer` when non-empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,

    /// Attribution name sent as `X-Title` when non-empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,

    /// Overall deadline per request in seconds, including streaming reads.
    /// Unset means the transport is unbounded; callers then cancel by
    /// dropping the in-flight future.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Create a config from the two required values
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Set the attribution site URL
    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = Some(site_url.into());
        self
    }

    /// Set the attribution site name
    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = Some(site_name.into());
        self
    }

    /// Set the per-request deadline
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Replace the API key with the environment override when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                self.api_key = key;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_config() {
        let json = r#"{"base_url": "https://openrouter.ai/api/v1", "api_key": "sk-test"}"#;
        let config: ClientConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.api_key, "sk-test");
        assert!(config.site_url.is_none());
        assert!(config.site_name.is_none());
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_deserialize_full_config() {
        let json = r#"{
            "base_url": "https://openrouter.ai/api/v1",
            "api_key": "sk-test",
            "site_url": "https://example.com",
            "site_name": "Example App",
            "request_timeout_secs": 120
        }"#;
        let config: ClientConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.site_url.as_deref(), Some("https://example.com"));
        assert_eq!(config.site_name.as_deref(), Some("Example App"));
        assert_eq!(config.request_timeout_secs, Some(120));
    }
}
