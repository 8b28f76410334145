//! Configuration types for the Jasper SDK.

use std::time::Duration;
use url::Url;

/// Production endpoint of the Jasper API, including the version prefix.
pub const DEFAULT_BASE_URL: &str = "https://api.jasper.ai/v1";

/// Configuration for the Jasper client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL that endpoint paths are appended to.
    pub base_url: Url,
    /// API key sent in the `X-API-Key` header.
    pub api_key: Option<String>,
    /// Request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_key: None,
            timeout: None,
        }
    }

    /// The configured API key, treating an empty string as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_new() {
        let url = Url::parse("https://example.com").unwrap();
        let config = ClientConfig::new(url.clone());

        assert_eq!(config.base_url, url);
        assert!(config.api_key.is_none());
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_empty_api_key_is_absent() {
        let mut config = ClientConfig::new(Url::parse(DEFAULT_BASE_URL).unwrap());
        config.api_key = Some(String::new());
        assert_eq!(config.api_key(), None);

        config.api_key = Some("sk-test".to_string());
        assert_eq!(config.api_key(), Some("sk-test"));
    }
}
