// Server configuration: optional TOML file plus command-line overrides

use jasper_sdk::{JasperClient, JasperError, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JASPER_API_KEY environment variable is not set. Please set it and try again.")]
    MissingApiKey,

    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid client configuration: {0}")]
    Client(#[from] JasperError),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Unset means the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ServerConfig {
    /// Load the configuration file if one is given and exists, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            tracing::info!(path = %path.display(), "Configuration file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replace the configured base URL when one was given on the command line.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url.filter(|url| !url.trim().is_empty()) {
            self.api.base_url = base_url;
        }
        self
    }

    /// Build the Jasper client for this configuration.
    pub fn client(&self, api_key: String) -> Result<JasperClient, ConfigError> {
        let mut builder = JasperClient::builder()
            .base_url(self.api.base_url.clone())
            .api_key(api_key);

        if let Some(secs) = self.api.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(builder.build()?)
    }
}

/// The API key must be present and non-empty before anything else is built.
pub fn require_api_key(api_key: Option<String>) -> Result<String, ConfigError> {
    api_key
        .filter(|key| !key.trim().is_empty())
        .ok_or(ConfigError::MissingApiKey)
}
