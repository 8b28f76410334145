//! Main client for the Jasper SDK.

use crate::api::*;
use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::error::JasperResult;
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for interacting with the Jasper API.
#[derive(Debug, Clone)]
pub struct JasperClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl JasperClient {
    /// Create a new client builder.
    pub fn builder() -> JasperClientBuilder {
        JasperClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> JasperResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the styles API.
    pub fn styles(&self) -> StylesApi<'_> {
        StylesApi::new(self)
    }

    /// Get the tones (brand voices) API.
    pub fn tones(&self) -> TonesApi<'_> {
        TonesApi::new(self)
    }

    /// Get the audiences API.
    pub fn audiences(&self) -> AudiencesApi<'_> {
        AudiencesApi::new(self)
    }

    /// Get the command (content generation) API.
    pub fn commands(&self) -> CommandApi<'_> {
        CommandApi::new(self)
    }

    /// Get the knowledge base API.
    pub fn knowledge(&self) -> KnowledgeApi<'_> {
        KnowledgeApi::new(self)
    }
}

/// Builder for creating a JasperClient.
pub struct JasperClientBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl JasperClientBuilder {
    /// Create a new builder pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: None,
        }
    }

    /// Set the base URL of the Jasper API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> JasperResult<JasperClient> {
        let base_url = Url::parse(&self.base_url)?;

        let config = ClientConfig {
            base_url,
            api_key: self.api_key,
            timeout: self.timeout,
        };

        JasperClient::from_config(config)
    }
}

impl Default for JasperClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
