//! HTTP transport layer for the Jasper SDK.

use crate::config::ClientConfig;
use crate::error::{JasperError, JasperResult};
use reqwest::{header, Client, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// HTTP methods accepted by the Jasper API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }

    /// Whether a JSON payload is attached for this method.
    pub fn carries_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

/// HTTP transport for making API requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> JasperResult<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("jasper-sdk/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Build a URL for the given endpoint.
    ///
    /// The endpoint is appended to the base URL verbatim so a versioned base
    /// such as `https://api.jasper.ai/v1` keeps its path and query strings in
    /// the endpoint survive.
    fn build_url(&self, endpoint: &str) -> JasperResult<url::Url> {
        let base = self.config.base_url.as_str().trim_end_matches('/');
        Ok(url::Url::parse(&format!("{}{}", base, endpoint))?)
    }

    /// Send one request to the Jasper API.
    ///
    /// Returns `Ok(None)` when the API answers with `204 No Content` or with a
    /// body that is not JSON. Non-success statuses are logged and returned as
    /// [`JasperError::Api`].
    pub async fn send<T, B>(
        &self,
        endpoint: &str,
        method: HttpMethod,
        payload: Option<&B>,
    ) -> JasperResult<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let api_key = self.config.api_key().ok_or(JasperError::MissingApiKey)?;
        let url = self.build_url(endpoint)?;
        debug!(url = %url, method = %method, "Jasper API request");

        let mut request = self
            .client
            .request(method.into(), url.clone())
            .header(API_KEY_HEADER, api_key);

        if let Some(body) = payload.filter(|_| method.carries_body()) {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<serde_json::Value>(&body) {
                Ok(json) => json.to_string(),
                Err(_) => status.canonical_reason().unwrap_or_default().to_string(),
            };
            error!(
                status = status.as_u16(),
                url = %url,
                method = %method,
                response = %detail,
                "Jasper API HTTP error"
            );
            return Err(JasperError::Api {
                status: status.as_u16(),
                method,
            });
        }

        if status == StatusCode::NO_CONTENT || !is_json(response.headers()) {
            debug!(url = %url, status = status.as_u16(), "Jasper API returned no JSON content");
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> JasperResult<Option<T>> {
        self.send::<T, ()>(endpoint, HttpMethod::Get, None).await
    }

    /// Execute a POST request.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> JasperResult<Option<T>> {
        self.send(endpoint, HttpMethod::Post, Some(body)).await
    }

    /// Execute a PUT request.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> JasperResult<Option<T>> {
        self.send(endpoint, HttpMethod::Put, Some(body)).await
    }

    /// Execute a PATCH request.
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> JasperResult<Option<T>> {
        self.send(endpoint, HttpMethod::Patch, Some(body)).await
    }

    /// Execute a DELETE request.
    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> JasperResult<Option<T>> {
        self.send::<T, ()>(endpoint, HttpMethod::Delete, None).await
    }
}

fn is_json(headers: &header::HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.contains("application/json"))
}
