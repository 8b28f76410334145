//! Style guide endpoints.

use crate::api::ApiResponse;
use crate::client::JasperClient;
use crate::error::JasperResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Styles API for listing style guides and applying them to text.
pub struct StylesApi<'a> {
    client: &'a JasperClient,
}

impl<'a> StylesApi<'a> {
    pub(crate) fn new(client: &'a JasperClient) -> Self {
        Self { client }
    }

    /// List the style guides belonging to the account.
    pub async fn list(&self) -> JasperResult<ApiResponse<Vec<Style>>> {
        let body: Option<Value> = self.client.http.get("/styles").await?;
        Ok(ApiResponse::from_body(body))
    }

    /// Rewrite `content` so it follows the given style guide.
    pub async fn apply(
        &self,
        style_id: &str,
        content: &str,
    ) -> JasperResult<ApiResponse<StyledContent>> {
        let request = ApplyStyleRequest {
            content: content.to_string(),
        };
        let body: Option<Value> = self
            .client
            .http
            .post(&format!("/styles/{}/apply", style_id), &request)
            .await?;
        Ok(ApiResponse::from_body(body))
    }
}

/// A style guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub id: String,
}

/// Body of `POST /styles/{id}/apply`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyStyleRequest {
    pub content: String,
}

/// Text returned by `POST /styles/{id}/apply`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledContent {
    pub text: String,
}
