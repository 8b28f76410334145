//! Brand voice (tone) endpoints.

use crate::api::ApiResponse;
use crate::client::JasperClient;
use crate::error::JasperResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tones API for listing brand voices.
pub struct TonesApi<'a> {
    client: &'a JasperClient,
}

impl<'a> TonesApi<'a> {
    pub(crate) fn new(client: &'a JasperClient) -> Self {
        Self { client }
    }

    /// List brand voices, optionally asking for a specific page size.
    pub async fn list(&self, size: Option<u32>) -> JasperResult<ApiResponse<Vec<Tone>>> {
        let endpoint = match size {
            Some(size) => format!("/tones?size={}", size),
            None => "/tones".to_string(),
        };
        let body: Option<Value> = self.client.http.get(&endpoint).await?;
        Ok(ApiResponse::from_body(body))
    }
}

/// A brand voice. `value` holds the descriptive text of the voice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub value: String,
}
