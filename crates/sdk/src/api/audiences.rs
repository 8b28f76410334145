//! Audience endpoints.

use crate::api::ApiResponse;
use crate::client::JasperClient;
use crate::error::JasperResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Audiences API.
pub struct AudiencesApi<'a> {
    client: &'a JasperClient,
}

impl<'a> AudiencesApi<'a> {
    pub(crate) fn new(client: &'a JasperClient) -> Self {
        Self { client }
    }

    /// List the audiences belonging to the account.
    pub async fn list(&self) -> JasperResult<ApiResponse<Vec<Audience>>> {
        let body: Option<Value> = self.client.http.get("/audiences").await?;
        Ok(ApiResponse::from_body(body))
    }
}

/// A target audience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audience {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
