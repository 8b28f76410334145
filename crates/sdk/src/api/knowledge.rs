//! Knowledge base search.

use crate::api::ApiResponse;
use crate::client::JasperClient;
use crate::error::JasperResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Score threshold applied when the caller does not pick one.
pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.5;

/// Knowledge API for searching the account's document store.
pub struct KnowledgeApi<'a> {
    client: &'a JasperClient,
}

impl<'a> KnowledgeApi<'a> {
    pub(crate) fn new(client: &'a JasperClient) -> Self {
        Self { client }
    }

    /// Search the knowledge base.
    pub async fn search(
        &self,
        request: &SearchKnowledgeRequest,
    ) -> JasperResult<ApiResponse<Vec<KnowledgeSearchResult>>> {
        let body: Option<Value> = self.client.http.post("/searchKnowledge", request).await?;
        Ok(ApiResponse::from_body(body))
    }
}

/// Body of `POST /searchKnowledge`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchKnowledgeRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<SearchOptions>,
}

impl SearchKnowledgeRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            options: Some(SearchOptions::default()),
        }
    }
}

/// Retrieval options. The score threshold is always sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    pub retrieval_filter_threshold_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dedup_by_doc_id: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieval_filter_threshold_max_docs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_reranker: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_ids: Option<Vec<String>>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            retrieval_filter_threshold_score: DEFAULT_SCORE_THRESHOLD,
            dedup_by_doc_id: None,
            retrieval_filter_threshold_max_docs: None,
            enable_reranker: None,
            knowledge_ids: None,
        }
    }
}

/// One document returned by a knowledge search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeSearchResult {
    pub id: String,
    pub name: String,
    pub score: f64,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_default_request_sends_only_threshold() {
        let request = SearchKnowledgeRequest::new("q3 targets");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "query": "q3 targets",
                "options": {"retrievalFilterThresholdScore": 0.5}
            })
        );
    }

    #[tokio::test]
    async fn test_search_decodes_results() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/searchKnowledge"))
            .and(body_json(json!({
                "query": "pricing",
                "options": {"retrievalFilterThresholdScore": 0.5}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"id": "k1", "name": "pricing.pdf", "score": 0.8, "tags": ["sales"]},
                    {"id": "k2", "name": "notes.md", "score": 0.6, "summary": "Q3 notes"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = JasperClient::builder()
            .base_url(server.uri())
            .api_key("sk-test")
            .build()
            .unwrap();

        let results = client
            .knowledge()
            .search(&SearchKnowledgeRequest::new("pricing"))
            .await
            .unwrap();
        match results {
            ApiResponse::Success(results) => {
                assert_eq!(results.len(), 2);
                assert_eq!(results[0].tags, Some(vec!["sales".to_string()]));
                assert_eq!(results[1].summary.as_deref(), Some("Q3 notes"));
                assert!(results[1].text.is_none());
            }
            other => panic!("Expected success, got {:?}", other),
        }
    }
}
