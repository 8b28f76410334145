// Knowledge base search

use crate::error::{expect_payload, unexpected_shape, CapabilityResult, Payload};
use crate::protocol::{CallToolResult, ToolContent, ToolSchema};
use crate::tools::{
    into_call_result, json_schema_array, json_schema_boolean, json_schema_integer,
    json_schema_number, json_schema_object, json_schema_string, parse_arguments, Tool,
};
use anyhow::Result;
use jasper_sdk::api::DEFAULT_SCORE_THRESHOLD;
use jasper_sdk::{JasperClient, KnowledgeSearchResult, SearchKnowledgeRequest, SearchOptions};
use serde::{Deserialize, Deserializer};

const NAME: &str = "search-knowledge-base";

const DESCRIPTION: &str = "The Jasper Knowledge Base holds info on your company's clients, internal business (strategy docs, updates, etc.), and marketing content.

Use Jasper AI's /searchKnowledge endpoint to find relevant documents using short, Google-style keyword queries or phrases. This tool surfaces related documents—it does not answer questions directly.

Output modes:
- **knowledgeIds only**: For passing source docs to another tool (e.g., content generation). Example: \"take the AGM meeting notes and turn it into an investor update\"—request only knowledgeIds for generate-content.
- **Summaries**: For topic overviews. Example: \"what do we know about customer X?\"—request document summaries.
- **Full Text**: For specific details/answers. Example: \"did we meet our targets last quarter?\"—request full text of relevant docs.

Choose output (knowledgeIds, summaries, text, or any combination) to match your query. Queries should be general and discovery-oriented, not direct Q&A.";

const DEFAULT_MAX_DOCS: u32 = 10;

/// Tool that searches the Jasper knowledge base
pub struct SearchKnowledgeBaseTool {
    client: JasperClient,
}

impl SearchKnowledgeBaseTool {
    pub fn new(client: JasperClient) -> Self {
        Self { client }
    }

    async fn run(&self, args: SearchKnowledgeArgs) -> CapabilityResult<Vec<ToolContent>> {
        let presentation = args.presentation();
        let request = args.into_request();
        let response = self.client.knowledge().search(&request).await;

        Ok(match expect_payload(NAME, response)? {
            Payload::Data(results) => format_results(results, &presentation),
            Payload::Raw(raw) => vec![ToolContent::text(unexpected_shape(NAME, &raw))],
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchKnowledgeArgs {
    query: String,
    #[serde(default)]
    dedup_by_doc_id: bool,
    #[serde(default = "default_max_docs", deserialize_with = "whole_number")]
    retrieval_filter_threshold_max_docs: u32,
    #[serde(default = "default_score_threshold")]
    retrieval_filter_threshold_score: f64,
    #[serde(default)]
    enable_reranker: bool,
    #[serde(default)]
    knowledge_ids: Option<Vec<String>>,
    #[serde(default = "default_true")]
    include_text: bool,
    #[serde(default = "default_true")]
    include_summary: bool,
    #[serde(default = "default_true")]
    include_tags: bool,
}

fn default_max_docs() -> u32 {
    DEFAULT_MAX_DOCS
}

/// Accepts any JSON number with no fractional part, so `10` and `10.0` agree.
fn whole_number<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
        Ok(value as u32)
    } else {
        Err(serde::de::Error::custom(format!(
            "expected a non-negative whole number, got {}",
            value
        )))
    }
}

fn default_score_threshold() -> f64 {
    DEFAULT_SCORE_THRESHOLD
}

fn default_true() -> bool {
    true
}

impl SearchKnowledgeArgs {
    fn presentation(&self) -> Presentation {
        Presentation {
            text: self.include_text,
            summary: self.include_summary,
            tags: self.include_tags,
        }
    }

    /// The presentation toggles stay on this side; everything else is sent.
    fn into_request(self) -> SearchKnowledgeRequest {
        SearchKnowledgeRequest {
            query: self.query,
            options: Some(SearchOptions {
                retrieval_filter_threshold_score: self.retrieval_filter_threshold_score,
                dedup_by_doc_id: Some(self.dedup_by_doc_id),
                retrieval_filter_threshold_max_docs: Some(self.retrieval_filter_threshold_max_docs),
                enable_reranker: Some(self.enable_reranker),
                knowledge_ids: self.knowledge_ids,
            }),
        }
    }
}

/// Which optional fields of a result are rendered.
#[derive(Debug, Clone, Copy)]
struct Presentation {
    text: bool,
    summary: bool,
    tags: bool,
}

/// One text block per result, highest score first.
fn format_results(
    mut results: Vec<KnowledgeSearchResult>,
    presentation: &Presentation,
) -> Vec<ToolContent> {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results
        .iter()
        .map(|item| ToolContent::text(format_result(item, presentation)))
        .collect()
}

fn format_result(item: &KnowledgeSearchResult, presentation: &Presentation) -> String {
    let mut parts = vec![
        format!("Filename: {}", item.name),
        format!("knowledgeId: {}", item.id),
    ];

    if let Some(tags) = item.tags.as_ref().filter(|_| presentation.tags) {
        parts.push(format!("Tags: {}", tags.join(", ")));
    }
    parts.push(format!("Score: {}", item.score));
    if let Some(summary) = non_empty(&item.summary).filter(|_| presentation.summary) {
        parts.push(format!("Summary: {}", summary));
    }
    if let Some(text) = non_empty(&item.text).filter(|_| presentation.text) {
        parts.push(format!("Text: {}", text));
    }

    parts.join("\n\n")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[async_trait::async_trait]
impl Tool for SearchKnowledgeBaseTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: DESCRIPTION.to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "query": json_schema_string("The search query string."),
                    "dedupByDocId": json_schema_boolean("Deduplicate by document ID. (default: false)"),
                    "retrievalFilterThresholdMaxDocs": json_schema_integer("Max docs for retrieval filter threshold. (default: 10)"),
                    "retrievalFilterThresholdScore": json_schema_number("Score threshold for retrieval filter. (default: 0.5)"),
                    "enableReranker": json_schema_boolean("Enable reranker for search results. (default: false)"),
                    "knowledgeIds": json_schema_array(
                        serde_json::json!({"type": "string"}),
                        "Restrict search to these knowledge IDs."
                    ),
                    "includeText": json_schema_boolean("Include the text of each file in the result. (default: true)"),
                    "includeSummary": json_schema_boolean("Include the summary of each file in the result. (default: true)"),
                    "includeTags": json_schema_boolean("Include the tags of each file in the result. (default: true)")
                }),
                vec!["query"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SearchKnowledgeArgs = parse_arguments(NAME, arguments)?;
        Ok(into_call_result(NAME, self.run(args).await))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool(server: &MockServer) -> SearchKnowledgeBaseTool {
        let client = JasperClient::builder()
            .base_url(server.uri())
            .api_key("sk-test")
            .build()
            .unwrap();
        SearchKnowledgeBaseTool::new(client)
    }

    fn result(id: &str, score: f64) -> KnowledgeSearchResult {
        KnowledgeSearchResult {
            id: id.to_string(),
            name: format!("{}.pdf", id),
            score,
            tags: Some(vec!["sales".to_string(), "q3".to_string()]),
            summary: Some("Quarterly numbers".to_string()),
            text: Some("Revenue grew".to_string()),
        }
    }

    const ALL: Presentation = Presentation {
        text: true,
        summary: true,
        tags: true,
    };

    #[test]
    fn test_results_sorted_by_descending_score() {
        let blocks = format_results(
            vec![result("low", 0.2), result("high", 0.9), result("mid", 0.5)],
            &ALL,
        );

        let scores: Vec<String> = blocks
            .iter()
            .map(|ToolContent::Text { text }| {
                text.lines()
                    .find(|line| line.starts_with("Score: "))
                    .unwrap()
                    .to_string()
            })
            .collect();
        assert_eq!(scores, vec!["Score: 0.9", "Score: 0.5", "Score: 0.2"]);
    }

    #[test]
    fn test_full_block_layout() {
        let text = format_result(&result("k1", 0.75), &ALL);
        assert_eq!(
            text,
            "Filename: k1.pdf\n\nknowledgeId: k1\n\nTags: sales, q3\n\nScore: 0.75\n\n\
             Summary: Quarterly numbers\n\nText: Revenue grew"
        );
    }

    #[test]
    fn test_include_text_false_hides_text() {
        let presentation = Presentation {
            text: false,
            ..ALL
        };
        let text = format_result(&result("k1", 0.75), &presentation);
        assert!(!text.contains("Text:"));
        assert!(text.contains("Summary: Quarterly numbers"));
    }

    #[test]
    fn test_absent_fields_are_skipped() {
        let item = KnowledgeSearchResult {
            id: "k2".to_string(),
            name: "bare.txt".to_string(),
            score: 0.6,
            tags: None,
            summary: None,
            text: None,
        };
        assert_eq!(
            format_result(&item, &ALL),
            "Filename: bare.txt\n\nknowledgeId: k2\n\nScore: 0.6"
        );
    }

    #[tokio::test]
    async fn test_defaults_are_sent_and_toggles_are_not() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/searchKnowledge"))
            .and(body_json(json!({
                "query": "investor update",
                "options": {
                    "retrievalFilterThresholdScore": 0.5,
                    "dedupByDocId": false,
                    "retrievalFilterThresholdMaxDocs": 10,
                    "enableReranker": false
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool(&server)
            .execute(json!({"query": "investor update", "includeText": false}))
            .await
            .unwrap();

        // An empty result set yields no blocks at all.
        assert_eq!(result, CallToolResult::success(vec![]));
    }

    #[tokio::test]
    async fn test_knowledge_ids_restriction_is_sent() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/searchKnowledge"))
            .and(body_json(json!({
                "query": "pricing",
                "options": {
                    "retrievalFilterThresholdScore": 0.7,
                    "dedupByDocId": true,
                    "retrievalFilterThresholdMaxDocs": 3,
                    "enableReranker": true,
                    "knowledgeIds": ["k1", "k2"]
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"id": "k1", "name": "a.pdf", "score": 0.2, "text": "alpha"},
                    {"id": "k2", "name": "b.pdf", "score": 0.9, "text": "beta"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool(&server)
            .execute(json!({
                "query": "pricing",
                "retrievalFilterThresholdScore": 0.7,
                "dedupByDocId": true,
                "retrievalFilterThresholdMaxDocs": 3,
                "enableReranker": true,
                "knowledgeIds": ["k1", "k2"],
                "includeText": false
            }))
            .await
            .unwrap();

        assert_eq!(
            result.content,
            vec![
                ToolContent::text("Filename: b.pdf\n\nknowledgeId: k2\n\nScore: 0.9"),
                ToolContent::text("Filename: a.pdf\n\nknowledgeId: k1\n\nScore: 0.2"),
            ]
        );
    }

    #[tokio::test]
    async fn test_remote_failure_is_a_diagnostic() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/searchKnowledge"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = tool(&server).execute(json!({"query": "x"})).await.unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(result.text().starts_with(
            "Failed to make request to Jasper AI for search-knowledge-base"
        ));
    }

    #[tokio::test]
    async fn test_whole_float_max_docs_is_accepted() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/searchKnowledge"))
            .and(body_json(json!({
                "query": "roadmap",
                "options": {
                    "retrievalFilterThresholdScore": 0.5,
                    "dedupByDocId": false,
                    "retrievalFilterThresholdMaxDocs": 10,
                    "enableReranker": false
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool(&server)
            .execute(json!({"query": "roadmap", "retrievalFilterThresholdMaxDocs": 10.0}))
            .await
            .unwrap();
        assert_eq!(result, CallToolResult::success(vec![]));
    }

    #[tokio::test]
    async fn test_fractional_max_docs_is_rejected() {
        let server = MockServer::start().await;

        let err = tool(&server)
            .execute(json!({"query": "roadmap", "retrievalFilterThresholdMaxDocs": 2.5}))
            .await
            .unwrap_err();
        assert!(format!("{:#}", err).contains("non-negative whole number"));
    }
}
