// Content generation through Jasper commands

use crate::error::{expect_payload, unexpected_shape, CapabilityResult, Payload};
use crate::protocol::{CallToolResult, ToolContent, ToolSchema};
use crate::tools::{
    into_call_result, json_schema_array, json_schema_object, json_schema_string,
    parse_arguments, Tool,
};
use anyhow::Result;
use jasper_sdk::{GenerateContentRequest, JasperClient};
use serde::Deserialize;

const NAME: &str = "generate-content";

const DESCRIPTION: &str = "Generate content via Jasper AI. Jasper is a premium generative marketing solution with access to the user's style guide, brand voices, and audiences. Jasper can be used generate content for the user that adheres to their style guide, brand voices, and audiences. Additionally, background context to assist in generating content can be provided in the following ways: 1.) after searching the user's knowledge base and identifying relevant knowledgeIds, or 2.) by providing relevant information (e.g from the conversation history) directly using the context parameter.";

const NO_OUTPUT: &str = "Command executed, but no output was returned.";

/// Tool that runs a generation command against `POST /command`
pub struct GenerateContentTool {
    client: JasperClient,
}

impl GenerateContentTool {
    pub fn new(client: JasperClient) -> Self {
        Self { client }
    }

    async fn run(&self, args: GenerateContentArgs) -> CapabilityResult<Vec<ToolContent>> {
        let request = args.into_request();
        let response = self.client.commands().run(&request).await;

        let text = match expect_payload(NAME, response)? {
            Payload::Data(outputs) => outputs
                .into_iter()
                .next()
                .and_then(|output| output.text)
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| NO_OUTPUT.to_string()),
            Payload::Raw(raw) => unexpected_shape(NAME, &raw),
        };

        Ok(vec![ToolContent::text(text)])
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentArgs {
    command: String,
    #[serde(default)]
    context: Option<String>,
    #[serde(default)]
    style_id: Option<String>,
    #[serde(default)]
    tone_id: Option<String>,
    #[serde(default)]
    audience_id: Option<String>,
    #[serde(default)]
    knowledge_ids: Option<Vec<String>>,
}

impl GenerateContentArgs {
    /// Empty strings are treated as "not provided".
    fn into_request(self) -> GenerateContentRequest {
        let mut request = GenerateContentRequest::new(self.command);

        if let Some(context) = non_empty(self.context) {
            request = request.context(context);
        }
        if let Some(style_id) = non_empty(self.style_id) {
            request = request.style_id(style_id);
        }
        if let Some(tone_id) = non_empty(self.tone_id) {
            request = request.tone_id(tone_id);
        }
        if let Some(audience_id) = non_empty(self.audience_id) {
            request = request.audience_id(audience_id);
        }
        if let Some(knowledge_ids) = self.knowledge_ids {
            request = request.knowledge_ids(knowledge_ids);
        }

        request
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[async_trait::async_trait]
impl Tool for GenerateContentTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: DESCRIPTION.to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "command": json_schema_string("The command string to execute."),
                    "context": json_schema_string("Background context as a string to assist in fulfilling the command."),
                    "styleId": json_schema_string("The ID of the style to apply."),
                    "toneId": json_schema_string("The ID of the tone to use."),
                    "audienceId": json_schema_string("The ID of the audience to target."),
                    "knowledgeIds": json_schema_array(
                        serde_json::json!({"type": "string"}),
                        "Array of knowledge base IDs to use as background context for the content generation."
                    )
                }),
                vec!["command"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GenerateContentArgs = parse_arguments(NAME, arguments)?;
        Ok(into_call_result(NAME, self.run(args).await))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tool(server: &MockServer) -> GenerateContentTool {
        let client = JasperClient::builder()
            .base_url(server.uri())
            .api_key("sk-test")
            .build()
            .unwrap();
        GenerateContentTool::new(client)
    }

    #[tokio::test]
    async fn test_minimal_command_payload() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/command"))
            .and(header("X-API-Key", "sk-test"))
            .and(body_json(json!({
                "inputs": {"command": "write a tagline"},
                "options": {"completionType": "quality"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"text": "Brewed for the bold."}, {"text": "ignored"}],
                "error": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool(&server)
            .execute(json!({"command": "write a tagline"}))
            .await
            .unwrap();

        assert_eq!(result.is_error, None);
        assert_eq!(result.content, vec![ToolContent::text("Brewed for the bold.")]);
    }

    #[tokio::test]
    async fn test_optional_inputs_are_forwarded() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/command"))
            .and(body_json(json!({
                "inputs": {
                    "command": "blog intro",
                    "context": "launch week",
                    "styleId": "s1",
                    "toneId": "t1",
                    "audienceId": "a1",
                    "knowledgeIds": ["k1"]
                },
                "options": {"completionType": "quality"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"text": "Welcome to launch week."}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool(&server)
            .execute(json!({
                "command": "blog intro",
                "context": "launch week",
                "styleId": "s1",
                "toneId": "t1",
                "audienceId": "a1",
                "knowledgeIds": ["k1"]
            }))
            .await
            .unwrap();

        assert_eq!(result.text(), "Welcome to launch week.");
    }

    #[tokio::test]
    async fn test_empty_optional_strings_are_dropped() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/command"))
            .and(body_json(json!({
                "inputs": {"command": "slogan"},
                "options": {"completionType": "quality"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"text": "ok"}]})))
            .expect(1)
            .mount(&server)
            .await;

        let result = tool(&server)
            .execute(json!({"command": "slogan", "context": "", "styleId": ""}))
            .await
            .unwrap();
        assert_eq!(result.text(), "ok");
    }

    #[tokio::test]
    async fn test_envelope_error_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/command"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "error": "Insufficient credits"
            })))
            .mount(&server)
            .await;

        let result = tool(&server).execute(json!({"command": "x"})).await.unwrap();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(result.text(), "Jasper AI Error: Insufficient credits");
    }

    #[tokio::test]
    async fn test_http_failure_is_a_diagnostic() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/command"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = tool(&server).execute(json!({"command": "x"})).await.unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(result.text().contains("Failed to make request to Jasper AI for generate-content"));
        assert!(result.text().contains("Status: 503"));
    }

    #[tokio::test]
    async fn test_no_content_is_a_diagnostic() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/command"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let result = tool(&server).execute(json!({"command": "x"})).await.unwrap();
        assert_eq!(
            result.text(),
            "Failed to make request to Jasper AI for generate-content."
        );
        assert!(!result.text().contains("Jasper AI Error"));
    }

    #[tokio::test]
    async fn test_empty_output_falls_back() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/command"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let result = tool(&server).execute(json!({"command": "x"})).await.unwrap();
        assert_eq!(result.text(), NO_OUTPUT);
    }

    #[tokio::test]
    async fn test_missing_command_is_invalid() {
        let server = MockServer::start().await;
        assert!(tool(&server).execute(json!({"context": "x"})).await.is_err());
    }
}
