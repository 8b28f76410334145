// Style guide tools

use crate::error::{expect_payload, unexpected_shape, CapabilityError, CapabilityResult, Payload};
use crate::protocol::{CallToolResult, ToolContent, ToolSchema};
use crate::tools::{into_call_result, json_schema_object, json_schema_string, parse_arguments, Tool};
use anyhow::Result;
use jasper_sdk::{ApiResponse, JasperClient};
use serde::Deserialize;

/// Tool that rewrites text according to a style guide
pub struct ApplyStyleTool {
    client: JasperClient,
}

impl ApplyStyleTool {
    const NAME: &'static str = "apply-style";

    pub fn new(client: JasperClient) -> Self {
        Self { client }
    }

    async fn run(&self, args: ApplyStyleArgs) -> CapabilityResult<Vec<ToolContent>> {
        let response = self
            .client
            .styles()
            .apply(&args.style_id, &args.content)
            .await
            .map_err(|source| CapabilityError::Request {
                capability: Self::NAME,
                source,
            })?;

        let text = match response {
            ApiResponse::Success(styled) => styled.text,
            ApiResponse::Failure { message, raw } => {
                return Err(CapabilityError::StyleRejected {
                    message,
                    response: raw,
                })
            }
            ApiResponse::Unexpected(raw) => {
                tracing::warn!(response = %raw, "Unexpected apply-style response from Jasper API");
                format!(
                    "Style applied, but received an unexpected response format from Jasper AI. Response: {}",
                    raw
                )
            }
            ApiResponse::NoContent => {
                return Err(CapabilityError::NoContent {
                    capability: Self::NAME,
                })
            }
        };

        Ok(vec![ToolContent::text(text)])
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplyStyleArgs {
    style_id: String,
    content: String,
}

#[async_trait::async_trait]
impl Tool for ApplyStyleTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Applies a specified style guide's rules to the provided text content and returns the styled content. This tool can be used to ensure content conforms to the user's style guide, especially useful when generating content for public consumption or checking published content against the style guide.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "styleId": json_schema_string("The ID of the style to apply."),
                    "content": json_schema_string("The text content to style.")
                }),
                vec!["styleId", "content"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ApplyStyleArgs = parse_arguments(Self::NAME, arguments)?;
        Ok(into_call_result(Self::NAME, self.run(args).await))
    }
}

/// Tool that returns the account's style guide id
pub struct StyleGuidesTool {
    client: JasperClient,
}

impl StyleGuidesTool {
    const NAME: &'static str = "get-jasper-style-guides";

    pub fn new(client: JasperClient) -> Self {
        Self { client }
    }

    // Only the first style guide is reported.
    async fn run(&self) -> CapabilityResult<Vec<ToolContent>> {
        let response = self.client.styles().list().await;

        let text = match expect_payload(Self::NAME, response)? {
            Payload::Data(styles) => match styles.first() {
                Some(style) => format!("Style ID: {}", style.id),
                None => "No Jasper AI style guides found.".to_string(),
            },
            Payload::Raw(raw) => unexpected_shape(Self::NAME, &raw),
        };

        Ok(vec![ToolContent::text(text)])
    }
}

#[async_trait::async_trait]
impl Tool for StyleGuidesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Return the style guide id belonging to the user. This style guide id can be passed to jasper's generate-content tool to use that style when creating content. It can also be used in the apply-style tool to apply a style to a given text.".to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        Ok(into_call_result(Self::NAME, self.run().await))
    }
}
