// Audience listing

use crate::error::{expect_payload, unexpected_shape, CapabilityResult, Payload};
use crate::protocol::{CallToolResult, ToolContent, ToolSchema};
use crate::tools::{into_call_result, json_schema_object, Tool};
use anyhow::Result;
use jasper_sdk::{Audience, JasperClient};

const NAME: &str = "get-jasper-audiences";

/// Tool that lists the account's audiences
pub struct AudiencesTool {
    client: JasperClient,
}

impl AudiencesTool {
    pub fn new(client: JasperClient) -> Self {
        Self { client }
    }

    async fn run(&self) -> CapabilityResult<Vec<ToolContent>> {
        let response = self.client.audiences().list().await;

        Ok(match expect_payload(NAME, response)? {
            Payload::Data(audiences) => audiences.iter().map(describe).collect(),
            Payload::Raw(raw) => vec![ToolContent::text(unexpected_shape(NAME, &raw))],
        })
    }
}

fn describe(audience: &Audience) -> ToolContent {
    let mut text = format!("Name: {}\n\nAudience ID: {}", audience.name, audience.id);
    if let Some(description) = &audience.description {
        text.push_str(&format!("\n\nDescription: {}", description));
    }
    ToolContent::text(text)
}

#[async_trait::async_trait]
impl Tool for AudiencesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: "Return a list of the audiences belonging to the user. These audiences include a description to help the LLM and/or the user pick an appropriate audience, and an audienceId that can be passed to jasper's generate-content tool to use that audience when creating content.".to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        Ok(into_call_result(NAME, self.run().await))
    }
}
