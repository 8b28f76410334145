// Brand voice listing

use crate::error::{expect_payload, unexpected_shape, CapabilityResult, Payload};
use crate::protocol::{CallToolResult, ToolContent, ToolSchema};
use crate::tools::{into_call_result, json_schema_object, Tool};
use anyhow::Result;
use jasper_sdk::{JasperClient, Tone};

const NAME: &str = "get-jasper-brand-voices";

/// Largest page the tones endpoint is asked for.
const PAGE_SIZE: u32 = 100;

/// Tool that lists the account's brand voices
pub struct BrandVoicesTool {
    client: JasperClient,
}

impl BrandVoicesTool {
    pub fn new(client: JasperClient) -> Self {
        Self { client }
    }

    async fn run(&self) -> CapabilityResult<Vec<ToolContent>> {
        let response = self.client.tones().list(Some(PAGE_SIZE)).await;

        Ok(match expect_payload(NAME, response)? {
            Payload::Data(tones) => tones.iter().map(describe).collect(),
            Payload::Raw(raw) => vec![ToolContent::text(unexpected_shape(NAME, &raw))],
        })
    }
}

fn describe(tone: &Tone) -> ToolContent {
    ToolContent::text(format!(
        "Name: {}\n\nTone ID: {}\n\nDescription: {}",
        tone.name, tone.id, tone.value
    ))
}

#[async_trait::async_trait]
impl Tool for BrandVoicesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.to_string(),
            description: "Return a list of the brand voices/tones belonging to the user. These brand voices include a description to help the LLM and/or the user pick an appropriate tone, and a toneId that can be passed to jasper's generate-content tool to use that brand voice/tone when creating content.".to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        Ok(into_call_result(NAME, self.run().await))
    }
}
