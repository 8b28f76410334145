//! Content generation through `POST /command`.

use crate::api::ApiResponse;
use crate::client::JasperClient;
use crate::error::JasperResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Completion mode requested for every generation.
pub const DEFAULT_COMPLETION_TYPE: &str = "quality";

/// Command API for generating content.
pub struct CommandApi<'a> {
    client: &'a JasperClient,
}

impl<'a> CommandApi<'a> {
    pub(crate) fn new(client: &'a JasperClient) -> Self {
        Self { client }
    }

    /// Run a generation command.
    pub async fn run(
        &self,
        request: &GenerateContentRequest,
    ) -> JasperResult<ApiResponse<Vec<CommandOutput>>> {
        let body: Option<Value> = self.client.http.post("/command", request).await?;
        Ok(ApiResponse::from_body(body))
    }
}

/// Body of `POST /command`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub inputs: CommandInputs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<CommandOptions>,
}

impl GenerateContentRequest {
    /// A request for `command` using the default completion type.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            inputs: CommandInputs {
                command: command.into(),
                context: None,
                style_id: None,
                tone_id: None,
                audience_id: None,
                knowledge_ids: None,
            },
            options: Some(CommandOptions {
                completion_type: DEFAULT_COMPLETION_TYPE.to_string(),
            }),
        }
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.inputs.context = Some(context.into());
        self
    }

    pub fn style_id(mut self, style_id: impl Into<String>) -> Self {
        self.inputs.style_id = Some(style_id.into());
        self
    }

    pub fn tone_id(mut self, tone_id: impl Into<String>) -> Self {
        self.inputs.tone_id = Some(tone_id.into());
        self
    }

    pub fn audience_id(mut self, audience_id: impl Into<String>) -> Self {
        self.inputs.audience_id = Some(audience_id.into());
        self
    }

    pub fn knowledge_ids(mut self, knowledge_ids: Vec<String>) -> Self {
        self.inputs.knowledge_ids = Some(knowledge_ids);
        self
    }
}

/// Inputs of a generation command. Unset fields are left out of the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandInputs {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOptions {
    pub completion_type: String,
}

/// One generated completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOutput {
    #[serde(default)]
    pub text: Option<String>,
}
