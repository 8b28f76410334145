use super::{render_collection, Resource};
use crate::protocol::{ReadResourceResult, ResourceContents, ResourceSchema, ResourceTemplate};
use jasper_sdk::{JasperClient, Style};

const NAME: &str = "jasper-styles";
const BASE_URI: &str = "jasper://styles";

/// Style guides as `jasper://styles/{id}` items.
pub struct StylesResource {
    client: JasperClient,
}

impl StylesResource {
    pub fn new(client: JasperClient) -> Self {
        Self { client }
    }
}

fn to_contents(styles: Vec<Style>) -> Vec<ResourceContents> {
    styles
        .into_iter()
        .map(|style| {
            ResourceContents::text(
                format!("{}/{}", BASE_URI, style.id),
                format!("Jasper Style ID: {}", style.id),
            )
            .with_meta(serde_json::json!({ "styleId": style.id }))
        })
        .collect()
}

#[async_trait::async_trait]
impl Resource for StylesResource {
    fn schema(&self) -> ResourceSchema {
        ResourceSchema {
            uri: BASE_URI.to_string(),
            name: NAME.to_string(),
            description: "Style guides belonging to the Jasper account".to_string(),
            mime_type: "text/plain".to_string(),
        }
    }

    fn template(&self) -> ResourceTemplate {
        ResourceTemplate {
            uri_template: format!("{}/{{id}}", BASE_URI),
            name: "jasper-style".to_string(),
            description: "A single Jasper style guide by id".to_string(),
            mime_type: "text/plain".to_string(),
        }
    }

    async fn read(&self, uri: &str) -> ReadResourceResult {
        let response = self.client.styles().list().await;
        render_collection(NAME, BASE_URI, uri, response, to_contents)
    }
}
