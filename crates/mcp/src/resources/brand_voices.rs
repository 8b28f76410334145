use super::{encode_component, render_collection, Resource};
use crate::protocol::{ReadResourceResult, ResourceContents, ResourceSchema, ResourceTemplate};
use jasper_sdk::{JasperClient, Tone};

const NAME: &str = "jasper-brand-voices";
const BASE_URI: &str = "jasper://brandvoices";

/// Brand voices as `jasper://brandvoices/{name}` items.
pub struct BrandVoicesResource {
    client: JasperClient,
}

impl BrandVoicesResource {
    pub fn new(client: JasperClient) -> Self {
        Self { client }
    }
}

fn to_contents(tones: Vec<Tone>) -> Vec<ResourceContents> {
    if tones.is_empty() {
        return vec![ResourceContents::text(
            BASE_URI,
            "No Jasper AI brand voices found.",
        )];
    }

    tones
        .into_iter()
        .map(|tone| {
            ResourceContents::text(
                format!("{}/{}", BASE_URI, encode_component(&tone.name)),
                format!("Name: {}\n\n{}", tone.name, tone.value),
            )
            .with_meta(serde_json::json!({ "toneId": tone.id }))
        })
        .collect()
}

#[async_trait::async_trait]
impl Resource for BrandVoicesResource {
    fn schema(&self) -> ResourceSchema {
        ResourceSchema {
            uri: BASE_URI.to_string(),
            name: NAME.to_string(),
            description: "Brand voices (tones) belonging to the Jasper account".to_string(),
            mime_type: "text/plain".to_string(),
        }
    }

    fn template(&self) -> ResourceTemplate {
        ResourceTemplate {
            uri_template: format!("{}/{{name}}", BASE_URI),
            name: "jasper-brand-voice".to_string(),
            description: "A single Jasper brand voice by its URI-encoded name".to_string(),
            mime_type: "text/plain".to_string(),
        }
    }

    async fn read(&self, uri: &str) -> ReadResourceResult {
        let response = self.client.tones().list(None).await;
        render_collection(NAME, BASE_URI, uri, response, to_contents)
    }
}
