use super::{encode_component, render_collection, slugify, Resource};
use crate::protocol::{ReadResourceResult, ResourceContents, ResourceSchema, ResourceTemplate};
use jasper_sdk::{Audience, JasperClient};

const NAME: &str = "jasper-audiences";
const BASE_URI: &str = "jasper://audiences";

/// Audiences as `jasper://audiences/{slug}` items.
pub struct AudiencesResource {
    client: JasperClient,
}

impl AudiencesResource {
    pub fn new(client: JasperClient) -> Self {
        Self { client }
    }
}

/// URI of one audience, e.g. `Finance Team` becomes `jasper://audiences/finance-team`.
pub fn audience_uri(name: &str) -> String {
    format!("{}/{}", BASE_URI, encode_component(&slugify(name)))
}

fn to_contents(audiences: Vec<Audience>) -> Vec<ResourceContents> {
    audiences
        .into_iter()
        .map(|audience| {
            let mut text = format!("Audience: {}\nID: {}", audience.name, audience.id);
            if let Some(description) = &audience.description {
                text.push_str(&format!("\nDescription: {}", description));
            }

            ResourceContents::text(audience_uri(&audience.name), text)
                .with_meta(serde_json::json!({ "audienceId": audience.id }))
        })
        .collect()
}

#[async_trait::async_trait]
impl Resource for AudiencesResource {
    fn schema(&self) -> ResourceSchema {
        ResourceSchema {
            uri: BASE_URI.to_string(),
            name: NAME.to_string(),
            description: "Audiences belonging to the Jasper account".to_string(),
            mime_type: "text/plain".to_string(),
        }
    }

    fn template(&self) -> ResourceTemplate {
        ResourceTemplate {
            uri_template: format!("{}/{{slug}}", BASE_URI),
            name: "jasper-audience".to_string(),
            description: "A single Jasper audience by the slug of its name".to_string(),
            mime_type: "text/plain".to_string(),
        }
    }

    async fn read(&self, uri: &str) -> ReadResourceResult {
        let response = self.client.audiences().list().await;
        render_collection(NAME, BASE_URI, uri, response, to_contents)
    }
}
