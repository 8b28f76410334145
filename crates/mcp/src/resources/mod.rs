//! MCP resources.
//!
//! Resources expose the same Jasper collections as the listing tools, but as
//! addressable items under the `jasper://` scheme:
//! - `jasper://styles/{id}`
//! - `jasper://brandvoices/{name}`
//! - `jasper://audiences/{slug}`
//!
//! Reading a base URI returns every item; reading an item URI returns just that
//! item.

mod audiences;
mod brand_voices;
mod styles;

pub use audiences::AudiencesResource;
pub use brand_voices::BrandVoicesResource;
pub use styles::StylesResource;

use crate::error::{expect_payload, unexpected_shape, Payload};
use crate::protocol::{ReadResourceResult, ResourceContents, ResourceSchema, ResourceTemplate};
use anyhow::{bail, Result};
use jasper_sdk::{ApiResponse, JasperResult};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::sync::Arc;

/// Characters left as-is when an item name is placed in a URI.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A readable collection of Jasper items.
#[async_trait::async_trait]
pub trait Resource: Send + Sync {
    /// Descriptor of the collection URI.
    fn schema(&self) -> ResourceSchema;

    /// Descriptor of the per-item URIs.
    fn template(&self) -> ResourceTemplate;

    /// Whether `uri` is the collection URI or one of its items.
    fn matches(&self, uri: &str) -> bool {
        let base = self.schema().uri;
        uri == base
            || uri
                .strip_prefix(base.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Read the collection or one item of it. Failures become diagnostic
    /// content rather than errors.
    async fn read(&self, uri: &str) -> ReadResourceResult;
}

/// Registry for MCP resources, kept in registration order.
#[derive(Default)]
pub struct ResourceRegistry {
    resources: Vec<Arc<dyn Resource>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self {
            resources: Vec::new(),
        }
    }

    /// Registers a resource. Each base URI may only be registered once.
    pub fn register(&mut self, resource: Arc<dyn Resource>) -> Result<()> {
        let uri = resource.schema().uri;
        if self.resources.iter().any(|r| r.schema().uri == uri) {
            bail!("Resource {} is already registered", uri);
        }
        self.resources.push(resource);
        Ok(())
    }

    /// The resource responsible for `uri`, if any.
    pub fn find(&self, uri: &str) -> Option<Arc<dyn Resource>> {
        self.resources.iter().find(|r| r.matches(uri)).cloned()
    }

    pub fn list_schemas(&self) -> Vec<ResourceSchema> {
        self.resources.iter().map(|r| r.schema()).collect()
    }

    pub fn list_templates(&self) -> Vec<ResourceTemplate> {
        self.resources.iter().map(|r| r.template()).collect()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Lowercase a name and collapse every whitespace run into one hyphen.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut in_whitespace = false;

    for c in lowered.chars() {
        if is_slug_separator(c) {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.push(c);
            in_whitespace = false;
        }
    }

    slug
}

/// Whitespace as matched by the `\s` class of ECMAScript regular expressions:
/// Unicode `White_Space` without U+0085, plus the byte-order mark.
fn is_slug_separator(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Percent-encode a single URI path component.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Shared read path: fetch a collection, render it, and narrow it to `uri`.
pub(crate) fn render_collection<T>(
    capability: &'static str,
    base: &str,
    uri: &str,
    response: JasperResult<ApiResponse<Vec<T>>>,
    to_contents: impl FnOnce(Vec<T>) -> Vec<ResourceContents>,
) -> ReadResourceResult {
    let contents = match expect_payload(capability, response) {
        Ok(Payload::Data(items)) => to_contents(items),
        Ok(Payload::Raw(raw)) => {
            tracing::warn!(resource = capability, response = %raw, "Unexpected Jasper API response");
            return diagnostic(uri, unexpected_shape(capability, &raw));
        }
        Err(e) => {
            tracing::warn!(resource = capability, error = %e, "Resource read failed");
            return diagnostic(uri, e.to_string());
        }
    };

    if uri == base {
        return ReadResourceResult { contents };
    }

    let selected: Vec<ResourceContents> =
        contents.into_iter().filter(|c| c.uri == uri).collect();
    if selected.is_empty() {
        return diagnostic(uri, format!("No Jasper AI item found at {}.", uri));
    }
    ReadResourceResult { contents: selected }
}

/// One text item at `uri` explaining what went wrong.
pub(crate) fn diagnostic(uri: &str, text: impl Into<String>) -> ReadResourceResult {
    ReadResourceResult {
        contents: vec![ResourceContents::text(uri, text)],
    }
}
