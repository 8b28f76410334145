pub mod audiences;
pub mod brand_voices;
pub mod generate;
pub mod knowledge;
pub mod styles;
mod registry;

pub use audiences::AudiencesTool;
pub use brand_voices::BrandVoicesTool;
pub use generate::GenerateContentTool;
pub use knowledge::SearchKnowledgeBaseTool;
pub use styles::{ApplyStyleTool, StyleGuidesTool};
pub(crate) use registry::{into_call_result, parse_arguments};
pub use registry::{
    json_schema_array, json_schema_boolean, json_schema_integer, json_schema_number,
    json_schema_object, json_schema_string, Tool, ToolRegistry,
};
