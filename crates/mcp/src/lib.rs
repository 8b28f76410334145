//! MCP server exposing Jasper AI content generation, styling and knowledge
//! search to MCP clients over stdio.

pub mod config;
pub mod error;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod tools;

pub use error::{CapabilityError, CapabilityResult};
pub use server::McpServer;

use anyhow::Result;
use jasper_sdk::JasperClient;
use resources::{AudiencesResource, BrandVoicesResource, ResourceRegistry, StylesResource};
use std::sync::Arc;
use tools::{
    ApplyStyleTool, AudiencesTool, BrandVoicesTool, GenerateContentTool, SearchKnowledgeBaseTool,
    StyleGuidesTool, ToolRegistry,
};

/// Register every Jasper tool and resource against `client`.
pub fn build_server(client: JasperClient) -> Result<McpServer> {
    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(GenerateContentTool::new(client.clone())))?;
    tools.register(Arc::new(ApplyStyleTool::new(client.clone())))?;
    tools.register(Arc::new(StyleGuidesTool::new(client.clone())))?;
    tools.register(Arc::new(BrandVoicesTool::new(client.clone())))?;
    tools.register(Arc::new(AudiencesTool::new(client.clone())))?;
    tools.register(Arc::new(SearchKnowledgeBaseTool::new(client.clone())))?;

    let mut resources = ResourceRegistry::new();
    resources.register(Arc::new(StylesResource::new(client.clone())))?;
    resources.register(Arc::new(BrandVoicesResource::new(client.clone())))?;
    resources.register(Arc::new(AudiencesResource::new(client)))?;

    tracing::debug!(
        tools = tools.len(),
        resources = resources.len(),
        "Registered capabilities"
    );

    Ok(McpServer::new(tools, resources))
}
