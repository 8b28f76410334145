//! # Jasper SDK
//!
//! Async Rust client for the Jasper AI content-generation API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jasper_sdk::{ApiResponse, JasperClient, JasperResult};
//!
//! #[tokio::main]
//! async fn main() -> JasperResult<()> {
//!     let client = JasperClient::builder()
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     if let ApiResponse::Success(tones) = client.tones().list(Some(100)).await? {
//!         for tone in tones {
//!             println!("{} ({})", tone.name, tone.id);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Every endpoint wrapper returns an [`ApiResponse`], which separates a typed
//! payload from envelope errors, unexpected shapes and empty responses.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

pub use api::{
    ApiResponse, Audience, CommandOutput, GenerateContentRequest, KnowledgeSearchResult,
    SearchKnowledgeRequest, SearchOptions, Style, StyledContent, Tone,
};
pub use client::{JasperClient, JasperClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{JasperError, JasperResult};
pub use transport::{HttpMethod, HttpTransport};
