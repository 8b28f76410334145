//! Typed wrappers around the Jasper API endpoints.

pub mod audiences;
pub mod command;
pub mod envelope;
pub mod knowledge;
pub mod styles;
pub mod tones;

pub use audiences::{Audience, AudiencesApi};
pub use command::{
    CommandApi, CommandInputs, CommandOptions, CommandOutput, GenerateContentRequest,
    DEFAULT_COMPLETION_TYPE,
};
pub use envelope::ApiResponse;
pub use knowledge::{
    KnowledgeApi, KnowledgeSearchResult, SearchKnowledgeRequest, SearchOptions,
    DEFAULT_SCORE_THRESHOLD,
};
pub use styles::{ApplyStyleRequest, Style, StyledContent, StylesApi};
pub use tones::{Tone, TonesApi};
