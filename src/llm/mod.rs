//! Comment generation abstractions, shared types, and the provider trait.

/// Raw failure → taxonomy mapping.
pub mod classify;
/// Prompt construction for generation and rewrite.
pub mod prompt;
/// Built-in provider implementations and the factory.
pub mod provider;
/// Rate-limit retry loop.
pub mod retry;

use async_trait::async_trait;

use crate::config::{PronounMode, StructureMode};
use crate::error::GenerationError;

/// Result type used across the provider boundary.
pub type ProviderResult<T> = std::result::Result<T, GenerationError>;

/// One comment generation request.
///
/// Built fresh per call by the orchestrator; never reused. `traits` must
/// be non-empty for a normal generation (callers gate on that), and
/// `word_count` is advisory text for the model, never validated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub student_name: String,
    pub traits: Vec<String>,
    pub style: String,
    pub word_count: u32,
    pub note: Option<String>,
    pub pronoun_mode: PronounMode,
    pub structure_mode: StructureMode,
}

/// Request to refine an existing comment with a free-form instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRequest {
    pub original_comment: String,
    pub instruction: String,
}

/// Capability set implemented by every backend adapter.
///
/// Both variants share the prompt builder and the error taxonomy; they
/// differ in wire format and in which raw message patterns show up.
/// The Gemini adapter retries rate limits internally, the OpenAI one
/// does not (see the factory docs in [`provider`]).
#[async_trait]
pub trait CommentProvider: Send + Sync {
    /// Generates a fresh comment for one student.
    async fn generate_comment(&self, request: &GenerationRequest) -> ProviderResult<String>;

    /// Rewrites an existing comment according to an instruction.
    async fn rewrite_comment(&self, request: &RewriteRequest) -> ProviderResult<String>;

    /// Probes the backend with a minimal call.
    ///
    /// Returns `Ok(true)` on a usable response; transport or auth
    /// failures surface as classified errors, never as `Ok(false)`.
    async fn test_connection(&self) -> ProviderResult<bool>;

    /// Provider name for logs.
    fn name(&self) -> &str;
}
