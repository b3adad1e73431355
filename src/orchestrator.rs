//! Generation orchestration facade.
//!
//! The three operations the rest of the application calls. Each one
//! takes an immutable settings snapshot and rebuilds the adapter from it
//! via the factory, so a key or model change is visible on the very next
//! call and tests can inject arbitrary configurations.

use crate::config::{AppSettings, Provider};
use crate::error::{ErrorKind, GenerationError};
use crate::llm::provider::create_provider;
use crate::llm::{GenerationRequest, ProviderResult, RewriteRequest};

/// Generates a comment for one student.
///
/// Fails fast with `InvalidKey` when the active provider's credential is
/// empty, before any adapter is built or any network call happens.
/// Pronoun and structure modes are read from the snapshot.
pub async fn generate(
    settings: &AppSettings,
    student_name: &str,
    traits: &[String],
    style: &str,
    word_count: u32,
    note: Option<&str>,
) -> ProviderResult<String> {
    if settings.active_key().trim().is_empty() {
        return Err(GenerationError::new(
            ErrorKind::InvalidKey,
            format!("no API key configured for provider '{}'", settings.provider),
        ));
    }

    let request = GenerationRequest {
        student_name: student_name.to_string(),
        traits: traits.to_vec(),
        style: style.to_string(),
        word_count,
        note: note.map(String::from),
        pronoun_mode: settings.pronoun_mode,
        structure_mode: settings.structure_mode,
    };

    let provider = create_provider(settings).map_err(into_generation_error)?;
    tracing::debug!(
        "generating comment for {} via {} ({} traits)",
        student_name,
        provider.name(),
        traits.len()
    );
    provider.generate_comment(&request).await
}

/// Rewrites an existing comment with a free-form instruction.
///
/// Callers gate on both strings being non-empty; this is not
/// re-validated here.
pub async fn rewrite(
    settings: &AppSettings,
    original_comment: &str,
    instruction: &str,
) -> ProviderResult<String> {
    if settings.active_key().trim().is_empty() {
        return Err(GenerationError::new(
            ErrorKind::InvalidKey,
            format!("no API key configured for provider '{}'", settings.provider),
        ));
    }

    let request = RewriteRequest {
        original_comment: original_comment.to_string(),
        instruction: instruction.to_string(),
    };

    let provider = create_provider(settings).map_err(into_generation_error)?;
    provider.rewrite_comment(&request).await
}

/// Tests a candidate key (and optionally a model id) against a backend.
///
/// Builds a throwaway overlay of the snapshot with only the fields under
/// test replaced; persisted configuration is never touched.
pub async fn validate_key(
    settings: &AppSettings,
    candidate_key: &str,
    provider: Provider,
    model_id: Option<&str>,
) -> ProviderResult<bool> {
    let overlay = settings.with_candidate_key(candidate_key, provider, model_id);
    let adapter = create_provider(&overlay).map_err(into_generation_error)?;
    adapter.test_connection().await
}

fn into_generation_error(err: crate::error::FcgError) -> GenerationError {
    match err {
        crate::error::FcgError::Generation(e) => e,
        other => GenerationError::new(ErrorKind::Unknown, other.to_string()),
    }
}
