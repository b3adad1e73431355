use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FcgError>;

#[derive(Error, Debug)]
pub enum FcgError {
    #[error("{0}")]
    Generation(#[from] GenerationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Configuration parsing error: {0}")]
    ConfigParse(#[from] config::ConfigError),

    #[error("UI error: {0}")]
    Inquire(#[from] inquire::InquireError),

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

/// Classification of a failed provider call.
///
/// Every raw provider failure is normalized into exactly one of these
/// kinds by [`classify`](crate::llm::classify::classify). Only
/// [`RateLimit`](ErrorKind::RateLimit) is ever retried, and only inside
/// the Gemini adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Credential missing, malformed, or rejected (401 and friends).
    InvalidKey,
    /// Model id unknown to the backend.
    InvalidModel,
    /// Request rejected as malformed (400 without a model reference).
    InvalidRequest,
    /// Quota exhausted or 429.
    RateLimit,
    /// Transport-level failure (DNS, connect, timeout).
    Network,
    /// Anything that matched no known pattern.
    Unknown,
}

impl ErrorKind {
    fn message_key(self) -> &'static str {
        match self {
            ErrorKind::InvalidKey => "generation.invalid_key",
            ErrorKind::InvalidModel => "generation.invalid_model",
            ErrorKind::InvalidRequest => "generation.invalid_request",
            ErrorKind::RateLimit => "generation.rate_limit",
            ErrorKind::Network => "generation.network",
            ErrorKind::Unknown => "generation.unknown",
        }
    }
}

/// A provider failure normalized into the six-kind taxonomy.
///
/// `message` is the localized sentence shown to the user; `detail` keeps
/// the raw provider text so logs retain what actually came back.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct GenerationError {
    pub kind: ErrorKind,
    pub message: String,
    pub detail: String,
}

impl GenerationError {
    /// Builds an error of the given kind, deriving the user-facing
    /// message from the active locale.
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        let message = match kind {
            ErrorKind::Unknown => {
                rust_i18n::t!("generation.unknown", detail = detail.as_str()).to_string()
            }
            _ => rust_i18n::t!(kind.message_key()).to_string(),
        };
        Self {
            kind,
            message,
            detail,
        }
    }

    /// Actionable hint for the CLI, when one exists for this kind.
    pub fn suggestion(&self) -> Option<String> {
        let key = match self.kind {
            ErrorKind::InvalidKey => "generation.suggestion.invalid_key",
            ErrorKind::InvalidModel => "generation.suggestion.invalid_model",
            ErrorKind::RateLimit => "generation.suggestion.rate_limit",
            ErrorKind::Network => "generation.suggestion.network",
            _ => return None,
        };
        Some(rust_i18n::t!(key).to_string())
    }
}
