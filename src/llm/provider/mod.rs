//! Provider factory and shared HTTP plumbing.
//!
//! The factory builds a fresh adapter from a settings snapshot on every
//! call, so configuration changes are visible on the next invocation
//! without any cache invalidation. Only the HTTP connection pool is
//! shared process-wide.
//!
//! The two adapters deliberately differ in one way: the Gemini adapter
//! retries rate-limited calls with backoff, the OpenAI adapter surfaces
//! the first failure immediately. Gemini's free tier hits 429 far more
//! often, which is where the asymmetry comes from.

pub mod gemini;
pub mod openai;

#[cfg(test)]
pub(crate) mod test_utils;

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::Client;

use crate::config::{AppSettings, Provider};
use crate::error::{FcgError, Result};
use crate::llm::CommentProvider;

const REQUEST_TIMEOUT_SECS: u64 = 120;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Shared HTTP client (one connection pool for all adapters).
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

/// First-creation error, kept so later calls fail the same way instead
/// of retrying a broken TLS setup.
static HTTP_CLIENT_ERROR: OnceLock<String> = OnceLock::new();

/// Installs the rustls ring crypto provider.
///
/// reqwest with `rustls-no-provider` needs this once per process; `main`
/// does it at startup and tests call it directly. Repeat calls are fine.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

pub(crate) fn create_http_client() -> Result<Client> {
    if let Some(client) = HTTP_CLIENT.get() {
        return Ok(client.clone());
    }
    if let Some(err_msg) = HTTP_CLIENT_ERROR.get() {
        return Err(FcgError::Other(format!(
            "HTTP client initialization failed earlier: {}",
            err_msg
        )));
    }

    let user_agent = format!(
        "{}/{} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );

    match Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()
    {
        Ok(client) => {
            let _ = HTTP_CLIENT.set(client.clone());
            Ok(client)
        }
        Err(e) => {
            let err_msg = e.to_string();
            let _ = HTTP_CLIENT_ERROR.set(err_msg.clone());
            Err(FcgError::Other(format!(
                "Failed to create HTTP client: {}",
                err_msg
            )))
        }
    }
}

/// Builds the adapter selected by the settings snapshot.
pub fn create_provider(settings: &AppSettings) -> Result<Box<dyn CommentProvider>> {
    match settings.provider {
        Provider::Gemini => Ok(Box::new(gemini::GeminiProvider::new(settings)?)),
        Provider::OpenAI => Ok(Box::new(openai::OpenAIProvider::new(settings)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_selects_adapter_by_provider() {
        let mut settings = AppSettings {
            api_key: "AIza-test".to_string(),
            openai_key: "sk-test".to_string(),
            ..Default::default()
        };

        let provider = create_provider(&settings).unwrap();
        assert_eq!(provider.name(), "Gemini");

        settings.provider = Provider::OpenAI;
        let provider = create_provider(&settings).unwrap();
        assert_eq!(provider.name(), "OpenAI");
    }
}
