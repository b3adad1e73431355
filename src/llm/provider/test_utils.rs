//! Shared builders for adapter tests.

use crate::config::{AppSettings, Provider};

/// Installs the rustls crypto provider for tests that hit a mock server.
pub(crate) fn install_crypto() {
    super::install_crypto_provider();
}

/// Settings pointing the Gemini adapter at a mock server.
pub(crate) fn gemini_test_settings(base_url: &str) -> AppSettings {
    AppSettings {
        provider: Provider::Gemini,
        api_key: "AIza-test".to_string(),
        gemini_endpoint: Some(base_url.to_string()),
        ..Default::default()
    }
}

/// Settings pointing the OpenAI adapter at a mock server.
pub(crate) fn openai_test_settings(base_url: &str) -> AppSettings {
    AppSettings {
        provider: Provider::OpenAI,
        openai_key: "sk-test".to_string(),
        openai_endpoint: Some(base_url.to_string()),
        ..Default::default()
    }
}
