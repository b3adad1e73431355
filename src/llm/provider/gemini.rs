//! Google Gemini adapter.
//!
//! Calls `models/{model}:generateContent` with the prompt as a single
//! user turn. Generate and rewrite are wrapped in the rate-limit retry
//! loop; Gemini's free tier sits around 15 requests per minute and 429s
//! are routine.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::AppSettings;
use crate::error::{ErrorKind, GenerationError};
use crate::llm::{
    CommentProvider, GenerationRequest, ProviderResult, RewriteRequest, classify, prompt, retry,
};

const DEFAULT_GEMINI_BASE: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_retries: u32,
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Option<Vec<GeminiResponsePart>>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    text: String,
}

impl GeminiProvider {
    pub fn new(settings: &AppSettings) -> crate::error::Result<Self> {
        let base_url = settings
            .gemini_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_GEMINI_BASE)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client: super::create_http_client()?,
            api_key: settings.api_key.clone(),
            base_url,
            model: settings.gemini_model.clone(),
            max_retries: retry::MAX_RETRIES,
        })
    }

    #[cfg(test)]
    fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// One request/response round trip, classified on failure.
    async fn request_text(&self, prompt_text: &str) -> ProviderResult<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: prompt_text.to_string(),
                }],
            }],
        };

        tracing::debug!(
            "Gemini API request: model={}, prompt_len={}",
            self.model,
            prompt_text.len()
        );

        let response = self
            .client
            .post(self.generate_content_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| classify::classify_transport(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify::classify_transport(&e))?;

        tracing::debug!("Gemini API response status: {}", status);

        if !status.is_success() {
            tracing::debug!("Gemini API error body: {}", body);
            return Err(classify::classify(Some(status.as_u16()), &body));
        }

        let parsed: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            GenerationError::new(
                ErrorKind::Unknown,
                format!("Failed to parse Gemini response: {}. Raw: {}", e, body),
            )
        })?;

        parsed
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|parts| parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                GenerationError::new(ErrorKind::Unknown, "Gemini response contained no candidates")
            })
    }
}

#[async_trait]
impl CommentProvider for GeminiProvider {
    async fn generate_comment(&self, request: &GenerationRequest) -> ProviderResult<String> {
        let prompt_text = prompt::build_generation_prompt(request);
        retry::retry_rate_limited("Gemini", self.max_retries, || {
            self.request_text(&prompt_text)
        })
        .await
    }

    async fn rewrite_comment(&self, request: &RewriteRequest) -> ProviderResult<String> {
        let prompt_text = prompt::build_rewrite_prompt(request);
        retry::retry_rate_limited("Gemini", self.max_retries, || {
            self.request_text(&prompt_text)
        })
        .await
    }

    async fn test_connection(&self) -> ProviderResult<bool> {
        // A minimal prompt exercises auth, model id, and transport in one
        // round trip; any failure surfaces classified, never as false.
        let text = self.request_text("Hello").await?;
        Ok(!text.trim().is_empty())
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}
