//! OpenAI adapter.
//!
//! Chat-completions with the prompt as a single user message. Unlike the
//! Gemini adapter there is no automatic retry: a failed attempt is
//! classified and surfaced immediately. `test_connection` lists models,
//! the cheapest authenticated call the API offers.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::AppSettings;
use crate::error::{ErrorKind, GenerationError};
use crate::llm::{
    CommentProvider, GenerationRequest, ProviderResult, RewriteRequest, classify, prompt,
};

const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com";

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<MessagePayload>,
}

#[derive(Serialize)]
struct MessagePayload {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

impl OpenAIProvider {
    pub fn new(settings: &AppSettings) -> crate::error::Result<Self> {
        let base_url = settings
            .openai_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_OPENAI_BASE)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client: super::create_http_client()?,
            api_key: settings.openai_key.clone(),
            base_url,
            model: settings.openai_model.clone(),
        })
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn models_url(&self) -> String {
        format!("{}/v1/models", self.base_url)
    }

    async fn request_text(&self, prompt_text: &str) -> ProviderResult<String> {
        let request = OpenAIRequest {
            model: self.model.clone(),
            messages: vec![MessagePayload {
                role: "user".to_string(),
                content: prompt_text.to_string(),
            }],
        };

        tracing::debug!(
            "OpenAI API request: model={}, prompt_len={}",
            self.model,
            prompt_text.len()
        );

        let response = self
            .client
            .post(self.chat_completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| classify::classify_transport(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| classify::classify_transport(&e))?;

        tracing::debug!("OpenAI API response status: {}", status);

        if !status.is_success() {
            tracing::debug!("OpenAI API error body: {}", body);
            return Err(classify::classify(Some(status.as_u16()), &body));
        }

        let parsed: OpenAIResponse = serde_json::from_str(&body).map_err(|e| {
            GenerationError::new(
                ErrorKind::Unknown,
                format!("Failed to parse OpenAI response: {}. Raw: {}", e, body),
            )
        })?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

#[async_trait]
impl CommentProvider for OpenAIProvider {
    async fn generate_comment(&self, request: &GenerationRequest) -> ProviderResult<String> {
        let prompt_text = prompt::build_generation_prompt(request);
        self.request_text(&prompt_text).await
    }

    async fn rewrite_comment(&self, request: &RewriteRequest) -> ProviderResult<String> {
        let prompt_text = prompt::build_rewrite_prompt(request);
        self.request_text(&prompt_text).await
    }

    async fn test_connection(&self) -> ProviderResult<bool> {
        let response = self
            .client
            .get(self.models_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| classify::classify_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify::classify(Some(status.as_u16()), &body));
        }
        Ok(true)
    }

    fn name(&self) -> &str {
        "OpenAI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use pretty_assertions::assert_eq;

    use crate::llm::provider::test_utils::{install_crypto, openai_test_settings};

    fn sample_request() -> GenerationRequest {
        GenerationRequest {
            student_name: "李小華".to_string(),
            traits: vec!["樂於助人".to_string()],
            style: "鼓勵型".to_string(),
            word_count: 150,
            note: None,
            pronoun_mode: Default::default(),
            structure_mode: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_generate_parses_choice_content() {
        install_crypto();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"小華樂於助人。"}}]}"#,
            )
            .create_async()
            .await;

        let provider = OpenAIProvider::new(&openai_test_settings(&server.url())).unwrap();
        let comment = provider.generate_comment(&sample_request()).await.unwrap();
        assert_eq!(comment, "小華樂於助人。");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_401_is_invalid_key() {
        install_crypto();
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
            .create_async()
            .await;

        let provider = OpenAIProvider::new(&openai_test_settings(&server.url())).unwrap();
        let err = provider.generate_comment(&sample_request()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidKey);
    }

    #[tokio::test]
    async fn test_429_surfaces_after_a_single_attempt() {
        install_crypto();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(429)
            .with_body(r#"{"error":{"message":"Rate limit reached","type":"insufficient_quota"}}"#)
            .expect(1)
            .create_async()
            .await;

        let provider = OpenAIProvider::new(&openai_test_settings(&server.url())).unwrap();
        let err = provider.generate_comment(&sample_request()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::RateLimit);
        // No automatic retry on this adapter.
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rewrite_round_trip() {
        install_crypto();
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"content":"優化後的評語"}}]}"#)
            .create_async()
            .await;

        let provider = OpenAIProvider::new(&openai_test_settings(&server.url())).unwrap();
        let result = provider
            .rewrite_comment(&RewriteRequest {
                original_comment: "原評語".to_string(),
                instruction: "增加具體事例".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(result, "優化後的評語");
    }

    #[tokio::test]
    async fn test_test_connection_lists_models() {
        install_crypto();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/models")
            .match_header("authorization", "Bearer sk-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"object":"list","data":[]}"#)
            .create_async()
            .await;

        let provider = OpenAIProvider::new(&openai_test_settings(&server.url())).unwrap();
        assert!(provider.test_connection().await.unwrap());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_test_connection_auth_failure_is_an_error_not_false() {
        install_crypto();
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/v1/models")
            .with_status(401)
            .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
            .create_async()
            .await;

        let provider = OpenAIProvider::new(&openai_test_settings(&server.url())).unwrap();
        let err = provider.test_connection().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidKey);
    }

    #[tokio::test]
    async fn test_missing_content_defaults_to_empty() {
        install_crypto();
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
            .create_async()
            .await;

        let provider = OpenAIProvider::new(&openai_test_settings(&server.url())).unwrap();
        let comment = provider.generate_comment(&sample_request()).await.unwrap();
        assert_eq!(comment, "");
    }
}
