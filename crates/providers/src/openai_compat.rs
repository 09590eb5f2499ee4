//! OpenAI-compatible completion backend.
//!
//! Works with: OpenAI, OpenRouter, Ollama, vLLM, and any endpoint that
//! exposes an OpenAI-compatible `/v1/chat/completions` API. The enhancer
//! only ever sends a single prompt, so the request is one user message and
//! the response is the first choice's content.

use async_trait::async_trait;
use refseek_core::completion::CompletionClient;
use refseek_core::error::CompletionError;
use serde::Deserialize;
use tracing::{debug, warn};

/// An OpenAI-compatible completion client.
pub struct OpenAiCompatClient {
    name: String,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    client: reqwest::Client,
}

impl OpenAiCompatClient {
    /// Create a new client for an arbitrary OpenAI-compatible endpoint.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .unwrap_or_default();

        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: "gpt-4-turbo-preview".into(),
            temperature: 0.1,
            max_tokens: 4096,
            client,
        }
    }

    /// Create an OpenAI client (convenience constructor).
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::new("openai", "https://api.openai.com/v1", api_key)
    }

    /// Create an OpenRouter client (convenience constructor).
    pub fn openrouter(api_key: impl Into<String>) -> Self {
        Self::new("openrouter", "https://openrouter.ai/api/v1", api_key)
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the max tokens per response.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl CompletionClient for OpenAiCompatClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, prompt: &str) -> std::result::Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "stream": false,
        });

        debug!(backend = %self.name, model = %self.model, prompt_len = prompt.len(), "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout(e.to_string())
                } else {
                    CompletionError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(CompletionError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(CompletionError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Completion backend returned error");
            return Err(CompletionError::Api {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| CompletionError::Api {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CompletionError::Api {
                status_code: 200,
                message: "No choices in response".into(),
            })?;

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_stripped() {
        let client = OpenAiCompatClient::new("test", "https://api.example.com/v1/", "key");
        assert_eq!(client.base_url, "https://api.example.com/v1");
    }

    #[test]
    fn builder_settings_applied() {
        let client = OpenAiCompatClient::openai("sk-test")
            .with_model("gpt-4o")
            .with_temperature(0.3)
            .with_max_tokens(2048);
        assert_eq!(client.name(), "openai");
        assert_eq!(client.model, "gpt-4o");
        assert!((client.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(client.max_tokens, 2048);
    }

    #[test]
    fn response_parsing_extracts_first_choice() {
        let raw = serde_json::json!({
            "choices": [
                { "message": { "content": "Simplified explanation." } },
                { "message": { "content": "Ignored second choice." } }
            ]
        });
        let parsed: ApiResponse = serde_json::from_value(raw).unwrap();
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap();
        assert_eq!(content, "Simplified explanation.");
    }

    #[test]
    fn empty_choices_handled() {
        let raw = serde_json::json!({ "choices": [] });
        let parsed: ApiResponse = serde_json::from_value(raw).unwrap();
        assert!(parsed.choices.is_empty());
    }
}
