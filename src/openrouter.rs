//! OpenRouter chat-completions client.
//!
//! All article generation goes through the OpenRouter API, which fronts the
//! configured model. Failures are classified into a small taxonomy that the
//! HTTP layer maps onto response statuses:
//! - missing key (detected before any network I/O)
//! - transport failure (no upstream response at all)
//! - upstream HTTP error (status preserved, message extracted)
//! - well-formed response with no completion in it

use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// OpenRouter client configuration
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// Chat completions endpoint URL
    pub api_url: String,
    /// Bearer token; absence is reported per request, not at startup
    pub api_key: Option<String>,
    /// Model requested upstream and echoed in relay responses
    pub model: String,
    /// Maximum completion tokens
    pub max_tokens: u32,
    /// Sampling temperature (kept low for factual content)
    pub temperature: f32,
    /// Nucleus sampling parameter
    pub top_p: f32,
    /// HTTP-Referer header value (OpenRouter rate-limit hint)
    pub referer: String,
    /// X-Title header value (OpenRouter usage tracking)
    pub title: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_url: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            api_key: None,
            model: "meta-llama/llama-3.1-70b-instruct".to_string(),
            max_tokens: 2000,
            temperature: 0.3,
            top_p: 0.9,
            referer: "http://localhost:5000".to_string(),
            title: "WikiAI Search".to_string(),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Error)]
pub enum OpenRouterError {
    #[error("API key is not configured")]
    MissingApiKey,
    #[error("unable to reach AI service: {0}")]
    Connect(#[source] reqwest::Error),
    #[error("AI service returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("AI service response contained no completion")]
    EmptyCompletion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    model: Option<String>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A successful completion with the metadata the relay reports
#[derive(Debug, Clone)]
pub struct Completion {
    pub content: String,
    pub model: Option<String>,
    pub usage: Option<Usage>,
}

/// OpenRouter client - all outbound LLM traffic goes through here
pub struct OpenRouterClient {
    client: Client,
    config: OpenRouterConfig,
}

impl OpenRouterClient {
    pub fn new(config: OpenRouterConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Model identifier sent upstream
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Whether a non-empty API key is configured
    pub fn has_api_key(&self) -> bool {
        self.config
            .api_key
            .as_deref()
            .is_some_and(|key| !key.is_empty())
    }

    /// Send a chat completion request to OpenRouter
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<Completion, OpenRouterError> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => return Err(OpenRouterError::MissingApiKey),
        };

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
        };

        debug!(
            "Chat completion request for model {} via {}",
            self.config.model, self.config.api_url
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(&request)
            .send()
            .await
            .map_err(OpenRouterError::Connect)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OpenRouterError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|_| OpenRouterError::EmptyCompletion)?;

        if let Some(usage) = &completion.usage {
            info!(
                "Completion received: {} prompt + {} completion = {} tokens",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(OpenRouterError::EmptyCompletion)?;

        Ok(Completion {
            content,
            model: completion.model,
            usage: completion.usage,
        })
    }
}

/// Pull a human-readable message out of an upstream error body.
/// OpenRouter reports errors as `{"error": {"message": "..."}}`.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .pointer("/error/message")
                .and_then(|message| message.as_str())
                .map(|message| message.to_string())
        })
        .unwrap_or_else(|| "Unknown API error".to_string())
}
