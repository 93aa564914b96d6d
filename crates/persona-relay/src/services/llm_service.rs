use crate::config::{ApiKey, ProviderConfig};
use crate::utils::error::ProviderError;
use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::models::chat::ChatMessage;
use crate::services::conversation::LlmProvider;

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub max_tokens: u32,
    pub temperature: f64,
}

// Local response structs. Both `choices` and `error` are optional because
// some providers answer 200 with only an error object.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// OpenAI-compatible chat-completions client
#[derive(Clone)]
pub struct LlmService {
    client: Client,
    config: ProviderConfig,
    api_key: ApiKey,
}

impl LlmService {
    pub fn new(config: ProviderConfig, api_key: ApiKey) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config, api_key })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Generate completion without streaming (wait for full response)
    pub async fn generate_chat(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        debug!("Starting chat generation with {} messages", messages.len());

        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.api_key.expose())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ChatCompletionResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(ProviderError::Status { status: status.as_u16(), message });
        }

        let chat_response: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::Malformed(format!("Failed to parse LLM response: {}", e)))?;

        if let Some(error) = chat_response.error {
            return Err(ProviderError::Api(
                error.message.unwrap_or_else(|| "unknown provider error".to_string()),
            ));
        }

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ProviderError::Malformed("No reply content returned from LLM".to_string()))
    }
}

#[async_trait::async_trait]
impl LlmProvider for LlmService {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        self.generate_chat(messages).await
    }
}
