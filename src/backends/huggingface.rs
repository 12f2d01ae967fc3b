//! HuggingFace Inference API client for chat completions.
//!
//! Talks to the OpenAI-compatible `/models/{model}/v1/chat/completions`
//! route with a bearer token.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    chat::{ChatMessage, ChatProvider, ChatResponse},
    error::LLMError,
};

pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.3";
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Configuration for the HuggingFace client.
#[derive(Debug)]
pub struct HuggingFaceConfig {
    /// API token for authentication.
    pub api_key: SecretString,
    /// Model identifier, also part of the request path.
    pub model: String,
    /// Scheme and host, without the `/models` suffix.
    pub base_url: String,
    /// Maximum tokens to generate in responses.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

/// Client for the HuggingFace chat-completion endpoint.
///
/// The client uses `Arc` internally for configuration, making cloning cheap.
#[derive(Debug, Clone)]
pub struct HuggingFace {
    pub config: Arc<HuggingFaceConfig>,
    pub client: Client,
}

#[derive(Serialize)]
struct HuggingFaceChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct HuggingFaceChatRequest<'a> {
    model: &'a str,
    messages: Vec<HuggingFaceChatMessage<'a>>,
    max_tokens: u32,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct HuggingFaceChatResponse {
    #[serde(default)]
    choices: Vec<HuggingFaceChatChoice>,
}

impl std::fmt::Display for HuggingFaceChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Deserialize, Debug)]
struct HuggingFaceChatChoice {
    message: HuggingFaceChatMsg,
}

#[derive(Deserialize, Debug)]
struct HuggingFaceChatMsg {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse for HuggingFaceChatResponse {
    fn text(&self) -> Option<String> {
        self.choices
            .first()
            .map(|c| c.message.content.clone().unwrap_or_default())
    }
}

impl HuggingFace {
    /// Creates a client for `model` against the public inference endpoint.
    pub fn new(api_key: SecretString, model: impl Into<String>) -> Result<Self, LLMError> {
        Self::with_config(api_key, Some(model.into()), None, None, None)
    }

    pub fn with_config(
        api_key: SecretString,
        model: Option<String>,
        base_url: Option<String>,
        max_tokens: Option<u32>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, LLMError> {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(sec));
        }
        Ok(Self::with_client(
            builder.build()?,
            api_key,
            model,
            base_url,
            max_tokens,
            timeout_seconds,
        ))
    }

    /// Creates a new client with a custom HTTP client.
    pub fn with_client(
        client: Client,
        api_key: SecretString,
        model: Option<String>,
        base_url: Option<String>,
        max_tokens: Option<u32>,
        timeout_seconds: Option<u64>,
    ) -> Self {
        Self {
            config: Arc::new(HuggingFaceConfig {
                api_key,
                model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                max_tokens: max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
                timeout_seconds,
            }),
            client,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn max_tokens(&self) -> u32 {
        self.config.max_tokens
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl ChatProvider for HuggingFace {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        let body = HuggingFaceChatRequest {
            model: &self.config.model,
            messages: messages
                .iter()
                .map(|m| HuggingFaceChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            max_tokens: self.config.max_tokens,
            stream: false,
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("HuggingFace request payload: {}", json);
            }
        }

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        log::debug!("HuggingFace HTTP status: {}", status);

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LLMError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let raw = resp.text().await?;
        let parsed: HuggingFaceChatResponse =
            serde_json::from_str(&raw).map_err(|err| LLMError::ResponseFormatError {
                message: err.to_string(),
                raw_response: raw.clone(),
            })?;
        log::debug!("HuggingFace returned {} choice(s)", parsed.choices.len());

        Ok(Box::new(parsed))
    }
}

#[cfg(test)]
mod tests;
