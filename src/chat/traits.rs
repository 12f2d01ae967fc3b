use async_trait::async_trait;

use crate::error::LLMError;

use super::message::ChatMessage;

pub trait ChatResponse: std::fmt::Debug + std::fmt::Display + Send + Sync {
    /// Content of the first choice, or `None` when the service returned no
    /// choices at all. An empty string is a valid reply.
    fn text(&self) -> Option<String>;
}

/// Trait for services that map a message history to a generated reply.
#[async_trait]
pub trait ChatProvider: Sync + Send {
    /// Sends the whole history in one request. Implementations report a
    /// missing response as [`LLMError::HttpError`] and a non-success status
    /// as [`LLMError::ApiError`].
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError>;
}
