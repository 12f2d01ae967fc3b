use std::sync::Arc;

use crate::{
    chat::{ChatProvider, ChatRole},
    conversation::ConversationStore,
    error::LLMError,
};

use super::policy::RetryPolicy;

/// Reply used when the service answered with an error status.
pub const API_ERROR_REPLY: &str = "Sorry, there was an error processing your request.";
/// Reply used when no usable answer could be obtained.
pub const UNPROCESSED_REPLY: &str = "Sorry, I couldn't process your request.";

/// A conversation bound to a completion service.
///
/// Owns the [`ConversationStore`]; the only ways to change it are
/// [`Session::respond`] and [`Session::reset`], both of which take
/// `&mut self`.
pub struct Session {
    store: ConversationStore,
    provider: Arc<dyn ChatProvider>,
    policy: RetryPolicy,
}

impl Session {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self::with_policy(provider, RetryPolicy::default())
    }

    pub fn with_policy(provider: Arc<dyn ChatProvider>, policy: RetryPolicy) -> Self {
        Self {
            store: ConversationStore::new(),
            provider,
            policy,
        }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Forget every turn and keep only the seed instruction.
    pub fn reset(&mut self) {
        self.store.reset();
        log::info!("Conversation cleared");
    }

    /// Turns one utterance into one reply.
    ///
    /// The utterance is recorded once, whatever happens afterwards. The
    /// assistant turn is recorded only when the service returned a choice.
    /// Failures never escape: they are logged and mapped to an apology that
    /// can be shown and spoken as is.
    pub async fn respond(&mut self, message: &str) -> String {
        self.store.append(ChatRole::User, message);

        let provider = self.provider.as_ref();
        let history = self.store.snapshot();
        let outcome = self.policy.run(|| provider.chat(history)).await;

        match outcome {
            Ok(response) => match response.text() {
                Some(text) => {
                    self.store.append(ChatRole::Assistant, text.clone());
                    text
                }
                None => {
                    log::warn!("Completion returned no choices: {response}");
                    UNPROCESSED_REPLY.to_string()
                }
            },
            Err(LLMError::ApiError { status, body }) => {
                log::error!("API Error: {status} {body}");
                API_ERROR_REPLY.to_string()
            }
            Err(err @ LLMError::AuthError(_)) => {
                log::error!("Completion rejected: {err}");
                API_ERROR_REPLY.to_string()
            }
            Err(err) => {
                log::error!("Error fetching AI response: {err}");
                UNPROCESSED_REPLY.to_string()
            }
        }
    }
}
