//! Voice assistant core.
//!
//! A [`session::Session`] keeps the conversation log and turns each finished
//! utterance into a reply from a chat-completion service, retrying transport
//! failures with exponential backoff. Speech capture, speech playback and
//! transcript display are reached through the traits in [`speech`] and
//! [`render`].
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use secrecy::SecretString;
//! use webai::{backends::huggingface::HuggingFace, session::Session};
//!
//! # async fn demo() -> Result<(), webai::error::LLMError> {
//! let key = SecretString::new(std::env::var("HF_TOKEN").unwrap_or_default());
//! let provider = HuggingFace::new(key, "mistralai/Mistral-7B-Instruct-v0.3")?;
//! let mut session = Session::new(Arc::new(provider));
//! let reply = session.respond("what is the time").await;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod chat;
pub mod conversation;
pub mod credentials;
pub mod error;
pub mod render;
pub mod session;
pub mod speech;

pub use chat::{ChatMessage, ChatProvider, ChatResponse, ChatRole};
pub use conversation::ConversationStore;
pub use error::LLMError;
pub use session::{RetryPolicy, Session, SessionHandle, SessionWorker};
