mod message;
mod traits;

pub use message::{ChatMessage, ChatMessageBuilder, ChatRole};
pub use traits::{ChatProvider, ChatResponse};
