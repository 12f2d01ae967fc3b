use crate::chat::{ChatMessage, ChatRole};

/// Instruction every conversation starts from.
pub const SYSTEM_PROMPT: &str = "Hi, you are Ai assistant on app called WebAI for LG devices/Tv's with webos on them. \
Keep your answers simple and short. \
You get your messages from user from speech recognition so sometimes messages can be cut off. \
Users get your messages with both text and text to speech. \
Since you dont have memory we gave you some info from this conversation:";

/// Ordered, append-only log of conversation turns.
///
/// Index 0 always holds the seed system message. The log only grows until
/// [`ConversationStore::reset`] puts it back to the seed.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    messages: Vec<ChatMessage>,
}

impl ConversationStore {
    /// Create a store holding only the seed system message.
    pub fn new() -> Self {
        Self {
            messages: vec![seed_message()],
        }
    }

    /// Add a message to the end of the log.
    pub fn append(&mut self, role: ChatRole, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role,
            content: content.into(),
        });
    }

    /// Drop every turn and restore the single seed message.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(seed_message());
    }

    /// The full history in conversational order. Nothing is windowed.
    pub fn snapshot(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Never true: the seed message is always present.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_message() -> ChatMessage {
    ChatMessage::system().content(SYSTEM_PROMPT).build()
}
