mod store;

pub use store::{ConversationStore, SYSTEM_PROMPT};
