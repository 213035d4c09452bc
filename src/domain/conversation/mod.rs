//! Conversation module - The persisted unit of refinement state.
//!
//! Records are owned exclusively by the store; callers only ever hold
//! copies. The message list plus an open metadata map capture one
//! ongoing refinement session end to end.

mod message;
mod record;

pub use message::{ConversationMessage, MessageRole};
pub use record::{
    ConversationRecord, ConversationSummary, GeneratedImage, Metadata, SearchMatch, StorageStats,
};
