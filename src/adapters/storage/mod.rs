//! Local conversation persistence.

mod conversation_store;

pub use conversation_store::{ConversationStore, StoreError};
