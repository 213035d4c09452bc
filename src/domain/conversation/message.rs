//! Message entries within a conversation record.

use serde::{Deserialize, Serialize};

use crate::domain::dialogue::DialogueStage;
use crate::domain::foundation::Timestamp;

/// Role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// System notes (invisible to the user).
    System,
    /// User input.
    User,
    /// Assistant output (questions, confirmations).
    Assistant,
}

impl MessageRole {
    /// Returns true if this is a user-visible role.
    pub fn is_user_visible(&self) -> bool {
        matches!(self, Self::User | Self::Assistant)
    }
}

/// One entry in a conversation's message list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Who said it.
    pub role: MessageRole,
    /// What was said.
    pub content: String,
    /// When it was recorded.
    pub timestamp: Timestamp,
    /// The dialogue stage this message belongs to, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<DialogueStage>,
}

impl ConversationMessage {
    /// Creates a message with the given role, stamped now.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Timestamp::now(),
            stage: None,
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Tags the message with the stage it belongs to.
    pub fn with_stage(mut self, stage: DialogueStage) -> Self {
        self.stage = Some(stage);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_roles() {
        assert_eq!(ConversationMessage::user("hi").role, MessageRole::User);
        assert_eq!(
            ConversationMessage::assistant("hello").role,
            MessageRole::Assistant
        );
        assert_eq!(ConversationMessage::system("note").role, MessageRole::System);
    }

    #[test]
    fn system_role_is_not_user_visible() {
        assert!(!MessageRole::System.is_user_visible());
        assert!(MessageRole::User.is_user_visible());
        assert!(MessageRole::Assistant.is_user_visible());
    }

    #[test]
    fn stage_tag_is_optional_and_omitted_from_json() {
        let bare = ConversationMessage::user("hi");
        let json = serde_json::to_string(&bare).unwrap();
        assert!(!json.contains("stage"));

        let tagged = bare.with_stage(DialogueStage::Style);
        let json = serde_json::to_string(&tagged).unwrap();
        assert!(json.contains("\"stage\":\"style\""));
    }

    #[test]
    fn round_trips_through_json() {
        let msg = ConversationMessage::assistant("What style?").with_stage(DialogueStage::Style);
        let json = serde_json::to_string(&msg).unwrap();
        let back: ConversationMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(msg, back);
    }
}
