//! Conversation record and derived read models.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::enrichment::ImageSize;
use crate::domain::foundation::{ConversationId, Timestamp};

use super::message::ConversationMessage;

/// Open metadata mapping attached to a record.
///
/// Well-known keys: `dialogue_mode`, `responses` (the accumulated
/// answer map), `original_prompt`, `enhanced_prompt`,
/// `dialogue_complete`, `generated_images`, and optionally
/// `created_at` to override the record's creation time on save.
pub type Metadata = serde_json::Map<String, Value>;

/// The persisted unit of state for one refinement session.
///
/// `created_at` never changes across updates unless the caller
/// explicitly overrides it; `updated_at` is refreshed on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub conversation_id: ConversationId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub messages: Vec<ConversationMessage>,
    #[serde(default)]
    pub metadata: Metadata,
}

impl ConversationRecord {
    /// Returns the first message's content, if any.
    pub fn first_prompt(&self) -> Option<&str> {
        self.messages.first().map(|m| m.content.as_str())
    }

    /// Returns the stored dialogue mode string, if any.
    pub fn dialogue_mode(&self) -> Option<&str> {
        self.metadata.get("dialogue_mode").and_then(Value::as_str)
    }

    /// Returns true if at least one generated image is recorded.
    pub fn has_images(&self) -> bool {
        self.metadata
            .get("generated_images")
            .and_then(Value::as_array)
            .is_some_and(|images| !images.is_empty())
    }
}

/// Summary row for recent-conversation listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub conversation_id: ConversationId,
    pub updated_at: Timestamp,
    pub message_count: usize,
    pub first_prompt: Option<String>,
    pub dialogue_mode: Option<String>,
    pub has_images: bool,
}

/// One search hit: the first message in a conversation whose content
/// matched the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub conversation_id: ConversationId,
    pub updated_at: Timestamp,
    /// The matching content, truncated to 100 characters.
    pub excerpt: String,
}

/// Descriptor for one generated artifact, appended to a record's
/// `generated_images` metadata list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Where the bytes were saved.
    pub path: PathBuf,
    /// The prompt actually sent to the generation service.
    pub prompt: String,
    /// Requested dimensions.
    pub size: ImageSize,
    /// When the artifact was saved.
    pub created_at: Timestamp,
}

impl GeneratedImage {
    /// Converts the descriptor to a metadata value.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).expect("descriptor serialization cannot fail")
    }
}

/// Aggregate statistics over the backing store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageStats {
    pub total_conversations: usize,
    pub total_size_bytes: u64,
    /// Total size in megabytes, rounded to two decimals.
    pub total_size_mb: f64,
    pub storage_root: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_with_metadata(metadata: Metadata) -> ConversationRecord {
        ConversationRecord {
            conversation_id: ConversationId::generate(),
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
            messages: vec![ConversationMessage::user("a logo for my bakery")],
            metadata,
        }
    }

    #[test]
    fn first_prompt_reads_first_message() {
        let record = record_with_metadata(Metadata::new());
        assert_eq!(record.first_prompt(), Some("a logo for my bakery"));
    }

    #[test]
    fn dialogue_mode_reads_metadata_string() {
        let mut metadata = Metadata::new();
        metadata.insert("dialogue_mode".into(), json!("guided"));
        let record = record_with_metadata(metadata);
        assert_eq!(record.dialogue_mode(), Some("guided"));
    }

    #[test]
    fn has_images_requires_nonempty_list() {
        let mut metadata = Metadata::new();
        metadata.insert("generated_images".into(), json!([]));
        assert!(!record_with_metadata(metadata.clone()).has_images());

        metadata.insert("generated_images".into(), json!([{"path": "/tmp/x.png"}]));
        assert!(record_with_metadata(metadata).has_images());
    }

    #[test]
    fn record_round_trips_through_json() {
        let mut metadata = Metadata::new();
        metadata.insert("dialogue_mode".into(), json!("quick"));
        let record = record_with_metadata(metadata);

        let json = serde_json::to_string_pretty(&record).unwrap();
        let back: ConversationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn generated_image_descriptor_serializes_with_api_size() {
        let descriptor = GeneratedImage {
            path: PathBuf::from("/tmp/image_20250101_000000_abcd1234.png"),
            prompt: "a bakery logo, clean design".into(),
            size: ImageSize::Square,
            created_at: Timestamp::now(),
        };
        let value = descriptor.to_value();
        assert_eq!(value["size"], json!("1024x1024"));
    }
}
