//! File-backed conversation store with a read-through cache.
//!
//! One pretty-printed JSON document per conversation id under the
//! storage root. No locking is applied to the backing files: concurrent
//! writers to the same id race and the last write wins, and the
//! in-process cache can diverge from another process's writes since
//! there is no invalidation protocol. The store is safe under a
//! single-writer assumption; that limitation is accepted, not a bug.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::SystemTime;

use serde_json::Value;
use thiserror::Error;

use crate::domain::conversation::{
    ConversationMessage, ConversationRecord, ConversationSummary, Metadata, SearchMatch,
    StorageStats,
};
use crate::domain::foundation::{ConversationId, Timestamp};

/// Search excerpts are truncated to this many characters.
const EXCERPT_LEN: usize = 100;

/// Errors surfaced by write-side store operations.
///
/// Read-side "not found" and "unparseable" outcomes are soft failures
/// reported as `None`/`false`, never as this type.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable keyed storage of conversation records.
pub struct ConversationStore {
    root: PathBuf,
    cache: Mutex<HashMap<String, ConversationRecord>>,
}

impl ConversationStore {
    /// Opens (and creates, if needed) a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            cache: Mutex::new(HashMap::new()),
        })
    }

    /// Upserts a conversation as a full-record overwrite.
    ///
    /// Callers must pass the complete message list. `created_at` is
    /// preserved from any prior record unless `metadata` carries an
    /// explicit RFC 3339 `created_at`; `updated_at` is always refreshed.
    pub fn save(
        &self,
        id: &ConversationId,
        messages: Vec<ConversationMessage>,
        metadata: Option<Metadata>,
    ) -> Result<(), StoreError> {
        let metadata = metadata.unwrap_or_default();

        let explicit_created_at = metadata
            .get("created_at")
            .and_then(Value::as_str)
            .and_then(Timestamp::parse_rfc3339);
        let created_at = explicit_created_at
            .or_else(|| self.load(id).map(|prior| prior.created_at))
            .unwrap_or_else(Timestamp::now);

        self.write_record(ConversationRecord {
            conversation_id: id.clone(),
            created_at,
            updated_at: Timestamp::now(),
            messages,
            metadata,
        })
    }

    /// Loads a conversation, serving from the cache when possible.
    ///
    /// A record that fails to read or parse is treated as absent and
    /// logged, never raised.
    pub fn load(&self, id: &ConversationId) -> Option<ConversationRecord> {
        if let Some(record) = self.cache().get(id.as_str()) {
            return Some(record.clone());
        }

        let path = self.record_path(id);
        if !path.exists() {
            return None;
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(conversation_id = %id, "Failed to read stored conversation: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<ConversationRecord>(&raw) {
            Ok(record) => {
                self.cache().insert(id.as_str().to_string(), record.clone());
                Some(record)
            }
            Err(e) => {
                tracing::warn!(conversation_id = %id, "Failed to parse stored conversation: {}", e);
                None
            }
        }
    }

    /// Checks whether a conversation exists in the backing store.
    pub fn exists(&self, id: &ConversationId) -> bool {
        self.record_path(id).exists()
    }

    /// Lists conversation ids, most recently modified first.
    ///
    /// Ordering follows storage modification time, not the records'
    /// logical `updated_at`.
    pub fn list(&self, limit: Option<usize>) -> Vec<String> {
        let mut entries = self.record_files();
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        let ids = entries.into_iter().filter_map(|(path, _)| {
            path.file_stem()
                .and_then(|stem| stem.to_str())
                .map(str::to_string)
        });
        match limit {
            Some(limit) => ids.take(limit).collect(),
            None => ids.collect(),
        }
    }

    /// Loads summary rows for the most recent conversations.
    pub fn recent_summaries(&self, limit: usize) -> Vec<ConversationSummary> {
        self.list(Some(limit))
            .into_iter()
            .filter_map(|id| ConversationId::new(id).ok())
            .filter_map(|id| self.load(&id))
            .map(|record| ConversationSummary {
                conversation_id: record.conversation_id.clone(),
                updated_at: record.updated_at,
                message_count: record.messages.len(),
                first_prompt: record.first_prompt().map(str::to_string),
                dialogue_mode: record.dialogue_mode().map(str::to_string),
                has_images: record.has_images(),
            })
            .collect()
    }

    /// Deletes a conversation from both the backing store and the
    /// cache. Returns false if it does not exist.
    pub fn delete(&self, id: &ConversationId) -> bool {
        let path = self.record_path(id);
        if !path.exists() {
            return false;
        }

        match fs::remove_file(&path) {
            Ok(()) => {
                self.cache().remove(id.as_str());
                true
            }
            Err(e) => {
                tracing::warn!(conversation_id = %id, "Failed to delete conversation: {}", e);
                false
            }
        }
    }

    /// Shallow-merges `updates` into the record's metadata and re-saves.
    ///
    /// Only top-level keys are merged; nested structures are replaced
    /// wholesale. In particular, passing a `generated_images` value
    /// here overwrites the list; use [`append_generated_image`] for
    /// list-safe appends. Returns false if the record is absent.
    ///
    /// [`append_generated_image`]: Self::append_generated_image
    pub fn update_metadata(&self, id: &ConversationId, updates: Metadata) -> bool {
        let Some(mut record) = self.load(id) else {
            return false;
        };

        record.metadata.extend(updates);
        record.updated_at = Timestamp::now();
        self.commit_soft(record)
    }

    /// Appends one descriptor to the record's `generated_images` list,
    /// creating the list if needed. Returns false if the record is
    /// absent.
    pub fn append_generated_image(&self, id: &ConversationId, descriptor: Value) -> bool {
        let Some(mut record) = self.load(id) else {
            return false;
        };

        let images = record
            .metadata
            .entry("generated_images".to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        match images.as_array_mut() {
            Some(list) => list.push(descriptor),
            // A non-list value under the key is replaced with a fresh list.
            None => *images = Value::Array(vec![descriptor]),
        }

        record.updated_at = Timestamp::now();
        self.commit_soft(record)
    }

    /// Scans all conversations in recency order for message content
    /// containing `query` (case-insensitive). Each conversation yields
    /// at most one match; the scan stops once `limit` matches are
    /// collected.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchMatch> {
        let query_lower = query.to_lowercase();
        let mut matches = Vec::new();

        for id in self.list(None) {
            if matches.len() >= limit {
                break;
            }
            let Ok(id) = ConversationId::new(id) else {
                continue;
            };
            let Some(record) = self.load(&id) else {
                continue;
            };

            for message in &record.messages {
                if message.content.to_lowercase().contains(&query_lower) {
                    matches.push(SearchMatch {
                        conversation_id: record.conversation_id.clone(),
                        updated_at: record.updated_at,
                        excerpt: excerpt_of(&message.content),
                    });
                    break;
                }
            }
        }

        matches
    }

    /// Reports aggregate storage statistics.
    pub fn stats(&self) -> StorageStats {
        let files = self.record_files();
        let total_conversations = files.len();
        let total_size_bytes: u64 = files
            .iter()
            .filter_map(|(path, _)| fs::metadata(path).ok())
            .map(|meta| meta.len())
            .sum();
        let total_size_mb =
            (total_size_bytes as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0;

        StorageStats {
            total_conversations,
            total_size_bytes,
            total_size_mb,
            storage_root: self.root.clone(),
        }
    }

    /// Returns the storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, id: &ConversationId) -> PathBuf {
        self.root.join(format!("{}.json", id))
    }

    fn record_files(&self) -> Vec<(PathBuf, SystemTime)> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            tracing::warn!(root = %self.root.display(), "Failed to read storage root");
            return Vec::new();
        };

        entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| {
                let modified = fs::metadata(&path).and_then(|m| m.modified()).ok()?;
                Some((path, modified))
            })
            .collect()
    }

    fn write_record(&self, record: ConversationRecord) -> Result<(), StoreError> {
        let path = self.record_path(&record.conversation_id);
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(&path, json)?;
        self.cache()
            .insert(record.conversation_id.as_str().to_string(), record);
        Ok(())
    }

    /// Write-back for mutation helpers that report success as a bool.
    fn commit_soft(&self, record: ConversationRecord) -> bool {
        let id = record.conversation_id.clone();
        match self.write_record(record) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(conversation_id = %id, "Failed to write conversation: {}", e);
                false
            }
        }
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<String, ConversationRecord>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn excerpt_of(content: &str) -> String {
    if content.chars().count() > EXCERPT_LEN {
        let truncated: String = content.chars().take(EXCERPT_LEN).collect();
        format!("{}...", truncated)
    } else {
        content.to_string()
    }
}
