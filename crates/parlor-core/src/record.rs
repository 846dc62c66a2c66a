//! Message records, append payloads, and window normalization

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::Participant;

/// Default bound on the locally retained recent-history window
pub const DEFAULT_WINDOW_CAPACITY: usize = 100;

// ─────────────────────────────────────────────────────────
// MessageId
// ─────────────────────────────────────────────────────────

/// Store-assigned message identifier.
///
/// Opaque and stable for the record's lifetime. This is the sole
/// reconciliation key for the rendered window; ordering never looks at it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MessageId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ─────────────────────────────────────────────────────────
// MessageRecord / MessageDraft / AppendReceipt
// ─────────────────────────────────────────────────────────

/// One message as stored and displayed.
///
/// Created exactly once, on successful append; never mutated afterwards.
/// Serialized field names are the store document shape (`createdAt`,
/// `authorId`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub id: MessageId,
    /// Trimmed, non-empty user text. Blank input never produces a record.
    pub text: String,
    /// Server-assigned timestamp. Used only for ordering, never for identity.
    pub created_at: DateTime<Utc>,
    pub author_id: String,
    pub author_name: String,
    #[serde(default)]
    pub author_avatar_url: Option<String>,
}

/// Append payload sent to the store.
///
/// The store assigns `id` and `created_at` server-side; callers never supply
/// them. Author fields are a snapshot of the sender at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDraft {
    pub text: String,
    pub author_id: String,
    pub author_name: String,
    #[serde(default)]
    pub author_avatar_url: Option<String>,
}

impl MessageDraft {
    /// Build a draft from user text and the sending participant
    pub fn new(text: impl Into<String>, author: &Participant) -> Self {
        Self {
            text: text.into(),
            author_id: author.id.clone(),
            author_name: author.display_name.clone(),
            author_avatar_url: author.avatar_url.clone(),
        }
    }
}

/// What a successful append resolves to
#[derive(Debug, Clone, PartialEq)]
pub struct AppendReceipt {
    pub id: MessageId,
    pub created_at: DateTime<Utc>,
}

// ─────────────────────────────────────────────────────────
// OrderedBatch
// ─────────────────────────────────────────────────────────

/// One full-snapshot delivery from a live subscription.
///
/// A batch always carries the complete current window, never a delta.
/// Consumers replace their rendered set wholesale on every delivery -- the
/// snapshot is authoritative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedBatch {
    pub records: Vec<MessageRecord>,
}

impl OrderedBatch {
    pub fn new(records: Vec<MessageRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Normalize into a render-ready window.
    ///
    /// Stable-sorts by `created_at` (preserving store insertion order on
    /// ties), drops any record repeating an earlier `id`, and evicts the
    /// oldest entries beyond `capacity`. A well-behaved store sends batches
    /// that pass through unchanged; a misbehaving one must still never
    /// produce a disordered or duplicated view.
    pub fn into_window(self, capacity: usize) -> Vec<MessageRecord> {
        let mut records = self.records;
        records.sort_by_key(|record| record.created_at);

        let mut seen: HashSet<MessageId> = HashSet::with_capacity(records.len());
        records.retain(|record| seen.insert(record.id.clone()));

        if records.len() > capacity {
            let excess = records.len() - capacity;
            records.drain(..excess);
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: &str, at_secs: i64) -> MessageRecord {
        MessageRecord {
            id: MessageId::from(id),
            text: format!("message {id}"),
            created_at: Utc.timestamp_opt(at_secs, 0).unwrap(),
            author_id: "u1".to_string(),
            author_name: "Ann".to_string(),
            author_avatar_url: None,
        }
    }

    #[test]
    fn test_window_sorted_by_created_at() {
        let batch = OrderedBatch::new(vec![record("c", 30), record("a", 10), record("b", 20)]);
        let window = batch.into_window(DEFAULT_WINDOW_CAPACITY);

        let ids: Vec<&str> = window.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_window_ties_keep_insertion_order() {
        // Same timestamp: the store's insertion order (batch order) wins
        let batch = OrderedBatch::new(vec![record("first", 10), record("second", 10)]);
        let window = batch.into_window(DEFAULT_WINDOW_CAPACITY);

        let ids: Vec<&str> = window.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["first", "second"]);
    }

    #[test]
    fn test_window_drops_duplicate_ids() {
        let batch = OrderedBatch::new(vec![record("a", 10), record("a", 20), record("b", 30)]);
        let window = batch.into_window(DEFAULT_WINDOW_CAPACITY);

        assert_eq!(window.len(), 2);
        assert_eq!(window[0].id.as_str(), "a");
        assert_eq!(window[0].created_at, Utc.timestamp_opt(10, 0).unwrap());
        assert_eq!(window[1].id.as_str(), "b");
    }

    #[test]
    fn test_window_evicts_oldest_beyond_capacity() {
        let batch = OrderedBatch::new(vec![
            record("a", 10),
            record("b", 20),
            record("c", 30),
            record("d", 40),
        ]);
        let window = batch.into_window(3);

        let ids: Vec<&str> = window.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "d"]);
    }

    #[test]
    fn test_empty_batch() {
        let window = OrderedBatch::default().into_window(DEFAULT_WINDOW_CAPACITY);
        assert!(window.is_empty());
    }

    #[test]
    fn test_record_wire_field_names() {
        let json = serde_json::to_value(record("m1", 42)).unwrap();

        assert!(json.get("createdAt").is_some());
        assert_eq!(json["authorId"], "u1");
        assert_eq!(json["authorName"], "Ann");
        assert!(json.get("authorAvatarUrl").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_record_deserializes_without_avatar() {
        let doc = r#"{
            "id": "m1",
            "text": "hello",
            "createdAt": "2024-05-01T12:00:00Z",
            "authorId": "u1",
            "authorName": "Ann"
        }"#;

        let record: MessageRecord = serde_json::from_str(doc).unwrap();
        assert_eq!(record.id.as_str(), "m1");
        assert!(record.author_avatar_url.is_none());
    }

    #[test]
    fn test_draft_snapshots_author() {
        let author =
            Participant::new("u9", "Zoe").with_avatar_url("https://example.test/zoe.png");
        let draft = MessageDraft::new("hi there", &author);

        assert_eq!(draft.text, "hi there");
        assert_eq!(draft.author_id, "u9");
        assert_eq!(draft.author_name, "Zoe");
        assert_eq!(
            draft.author_avatar_url.as_deref(),
            Some("https://example.test/zoe.png")
        );
    }
}
