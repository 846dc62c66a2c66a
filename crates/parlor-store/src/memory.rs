//! In-process ordered log backend

use std::sync::Arc;

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use tokio::sync::RwLock;
use tracing::debug;

use parlor_core::record::{AppendReceipt, MessageDraft, MessageId, MessageRecord, OrderedBatch};
use parlor_core::Result;

use crate::log::MessageLog;
use crate::subscription::{feed, BatchSender, Subscription};

/// Length of store-assigned message ids
const MESSAGE_ID_LEN: usize = 20;

/// One registered feed and the window size it asked for
struct Subscriber {
    window_capacity: usize,
    sender: BatchSender,
}

#[derive(Default)]
struct LogInner {
    /// Durable records in insertion order. `created_at` values may tie;
    /// insertion order is the tie-break.
    records: Vec<MessageRecord>,
    subscribers: Vec<Subscriber>,
}

/// Shared in-process message log.
///
/// Stands in for the durable backend during tests and demos: appends get a
/// store-assigned id and timestamp, and every live subscriber receives the
/// refreshed window snapshot after each change. Clones share the same log.
#[derive(Clone, Default)]
pub struct InMemoryLog {
    inner: Arc<RwLock<LogInner>>,
}

impl InMemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in the durable log (not the bounded window)
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }

    /// Full durable copy, in insertion order
    pub async fn records(&self) -> Vec<MessageRecord> {
        self.inner.read().await.records.clone()
    }

    /// Drop every subscriber's sending half, as a lost transport would.
    ///
    /// Live subscriptions observe this as an ended feed (`recv` -> `None`).
    pub async fn disconnect(&self) {
        let mut inner = self.inner.write().await;
        debug!(
            subscribers = inner.subscribers.len(),
            "dropping all subscriber feeds"
        );
        inner.subscribers.clear();
    }

    fn assign_id() -> MessageId {
        let id: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(MESSAGE_ID_LEN)
            .map(char::from)
            .collect();
        MessageId::from(id)
    }

    /// The most recent `capacity` records, ordered by `created_at` ascending.
    /// Stable sort keeps insertion order on timestamp ties.
    fn window_of(records: &[MessageRecord], capacity: usize) -> OrderedBatch {
        let mut sorted = records.to_vec();
        sorted.sort_by_key(|record| record.created_at);
        let start = sorted.len().saturating_sub(capacity);
        OrderedBatch::new(sorted[start..].to_vec())
    }

    /// Store a record and fan the refreshed window out to every live feed
    async fn publish(&self, record: MessageRecord) {
        let mut inner = self.inner.write().await;
        inner.records.push(record);

        let records = inner.records.clone();
        inner.subscribers.retain(|subscriber| {
            subscriber
                .sender
                .send(Self::window_of(&records, subscriber.window_capacity))
        });
    }
}

impl MessageLog for InMemoryLog {
    async fn subscribe(&self, window_capacity: usize) -> Result<Subscription> {
        let (sender, subscription) = feed();
        let mut inner = self.inner.write().await;

        // Initial snapshot goes out before the subscriber is registered, so
        // it is always the first delivery and arrives even on an empty log.
        sender.send(Self::window_of(&inner.records, window_capacity));
        inner.subscribers.push(Subscriber {
            window_capacity,
            sender,
        });
        debug!(window_capacity, "subscriber registered");
        Ok(subscription)
    }

    async fn append(&self, draft: MessageDraft) -> Result<AppendReceipt> {
        let record = MessageRecord {
            id: Self::assign_id(),
            text: draft.text,
            created_at: Utc::now(),
            author_id: draft.author_id,
            author_name: draft.author_name,
            author_avatar_url: draft.author_avatar_url,
        };
        let receipt = AppendReceipt {
            id: record.id.clone(),
            created_at: record.created_at,
        };
        self.publish(record).await;
        Ok(receipt)
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl InMemoryLog {
    /// Append with a caller-chosen timestamp. Fixture for ordering and
    /// tie-break tests; the real append path always stamps from the store
    /// clock.
    pub async fn append_at(
        &self,
        draft: MessageDraft,
        created_at: chrono::DateTime<Utc>,
    ) -> AppendReceipt {
        let record = MessageRecord {
            id: Self::assign_id(),
            text: draft.text,
            created_at,
            author_id: draft.author_id,
            author_name: draft.author_name,
            author_avatar_url: draft.author_avatar_url,
        };
        let receipt = AppendReceipt {
            id: record.id.clone(),
            created_at: record.created_at,
        };
        self.publish(record).await;
        receipt
    }
}
