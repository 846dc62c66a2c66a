//! Test utilities for log backends
//!
//! Provides draft builders and a backend whose append path always fails.

use parlor_core::identity::Participant;
use parlor_core::record::{AppendReceipt, MessageDraft};
use parlor_core::{Error, Result};

use crate::log::MessageLog;
use crate::memory::InMemoryLog;
use crate::subscription::Subscription;

/// Creates a draft from `text` with a default test participant
pub fn test_draft(text: &str) -> MessageDraft {
    test_draft_from(text, "u1", "Ann")
}

/// Creates a draft from `text` with full control over the author snapshot
pub fn test_draft_from(text: &str, author_id: &str, author_name: &str) -> MessageDraft {
    MessageDraft::new(text, &Participant::new(author_id, author_name))
}

/// Log backend whose append path always fails.
///
/// The feed side delegates to an inner [`InMemoryLog`], so subscriptions
/// behave normally while every append is rejected -- the shape of a backend
/// with a healthy read path and a broken write path.
#[derive(Clone, Default)]
pub struct RejectingLog {
    inner: InMemoryLog,
}

impl RejectingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The working feed side, for seeding records or asserting emptiness
    pub fn feed_side(&self) -> &InMemoryLog {
        &self.inner
    }
}

impl MessageLog for RejectingLog {
    async fn subscribe(&self, window_capacity: usize) -> Result<Subscription> {
        self.inner.subscribe(window_capacity).await
    }

    async fn append(&self, draft: MessageDraft) -> Result<AppendReceipt> {
        Err(Error::append(format!(
            "append rejected by test backend: {:?}",
            draft.text
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejecting_log_fails_appends_only() {
        let log = RejectingLog::new();
        let mut subscription = log.subscribe(100).await.unwrap();
        assert!(subscription.recv().await.is_some());

        let result = log.append(test_draft("hello")).await;
        assert!(matches!(result, Err(Error::Append { .. })));
        assert!(log.feed_side().is_empty().await);
    }
}
