//! Client surface for the remote ordered message log

use parlor_core::record::{AppendReceipt, MessageDraft};
use parlor_core::Result;

use crate::subscription::Subscription;

/// Ordered message log client.
///
/// One client is constructed process-wide and injected by reference wherever
/// the feed or the append path is needed; substituting an in-process fake is
/// how the orchestration layer gets tested. Transport concerns (reconnect,
/// retry, backoff, timeouts) live behind this trait, never in front of it.
#[trait_variant::make(MessageLog: Send)]
pub trait LocalMessageLog {
    /// Open a live feed over the most recent `window_capacity` records,
    /// ordered by creation time ascending.
    ///
    /// An initial snapshot (possibly empty) is delivered promptly after the
    /// call returns, so the consumer can render its empty state without
    /// waiting for traffic. Every subsequent change re-delivers the full
    /// refreshed window, never a delta.
    async fn subscribe(&self, window_capacity: usize) -> Result<Subscription>;

    /// Append one message.
    ///
    /// The store assigns the record id and the `created_at` timestamp from
    /// its own clock; the caller's submission order does not decide final
    /// display order.
    async fn append(&self, draft: MessageDraft) -> Result<AppendReceipt>;
}
