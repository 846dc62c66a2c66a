//! Live subscription handle for the ordered message log

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use parlor_core::record::OrderedBatch;

/// Create a connected `(sender, subscription)` pair.
///
/// The backend holds the [`BatchSender`] and pushes a refreshed window
/// snapshot on every change; the consumer reads them through the
/// [`Subscription`]. Exactly one delivery channel exists per pair.
pub fn feed() -> (BatchSender, Subscription) {
    let (tx, rx) = mpsc::unbounded_channel();
    let closed = Arc::new(AtomicBool::new(false));
    (
        BatchSender {
            tx,
            closed: Arc::clone(&closed),
        },
        Subscription {
            rx: Some(rx),
            closed,
        },
    )
}

// ─────────────────────────────────────────────────────────
// BatchSender
// ─────────────────────────────────────────────────────────

/// Sending half of a subscription feed, held by the log backend
#[derive(Debug, Clone)]
pub struct BatchSender {
    tx: mpsc::UnboundedSender<OrderedBatch>,
    closed: Arc<AtomicBool>,
}

impl BatchSender {
    /// Deliver a full window snapshot.
    ///
    /// Returns `false` once the subscriber has closed or dropped its handle;
    /// backends use this to prune dead feeds.
    pub fn send(&self, batch: OrderedBatch) -> bool {
        if self.closed.load(Ordering::SeqCst) {
            return false;
        }
        self.tx.send(batch).is_ok()
    }

    /// Whether the subscriber can still observe deliveries
    pub fn is_live(&self) -> bool {
        !self.closed.load(Ordering::SeqCst) && !self.tx.is_closed()
    }
}

// ─────────────────────────────────────────────────────────
// Subscription
// ─────────────────────────────────────────────────────────

/// Receiving half of one live feed of window snapshots.
///
/// Closing (or dropping) the handle ends the feed; any batch still buffered
/// at close time is discarded unobserved, so a late delivery can never reach
/// a consumer that has already torn down.
#[derive(Debug)]
pub struct Subscription {
    rx: Option<mpsc::UnboundedReceiver<OrderedBatch>>,
    closed: Arc<AtomicBool>,
}

impl Subscription {
    /// Wait for the next full window snapshot.
    ///
    /// `None` means the feed is over: either this handle was closed locally,
    /// or the backend dropped its sending half (disconnect).
    pub async fn recv(&mut self) -> Option<OrderedBatch> {
        match self.rx.as_mut() {
            Some(rx) => rx.recv().await,
            None => None,
        }
    }

    /// End the feed.
    ///
    /// Idempotent; safe to call any number of times. No delivery can be
    /// observed after this returns.
    pub fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
        // Dropping the receiver discards anything still buffered
        self.rx = None;
    }

    pub fn is_closed(&self) -> bool {
        self.rx.is_none()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_reaches_subscriber() {
        let (sender, mut subscription) = feed();
        assert!(sender.send(OrderedBatch::default()));

        let batch = tokio_test::block_on(subscription.recv());
        assert_eq!(batch, Some(OrderedBatch::default()));
    }

    #[test]
    fn test_close_is_idempotent() {
        let (_sender, mut subscription) = feed();
        subscription.close();
        subscription.close();
        assert!(subscription.is_closed());
    }

    #[test]
    fn test_no_delivery_after_close() {
        let (sender, mut subscription) = feed();

        // Batch buffered before close must be discarded, not delivered late
        assert!(sender.send(OrderedBatch::default()));
        subscription.close();

        assert_eq!(tokio_test::block_on(subscription.recv()), None);
        assert!(!sender.send(OrderedBatch::default()));
        assert!(!sender.is_live());
    }

    #[test]
    fn test_dropped_subscriber_detected() {
        let (sender, subscription) = feed();
        drop(subscription);
        assert!(!sender.is_live());
    }

    #[test]
    fn test_backend_drop_ends_feed() {
        let (sender, mut subscription) = feed();
        drop(sender);
        assert_eq!(tokio_test::block_on(subscription.recv()), None);
    }
}
