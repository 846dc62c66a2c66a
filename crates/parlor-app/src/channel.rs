//! Channel controller -- subscription lifecycle and the append path

use std::collections::VecDeque;
use std::sync::Arc;

use parlor_core::events::ChannelEvent;
use parlor_core::identity::{AuthState, Participant};
use parlor_core::prelude::*;
use parlor_core::record::{MessageDraft, MessageRecord};
use parlor_store::{MessageLog, Subscription};

use crate::compose::ComposeState;
use crate::config::Settings;

/// Lifecycle phase of a [`ChannelController`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelPhase {
    /// Constructed but not activated, or already deactivated
    #[default]
    Inactive,
    /// Subscription opened; the initial snapshot has not arrived yet
    Activating,
    /// Snapshots are flowing
    Active,
}

/// Orchestrates one channel view: the live window subscription, the compose
/// buffer, and the optimistic append path.
///
/// Owned and driven by a single shell event loop. Every method touches state
/// from that one cooperative context, so the controller needs no locks.
///
/// A controller activates at most once and never resumes after
/// [`deactivate`](Self::deactivate); rejoining the channel means building a
/// fresh instance.
pub struct ChannelController<L>
where
    L: MessageLog + Send + Sync + 'static,
{
    log: Arc<L>,
    /// Identity snapshot, fixed for the controller's lifetime
    author: Participant,
    compose: ComposeState,
    window: Vec<MessageRecord>,
    settings: Settings,
    phase: ChannelPhase,
    deactivated: bool,
    subscription: Option<Subscription>,
    /// Signals queued for the view (focus, scroll), drained before batches
    pending: VecDeque<ChannelEvent>,
}

impl<L> ChannelController<L>
where
    L: MessageLog + Send + Sync + 'static,
{
    /// Build a controller for the signed-in participant.
    ///
    /// Fails with [`Error::SignedOut`] when no participant is present -- the
    /// channel core does not run unauthenticated, and a participant signed
    /// in later gets a fresh controller rather than a retrofit.
    pub fn new(log: Arc<L>, auth: &AuthState, settings: Settings) -> Result<Self> {
        let author = auth.require()?.clone();
        Ok(Self {
            log,
            author,
            compose: ComposeState::new(),
            window: Vec::new(),
            settings,
            phase: ChannelPhase::Inactive,
            deactivated: false,
            subscription: None,
            pending: VecDeque::new(),
        })
    }

    pub fn phase(&self) -> ChannelPhase {
        self.phase
    }

    /// The rendered window, ordered oldest to newest
    pub fn window(&self) -> &[MessageRecord] {
        &self.window
    }

    pub fn author(&self) -> &Participant {
        &self.author
    }

    /// The compose draft, exactly as typed
    pub fn draft(&self) -> &str {
        self.compose.draft()
    }

    /// Open the channel: request compose focus and subscribe to the
    /// recent-history window.
    ///
    /// Exactly-once: fails with [`Error::AlreadyActive`] on a live
    /// controller and [`Error::Deactivated`] on a spent one.
    pub async fn activate(&mut self) -> Result<()> {
        if self.deactivated {
            return Err(Error::Deactivated);
        }
        if self.phase != ChannelPhase::Inactive {
            return Err(Error::AlreadyActive);
        }

        let subscription = self.log.subscribe(self.settings.window_capacity).await?;
        self.subscription = Some(subscription);
        self.phase = ChannelPhase::Activating;
        // First activation is the only activation, so focus fires once
        self.pending.push_back(ChannelEvent::FocusCompose);
        debug!(
            window_capacity = self.settings.window_capacity,
            "channel activated"
        );
        Ok(())
    }

    /// Close the channel and release the subscription.
    ///
    /// Idempotent; repeated calls are no-ops. After this returns no late
    /// snapshot can reach the controller, and
    /// [`next_event`](Self::next_event) drains to `None`.
    pub fn deactivate(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.close();
            debug!("channel deactivated");
        }
        // Undelivered signals die with the subscription; the view is gone
        self.pending.clear();
        self.phase = ChannelPhase::Inactive;
        self.deactivated = true;
    }

    /// Replace the compose draft verbatim
    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.compose.update(text);
    }

    /// True iff [`submit`](Self::submit) would dispatch a message
    pub fn can_submit(&self) -> bool {
        self.compose.can_submit()
    }

    /// Dispatch the drafted message.
    ///
    /// No-op on a blank buffer or a deactivated controller. The append is
    /// fire-and-forget: the buffer clears and the scroll-to-bottom signal is
    /// queued immediately, before the store confirms anything. A failed
    /// append is logged and the message never appears in the feed; the
    /// cleared buffer is not restored.
    pub fn submit(&mut self) {
        if self.deactivated || !self.compose.can_submit() {
            return;
        }

        let text = self.compose.take_for_submit();
        let draft = MessageDraft::new(text, &self.author);
        let log = Arc::clone(&self.log);
        tokio::spawn(async move {
            if let Err(err) = log.append(draft).await {
                warn!("message append failed, message dropped: {err}");
            }
        });

        self.pending.push_back(ChannelEvent::ScrollToBottom {
            behavior: self.settings.scroll_behavior,
        });
    }

    /// Next view-affecting event.
    ///
    /// Queued signals (focus, scroll) drain first; otherwise this suspends
    /// until the subscription delivers. `None` means the controller is done
    /// emitting: it was deactivated, or the feed was lost and the loss
    /// already surfaced as [`ChannelEvent::SubscriptionLost`].
    pub async fn next_event(&mut self) -> Option<ChannelEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }

        let subscription = self.subscription.as_mut()?;
        match subscription.recv().await {
            Some(batch) => {
                // Each delivery is a complete snapshot and replaces the
                // rendered set wholesale
                let records = batch.into_window(self.settings.window_capacity);
                self.window = records.clone();
                if self.phase == ChannelPhase::Activating {
                    self.phase = ChannelPhase::Active;
                }
                Some(ChannelEvent::WindowChanged { records })
            }
            None => {
                // The feed ended underneath a live controller: transport
                // loss. Terminal for this instance; the stale window stays
                // rendered.
                self.subscription = None;
                warn!("live subscription ended; window is stale from here on");
                Some(ChannelEvent::SubscriptionLost)
            }
        }
    }
}
