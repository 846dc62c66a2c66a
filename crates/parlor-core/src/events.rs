//! Channel events consumed by the rendering shell

use serde::{Deserialize, Serialize};

use crate::record::MessageRecord;

/// How the view should animate a requested scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    /// Animated scroll; the default for freshly sent messages
    #[default]
    Smooth,
    /// Jump without animation
    Instant,
}

/// View-affecting events emitted by the channel controller.
///
/// The rendering layer consumes these through
/// `ChannelController::next_event` and applies them to whatever UI
/// technology it uses; the core never renders anything itself.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    /// Request input focus for the compose field.
    /// Emitted exactly once, on first activation.
    FocusCompose,

    /// The rendered window changed. `records` is the complete new window and
    /// replaces the previous set wholesale.
    WindowChanged { records: Vec<MessageRecord> },

    /// Scroll the feed to its bottom-most element.
    /// Emitted immediately on submit, before the appended message echoes
    /// back through the subscription.
    ScrollToBottom { behavior: ScrollBehavior },

    /// The live subscription ended and will not resume on this controller.
    /// The window stays rendered but is stale from here on.
    SubscriptionLost,
}

impl ChannelEvent {
    /// True for events after which no further deliveries can follow
    pub fn is_terminal(&self) -> bool {
        matches!(self, ChannelEvent::SubscriptionLost)
    }
}
