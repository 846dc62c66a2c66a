//! # parlor-app - Channel State and Orchestration
//!
//! The orchestration layer of Parlor: glues the live log subscription, the
//! compose buffer, and the append path together behind explicit lifecycle
//! methods, and emits view-affecting events for whatever shell renders the
//! channel.
//!
//! The rendering technology is deliberately out of scope: a shell drives
//! [`ChannelController`] from its event loop (`activate`, `update_draft`,
//! `submit`, `deactivate`) and consumes [`parlor_core::ChannelEvent`]s from
//! `next_event`.

pub mod channel;
pub mod compose;
pub mod config;

// Re-export primary types
pub use channel::{ChannelController, ChannelPhase};
pub use compose::ComposeState;
pub use config::Settings;
