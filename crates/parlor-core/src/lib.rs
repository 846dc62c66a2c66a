//! # parlor-core - Core Domain Types
//!
//! Foundation crate for Parlor, a single-channel realtime chat core.
//! Provides the message data model, identity snapshots, channel events,
//! error handling, and logging bootstrap.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Data Model (`record`)
//! - [`MessageRecord`] - One message as stored and displayed, immutable
//! - [`MessageDraft`] - Append payload; the store assigns id and timestamp
//! - [`AppendReceipt`] - Store-assigned id + timestamp of a successful append
//! - [`OrderedBatch`] - Full-snapshot window delivery from a subscription
//! - [`MessageId`] - Opaque store-assigned identifier
//!
//! ### Identity (`identity`)
//! - [`Participant`] - The authenticated participant's identity snapshot
//! - [`AuthState`] - SignedOut / SignedIn gate; the core refuses to run signed out
//!
//! ### Events (`events`)
//! - [`ChannelEvent`] - View-affecting events (focus, window change, scroll, loss)
//! - [`ScrollBehavior`] - Smooth vs instant scrolling
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Logging (`logging`)
//! - [`logging::init()`] - File logging bootstrap for the consuming shell,
//!   filtered by the `PARLOR_LOG` environment variable
//!
//! ## Prelude
//!
//! Import commonly used types with `use parlor_core::prelude::*;`

pub mod error;
pub mod events;
pub mod identity;
pub mod logging;
pub mod prelude;
pub mod record;

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use events::{ChannelEvent, ScrollBehavior};
pub use identity::{AuthState, Participant};
pub use record::{
    AppendReceipt, MessageDraft, MessageId, MessageRecord, OrderedBatch, DEFAULT_WINDOW_CAPACITY,
};
