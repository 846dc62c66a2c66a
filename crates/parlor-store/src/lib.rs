//! # parlor-store - Ordered Message Log Client
//!
//! The client surface over the remote ordered log that backs the message
//! feed: subscribe to a live bounded window, append new messages.
//!
//! Depends on [`parlor_core`] for the data model and error handling.
//!
//! ## Public API
//!
//! ### Client Surface (`log`)
//! - [`MessageLog`] / [`LocalMessageLog`] - Subscribe + append, the injected
//!   collaborator standing in for the process-wide backend client
//!
//! ### Delivery (`subscription`)
//! - [`Subscription`] - Receiving half of one live feed of window snapshots
//! - [`BatchSender`] - Sending half, held by the backend
//! - [`feed()`] - Build a connected pair
//!
//! ### Backends (`memory`)
//! - [`InMemoryLog`] - Shared in-process log for tests and demos
//!
//! ### Test Helpers (`test_utils`, feature `test-helpers`)
//! - [`test_utils::RejectingLog`] - Backend whose append path always fails
//! - Draft builders for fixtures

pub mod log;
pub mod memory;
pub mod subscription;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

// Public API re-exports
pub use log::{LocalMessageLog, MessageLog};
pub use memory::InMemoryLog;
pub use subscription::{feed, BatchSender, Subscription};
