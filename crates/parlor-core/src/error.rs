//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Identity Errors
    // ─────────────────────────────────────────────────────────────
    #[error("No participant is signed in")]
    SignedOut,

    // ─────────────────────────────────────────────────────────────
    // Channel Lifecycle Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel is already active")]
    AlreadyActive,

    #[error("Channel was deactivated; rejoining requires a fresh controller")]
    Deactivated,

    // ─────────────────────────────────────────────────────────────
    // Log Store Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Subscription error: {message}")]
    Subscription { message: String },

    #[error("Append error: {message}")]
    Append { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn subscription(message: impl Into<String>) -> Self {
        Self::Subscription {
            message: message.into(),
        }
    }

    pub fn append(message: impl Into<String>) -> Self {
        Self::Append {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Recoverable errors degrade the current view (stale window, dropped
    /// message) but do not invalidate the controller itself.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Subscription { .. } | Error::Append { .. })
    }

    /// Check if this error means the channel core must not (or can no longer) run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::SignedOut | Error::AlreadyActive | Error::Deactivated
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::subscription("stream dropped");
        assert_eq!(err.to_string(), "Subscription error: stream dropped");

        let err = Error::SignedOut;
        assert!(err.to_string().contains("signed in"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::SignedOut.is_fatal());
        assert!(Error::Deactivated.is_fatal());
        assert!(!Error::append("network").is_fatal());
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::subscription("dropped").is_recoverable());
        assert!(Error::append("denied").is_recoverable());
        assert!(!Error::AlreadyActive.is_recoverable());
    }
}
