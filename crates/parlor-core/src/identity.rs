//! Participant identity snapshots

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The authenticated participant, as supplied by the identity provider.
///
/// Messages carry a copy of these fields taken at write time; a later
/// identity change never rewrites past messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Stable identifier from the identity provider
    pub id: String,
    /// Display name shown next to messages
    pub display_name: String,
    /// Avatar image URL, if the provider supplies one
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Participant {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            avatar_url: None,
        }
    }

    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }
}

/// Whether an authenticated participant is present.
///
/// The channel core refuses to run signed out; the view layer is expected to
/// gate entry on [`AuthState::SignedIn`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    SignedOut,
    SignedIn(Participant),
}

impl AuthState {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthState::SignedIn(_))
    }

    /// Get the participant, if one is signed in
    pub fn participant(&self) -> Option<&Participant> {
        match self {
            AuthState::SignedIn(participant) => Some(participant),
            AuthState::SignedOut => None,
        }
    }

    /// Get the participant or fail with [`Error::SignedOut`]
    pub fn require(&self) -> Result<&Participant> {
        self.participant().ok_or(Error::SignedOut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_signed_out() {
        let auth = AuthState::SignedOut;
        assert!(matches!(auth.require(), Err(Error::SignedOut)));
        assert!(!auth.is_signed_in());
        assert!(auth.participant().is_none());
    }

    #[test]
    fn test_require_signed_in() {
        let auth = AuthState::SignedIn(Participant::new("u1", "Ann"));
        let participant = auth.require().expect("participant is present");
        assert_eq!(participant.id, "u1");
        assert_eq!(participant.display_name, "Ann");
        assert!(participant.avatar_url.is_none());
    }

    #[test]
    fn test_participant_builder() {
        let participant =
            Participant::new("u2", "Ben").with_avatar_url("https://example.test/ben.png");
        assert_eq!(
            participant.avatar_url.as_deref(),
            Some("https://example.test/ben.png")
        );
    }

    #[test]
    fn test_default_is_signed_out() {
        assert_eq!(AuthState::default(), AuthState::SignedOut);
    }
}
