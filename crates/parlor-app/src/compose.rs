//! Compose draft buffer and submission gate

/// Local draft text for the compose field.
///
/// The buffer holds keystrokes verbatim -- no trimming while the user is
/// editing, so cursor position and mid-edit whitespace survive. Trimming
/// happens once, at submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeState {
    buffer: String,
}

impl ComposeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the buffer verbatim
    pub fn update(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// The current draft, exactly as typed
    pub fn draft(&self) -> &str {
        &self.buffer
    }

    /// True iff the trimmed buffer is non-empty.
    ///
    /// Mirrors the enabled state of the view's submit affordance.
    pub fn can_submit(&self) -> bool {
        !self.buffer.trim().is_empty()
    }

    /// Take the trimmed draft and clear the buffer.
    ///
    /// This is the only clearing path; the caller decides what to do with
    /// the text.
    pub fn take_for_submit(&mut self) -> String {
        let text = std::mem::take(&mut self.buffer);
        text.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_submit_truth_table() {
        let mut compose = ComposeState::new();
        assert!(!compose.can_submit());

        compose.update("   ");
        assert!(!compose.can_submit());

        compose.update("hi");
        assert!(compose.can_submit());

        compose.update("  hi  ");
        assert!(compose.can_submit());
    }

    #[test]
    fn test_update_is_verbatim() {
        let mut compose = ComposeState::new();
        compose.update("  draft in progress ");
        assert_eq!(compose.draft(), "  draft in progress ");
    }

    #[test]
    fn test_take_for_submit_trims_and_clears() {
        let mut compose = ComposeState::new();
        compose.update("  hello  ");

        assert_eq!(compose.take_for_submit(), "hello");
        assert_eq!(compose.draft(), "");
        assert!(!compose.can_submit());
    }
}
