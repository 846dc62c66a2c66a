//! Settings parser for .parlor/config.toml

use std::path::Path;

use serde::{Deserialize, Serialize};

use parlor_core::prelude::*;
use parlor_core::record::DEFAULT_WINDOW_CAPACITY;
use parlor_core::ScrollBehavior;

const CONFIG_FILENAME: &str = "config.toml";
const PARLOR_DIR: &str = ".parlor";

/// Channel settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Bound on the locally rendered recent-history window
    pub window_capacity: usize,

    /// Scroll animation used when the feed jumps to the newest message
    pub scroll_behavior: ScrollBehavior,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            scroll_behavior: ScrollBehavior::Smooth,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let mut settings: Settings =
            toml::from_str(text).map_err(|e| Error::config(e.to_string()))?;

        if settings.window_capacity == 0 {
            warn!(
                "window_capacity = 0 is unusable; falling back to {}",
                DEFAULT_WINDOW_CAPACITY
            );
            settings.window_capacity = DEFAULT_WINDOW_CAPACITY;
        }
        Ok(settings)
    }

    /// Load settings from `<root>/.parlor/config.toml`.
    ///
    /// A missing or unparsable file falls back to defaults with a warning;
    /// a broken config never blocks the channel from opening.
    pub fn load(root: &Path) -> Self {
        let path = root.join(PARLOR_DIR).join(CONFIG_FILENAME);
        if !path.exists() {
            return Self::default();
        }

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                warn!("Failed to read {}: {err}; using defaults", path.display());
                return Self::default();
            }
        };

        Self::from_toml(&text).unwrap_or_else(|err| {
            warn!("Invalid settings in {}: {err}; using defaults", path.display());
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.window_capacity, 100);
        assert_eq!(settings.scroll_behavior, ScrollBehavior::Smooth);
    }

    #[test]
    fn test_from_toml_partial_file_keeps_defaults() {
        let settings = Settings::from_toml("window_capacity = 50\n").unwrap();
        assert_eq!(settings.window_capacity, 50);
        assert_eq!(settings.scroll_behavior, ScrollBehavior::Smooth);
    }

    #[test]
    fn test_from_toml_scroll_behavior() {
        let settings = Settings::from_toml("scroll_behavior = \"instant\"\n").unwrap();
        assert_eq!(settings.scroll_behavior, ScrollBehavior::Instant);
    }

    #[test]
    fn test_zero_capacity_falls_back() {
        let settings = Settings::from_toml("window_capacity = 0\n").unwrap();
        assert_eq!(settings.window_capacity, DEFAULT_WINDOW_CAPACITY);
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        assert!(Settings::from_toml("window_capacity = \"lots\"").is_err());
    }

    #[test]
    fn test_load_missing_file_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Settings::load(dir.path()), Settings::default());
    }

    #[test]
    fn test_load_reads_config_file() {
        let dir = TempDir::new().unwrap();
        let parlor_dir = dir.path().join(PARLOR_DIR);
        fs::create_dir_all(&parlor_dir).unwrap();
        fs::write(
            parlor_dir.join(CONFIG_FILENAME),
            "window_capacity = 25\nscroll_behavior = \"instant\"\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path());
        assert_eq!(settings.window_capacity, 25);
        assert_eq!(settings.scroll_behavior, ScrollBehavior::Instant);
    }

    #[test]
    fn test_load_invalid_file_defaults() {
        let dir = TempDir::new().unwrap();
        let parlor_dir = dir.path().join(PARLOR_DIR);
        fs::create_dir_all(&parlor_dir).unwrap();
        fs::write(parlor_dir.join(CONFIG_FILENAME), "not [valid toml").unwrap();

        assert_eq!(Settings::load(dir.path()), Settings::default());
    }
}
