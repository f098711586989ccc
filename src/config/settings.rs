//! User settings for the finance journal
//!
//! Read from `config.json`. Missing fields fall back to their defaults.

use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

use super::paths::JournalPaths;
use crate::error::JournalError;
use crate::storage::WriteMode;

/// User settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Journal file location; relative paths are resolved against the base directory
    #[serde(default)]
    pub journal_file: Option<PathBuf>,

    /// Rewrite the journal through a temp file and rename instead of in place
    #[serde(default = "default_true")]
    pub atomic_writes: bool,

    /// Record every add and edit in the audit log
    #[serde(default = "default_true")]
    pub audit_enabled: bool,

    /// Date format used when displaying entries (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_true() -> bool {
    true
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            journal_file: None,
            atomic_writes: true,
            audit_enabled: true,
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Write strategy for journal saves
    pub fn write_mode(&self) -> WriteMode {
        if self.atomic_writes {
            WriteMode::Atomic
        } else {
            WriteMode::InPlace
        }
    }

    /// Load settings from disk; a missing file yields the defaults
    pub fn load(paths: &JournalPaths) -> Result<Self, JournalError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| JournalError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| JournalError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would fail later at display time
    pub fn validate(&self) -> Result<(), JournalError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(JournalError::Config(format!(
                "Invalid date_format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }
}
