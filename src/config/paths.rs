//! Path management for the finance journal
//!
//! ## Path Resolution Order
//!
//! 1. `FINANCE_JOURNAL_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/finance-journal` or `~/.config/finance-journal`
//! 3. Windows: `%APPDATA%\finance-journal`

use std::path::{Path, PathBuf};

use crate::error::JournalError;

/// Environment variable that overrides the base directory
pub const DIR_ENV_VAR: &str = "FINANCE_JOURNAL_DIR";

const APP_DIR_NAME: &str = "finance-journal";

/// Default name of the journal file inside the base directory
pub const DEFAULT_JOURNAL_FILE: &str = "finance_journal.txt";

/// Manages all paths used by the journal
#[derive(Debug, Clone)]
pub struct JournalPaths {
    base_dir: PathBuf,
}

impl JournalPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, JournalError> {
        let base_dir = match std::env::var(DIR_ENV_VAR) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create JournalPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Default location of the journal file
    pub fn journal_file(&self) -> PathBuf {
        self.base_dir.join(DEFAULT_JOURNAL_FILE)
    }

    /// Resolve a configured journal location; relative paths live under the base directory
    pub fn resolve_journal_file(&self, configured: Option<&Path>) -> PathBuf {
        match configured {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => self.base_dir.join(path),
            None => self.journal_file(),
        }
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), JournalError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| JournalError::Io(format!("Failed to create base directory: {}", e)))
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, JournalError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                JournalError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join(APP_DIR_NAME))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, JournalError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| JournalError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join(APP_DIR_NAME))
}
