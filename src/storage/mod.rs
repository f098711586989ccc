//! Storage layer for the finance journal
//!
//! The journal is a flat text file with one entry per line. The repository
//! holds the entries in memory and rewrites the whole file on every change.

pub mod file_io;
pub mod journal;
pub mod query;
pub mod record;

pub use file_io::{append_line, read_lines, write_lines, WriteMode};
pub use journal::JournalRepository;
pub use query::{EntryFilter, EntryHandle, SearchHit};

use std::path::PathBuf;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{paths::JournalPaths, settings::Settings};
use crate::error::JournalError;

/// Storage coordinator: the journal repository plus the audit log
pub struct Storage {
    pub journal: JournalRepository,
    audit: Option<AuditLogger>,
    warnings: Vec<String>,
}

impl Storage {
    /// Open the journal described by `settings`, or `journal_file` if given
    pub fn open(
        paths: JournalPaths,
        settings: &Settings,
        journal_file: Option<PathBuf>,
    ) -> Result<Self, JournalError> {
        paths.ensure_directories()?;

        let journal_path = match journal_file {
            Some(path) => path,
            None => paths.resolve_journal_file(settings.journal_file.as_deref()),
        };

        let journal = JournalRepository::open(journal_path)?.with_write_mode(settings.write_mode());
        let audit = settings
            .audit_enabled
            .then(|| AuditLogger::new(paths.audit_log()));

        Ok(Self {
            journal,
            audit,
            warnings: Vec::new(),
        })
    }

    /// The audit logger, if auditing is enabled
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Append a record to the audit log; a no-op when auditing is disabled
    ///
    /// Called after the journal change is on disk. A failed append does not
    /// undo that change; it is queued for [`Storage::take_warnings`].
    pub fn log_audit(&mut self, entry: &AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(entry) {
                self.warnings
                    .push(format!("change saved but not recorded in the audit log: {}", e));
            }
        }
    }

    /// Drain warnings collected since the last call
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}
