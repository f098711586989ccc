//! Append-only audit log writer and reader
//!
//! Each record is a single JSON line, synced to disk as it is appended.

use std::path::PathBuf;

use crate::error::{JournalError, JournalResult};
use crate::storage::{append_line, read_lines};

use super::entry::AuditEntry;

/// Handles writing audit records to the audit log file
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one record to the log
    pub fn log(&self, entry: &AuditEntry) -> JournalResult<()> {
        append_line(&self.log_path, &serde_json::to_string(entry)?)
    }

    /// Read all records, oldest first; a missing log reads as empty
    pub fn read_all(&self) -> JournalResult<Vec<AuditEntry>> {
        read_lines(&self.log_path)?
            .unwrap_or_default()
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|e| {
                    JournalError::Json(format!("Bad audit record at line {}: {}", i + 1, e))
                })
            })
            .collect()
    }

    /// The most recent `count` records, oldest first
    pub fn read_recent(&self, count: usize) -> JournalResult<Vec<AuditEntry>> {
        let mut records = self.read_all()?;
        let start = records.len().saturating_sub(count);
        Ok(records.split_off(start))
    }
}
