//! Journal service
//!
//! Adds, lists, searches and edits entries, and keeps the audit trail in
//! step with every change that reaches the journal file.

use rust_decimal::Decimal;

use crate::audit::AuditEntry;
use crate::error::JournalResult;
use crate::models::{Entry, EntryPatch};
use crate::storage::{EntryFilter, EntryHandle, SearchHit, Storage};

/// Income, expense and balance figures for the whole journal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceSummary {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

/// Service for journal management
pub struct JournalService<'a> {
    storage: &'a mut Storage,
}

impl<'a> JournalService<'a> {
    /// Create a new journal service
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Add an entry and persist it
    ///
    /// Once the journal is written the add succeeds; an audit failure only
    /// leaves a warning on the storage.
    pub fn add(&mut self, entry: Entry) -> JournalResult<EntryHandle> {
        let handle = self.storage.journal.add_entry(entry)?;

        let record = AuditEntry::create(handle.index() + 1, self.storage.journal.get(handle)?);
        self.storage.log_audit(&record);

        Ok(handle)
    }

    /// Apply a sparse update to a previously searched entry and persist it
    ///
    /// Returns the entry as stored after the update.
    pub fn update(&mut self, handle: EntryHandle, patch: &EntryPatch) -> JournalResult<Entry> {
        let before = self.storage.journal.get(handle)?.clone();
        let after = self.storage.journal.update(handle, patch)?.clone();

        if before != after {
            self.storage
                .log_audit(&AuditEntry::update(handle.index() + 1, &before, &after));
        }

        Ok(after)
    }

    /// All entries in insertion order
    pub fn list(&self) -> &[Entry] {
        self.storage.journal.entries()
    }

    /// Entries matching the filter, in insertion order
    pub fn search(&self, filter: &EntryFilter) -> Vec<SearchHit<'_>> {
        self.storage.journal.search(filter)
    }

    /// Income, expense and balance figures
    pub fn summary(&self) -> JournalResult<BalanceSummary> {
        let journal = &self.storage.journal;
        Ok(BalanceSummary {
            income: journal.income_total()?,
            expense: journal.expense_total()?,
            balance: journal.balance()?,
        })
    }
}
