//! Filtered lookup over journal entries
//!
//! Filters are optional per field and combine with AND semantics. Results keep
//! the journal's insertion order and carry an [`EntryHandle`] that can be used
//! to edit the matched entry until the journal changes.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Category, Entry};

/// Optional per-field predicates; an unset field matches any value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryFilter {
    /// Exact category match
    pub category: Option<Category>,
    /// Exact calendar date match
    pub date: Option<NaiveDate>,
    /// Exact numeric match (`1500` equals `1500.00`)
    pub amount: Option<Decimal>,
}

impl EntryFilter {
    /// Create a filter that matches every entry
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by category
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Filter by date
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Filter by amount
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// True if no predicate is set
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.date.is_none() && self.amount.is_none()
    }

    /// Check an entry against every supplied predicate
    pub fn matches(&self, entry: &Entry) -> bool {
        self.category.map_or(true, |c| entry.category == c)
            && self.date.map_or(true, |d| entry.date == d)
            && self.amount.map_or(true, |a| entry.amount == a)
    }
}

/// Reference to an entry, valid only for the journal state it was taken from
///
/// Any add, update or reload bumps the journal generation and invalidates
/// every handle produced earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryHandle {
    pub(crate) index: usize,
    pub(crate) generation: u64,
}

impl EntryHandle {
    /// Position of the entry in the journal (0-based)
    pub fn index(&self) -> usize {
        self.index
    }
}

/// One search result
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub handle: EntryHandle,
    pub entry: &'a Entry,
}

/// Run a filter over entries, producing hits stamped with `generation`
pub fn search<'a>(entries: &'a [Entry], filter: &EntryFilter, generation: u64) -> Vec<SearchHit<'a>> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| filter.matches(entry))
        .map(|(index, entry)| SearchHit {
            handle: EntryHandle { index, generation },
            entry,
        })
        .collect()
}
