//! Journal repository for line-based storage
//!
//! Owns the ordered list of entries and mirrors it to the journal file. The
//! file is read once on load; every mutation rewrites it completely before
//! returning.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;

use crate::error::{JournalError, JournalResult};
use crate::models::{Entry, EntryPatch};

use super::file_io::{read_lines, write_lines, WriteMode};
use super::query::{self, EntryFilter, EntryHandle, SearchHit};
use super::record::{format_record, parse_record};

/// Repository for journal entries
#[derive(Debug)]
pub struct JournalRepository {
    path: PathBuf,
    write_mode: WriteMode,
    entries: Vec<Entry>,
    /// Bumped on every mutation; handles from older generations are stale
    generation: u64,
}

impl JournalRepository {
    /// Create a repository for `path` without touching the disk
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_mode: WriteMode::default(),
            entries: Vec::new(),
            generation: 0,
        }
    }

    /// Create a repository and load it from `path`
    ///
    /// A missing file yields an empty journal.
    pub fn open(path: impl Into<PathBuf>) -> JournalResult<Self> {
        let mut repo = Self::new(path);
        repo.load()?;
        Ok(repo)
    }

    /// Use a different write strategy for subsequent saves
    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.write_mode = mode;
        self
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load entries from disk, replacing whatever is in memory
    ///
    /// Blank lines are skipped. Any other line that fails to parse aborts the
    /// load and leaves the in-memory entries untouched.
    pub fn load(&mut self) -> JournalResult<()> {
        let lines = read_lines(&self.path)?.unwrap_or_default();

        let entries = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| parse_record(line, i + 1))
            .collect::<JournalResult<Vec<_>>>()?;

        self.entries = entries;
        self.bump();
        Ok(())
    }

    /// Re-read the backing file
    pub fn reload(&mut self) -> JournalResult<()> {
        self.load()
    }

    /// Rewrite the backing file from the in-memory entries
    pub fn save_all(&self) -> JournalResult<()> {
        write_lines(&self.path, self.entries.iter().map(format_record), self.write_mode)
    }

    /// Append an entry and persist the journal
    ///
    /// If the write fails the entry is dropped again and the error returned.
    pub fn add_entry(&mut self, entry: Entry) -> JournalResult<EntryHandle> {
        entry.validate()?;
        self.entries.push(entry);

        if let Err(e) = self.save_all() {
            self.entries.pop();
            return Err(e);
        }

        self.bump();
        Ok(EntryHandle {
            index: self.entries.len() - 1,
            generation: self.generation,
        })
    }

    /// Apply a sparse update to the entry behind `handle` and persist the journal
    ///
    /// Fails with [`JournalError::StaleHandle`] if the journal changed since the
    /// handle was produced. On a failed write the previous entry is restored.
    pub fn update(&mut self, handle: EntryHandle, patch: &EntryPatch) -> JournalResult<&Entry> {
        let index = self.resolve(handle)?;

        let previous = self.entries[index].clone();
        self.entries[index].apply(patch)?;

        if let Err(e) = self.save_all() {
            self.entries[index] = previous;
            return Err(e);
        }

        self.bump();
        Ok(&self.entries[index])
    }

    /// Look up the entry behind a handle
    pub fn get(&self, handle: EntryHandle) -> JournalResult<&Entry> {
        let index = self.resolve(handle)?;
        Ok(&self.entries[index])
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries matching every predicate of `filter`, in insertion order
    pub fn search(&self, filter: &EntryFilter) -> Vec<SearchHit<'_>> {
        query::search(&self.entries, filter, self.generation)
    }

    /// Sum of all income amounts
    pub fn income_total(&self) -> JournalResult<Decimal> {
        checked_total(self.entries.iter().map(Entry::income), "income total")
    }

    /// Sum of all expense amounts
    pub fn expense_total(&self) -> JournalResult<Decimal> {
        checked_total(self.entries.iter().map(Entry::expense), "expense total")
    }

    /// Income total minus expense total
    pub fn balance(&self) -> JournalResult<Decimal> {
        self.income_total()?
            .checked_sub(self.expense_total()?)
            .ok_or_else(|| JournalError::Overflow("balance is out of range".into()))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn resolve(&self, handle: EntryHandle) -> JournalResult<usize> {
        if handle.generation != self.generation {
            return Err(JournalError::StaleHandle);
        }
        if handle.index >= self.entries.len() {
            return Err(JournalError::entry_not_found((handle.index + 1).to_string()));
        }
        Ok(handle.index)
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

fn checked_total(mut amounts: impl Iterator<Item = Decimal>, what: &str) -> JournalResult<Decimal> {
    amounts
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
        .ok_or_else(|| JournalError::Overflow(format!("{} is out of range", what)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, JournalRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("finance_journal.txt");
        let repo = JournalRepository::open(path).unwrap();
        (temp_dir, repo)
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn entry(d: u32, category: Category, amount: i64, description: &str) -> Entry {
        Entry::new(date(1, d), category, Decimal::new(amount, 1), description).unwrap()
    }

    fn add_example_entries(repo: &mut JournalRepository) {
        repo.add_entry(entry(5, Category::Income, 15000, "salary")).unwrap();
        repo.add_entry(entry(10, Category::Expense, 2000, "groceries")).unwrap();
    }

    #[test]
    fn test_empty_load() {
        let (temp_dir, repo) = create_test_repo();
        assert!(repo.is_empty());
        assert_eq!(repo.balance().unwrap(), Decimal::ZERO);
        assert!(!temp_dir.path().join("finance_journal.txt").exists());
    }

    #[test]
    fn test_example_scenario() {
        let (temp_dir, mut repo) = create_test_repo();
        add_example_entries(&mut repo);

        assert_eq!(repo.balance().unwrap(), Decimal::new(1300, 0));
        assert_eq!(repo.income_total().unwrap(), Decimal::new(1500, 0));
        assert_eq!(repo.expense_total().unwrap(), Decimal::new(200, 0));

        let all: Vec<&str> = repo.entries().iter().map(|e| e.description.as_str()).collect();
        assert_eq!(all, vec!["salary", "groceries"]);

        let expenses = repo.search(&EntryFilter::new().category(Category::Expense));
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].entry.description, "groceries");

        let contents = fs::read_to_string(temp_dir.path().join("finance_journal.txt")).unwrap();
        assert_eq!(
            contents,
            "2024-01-05,income,1500.0,salary\n2024-01-10,expense,200.0,groceries\n"
        );
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let (temp_dir, mut repo) = create_test_repo();
        add_example_entries(&mut repo);
        repo.add_entry(entry(12, Category::Expense, 125, "milk, bread")).unwrap();

        let reopened = JournalRepository::open(temp_dir.path().join("finance_journal.txt")).unwrap();
        assert_eq!(reopened.entries(), repo.entries());
    }

    #[test]
    fn test_balance_identity_with_negative_amounts() {
        let (_temp_dir, mut repo) = create_test_repo();
        repo.add_entry(entry(1, Category::Income, -500, "chargeback")).unwrap();
        repo.add_entry(entry(2, Category::Expense, 300, "fee")).unwrap();

        let income = repo.income_total().unwrap();
        let expense = repo.expense_total().unwrap();
        assert_eq!(repo.balance().unwrap(), income - expense);
        assert_eq!(repo.balance().unwrap(), Decimal::new(-80, 0));
    }

    #[test]
    fn test_update_then_reload_shows_change() {
        let (temp_dir, mut repo) = create_test_repo();
        add_example_entries(&mut repo);

        let handle = repo.search(&EntryFilter::new().category(Category::Expense))[0].handle;
        repo.update(handle, &EntryPatch::new().amount(Decimal::new(250, 0)))
            .unwrap();

        let reopened = JournalRepository::open(temp_dir.path().join("finance_journal.txt")).unwrap();
        let groceries = &reopened.entries()[1];
        assert_eq!(groceries.amount, Decimal::new(250, 0));
        assert_eq!(groceries.description, "groceries");
        assert_eq!(groceries.date, date(1, 10));
        assert_eq!(groceries.category, Category::Expense);
    }

    #[test]
    fn test_handle_goes_stale_after_add() {
        let (_temp_dir, mut repo) = create_test_repo();
        add_example_entries(&mut repo);

        let handle = repo.search(&EntryFilter::new())[0].handle;
        repo.add_entry(entry(15, Category::Expense, 10, "coffee")).unwrap();

        let err = repo
            .update(handle, &EntryPatch::new().description("changed"))
            .unwrap_err();
        assert!(matches!(err, JournalError::StaleHandle));
        assert_eq!(repo.entries()[0].description, "salary");
    }

    #[test]
    fn test_handle_goes_stale_after_update_and_reload() {
        let (_temp_dir, mut repo) = create_test_repo();
        add_example_entries(&mut repo);

        let hits: Vec<EntryHandle> = repo.search(&EntryFilter::new()).iter().map(|h| h.handle).collect();
        repo.update(hits[0], &EntryPatch::new().description("wage")).unwrap();
        assert!(matches!(repo.get(hits[1]), Err(JournalError::StaleHandle)));

        let fresh = repo.search(&EntryFilter::new())[1].handle;
        repo.reload().unwrap();
        assert!(matches!(repo.get(fresh), Err(JournalError::StaleHandle)));
    }

    #[test]
    fn test_add_returns_usable_handle() {
        let (_temp_dir, mut repo) = create_test_repo();
        let handle = repo.add_entry(entry(5, Category::Income, 10, "tip")).unwrap();
        assert_eq!(handle.index(), 0);
        assert_eq!(repo.get(handle).unwrap().description, "tip");
    }

    #[test]
    fn test_invalid_patch_leaves_entry_and_handle_intact() {
        let (_temp_dir, mut repo) = create_test_repo();
        add_example_entries(&mut repo);

        let handle = repo.search(&EntryFilter::new())[0].handle;
        let err = repo
            .update(handle, &EntryPatch::new().description("a\nb"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(repo.get(handle).unwrap().description, "salary");
    }

    #[test]
    fn test_malformed_line_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("finance_journal.txt");
        fs::write(&path, "2024-01-05,income,1500,salary\nnot a record\n").unwrap();

        let err = JournalRepository::open(&path).unwrap_err();
        assert!(matches!(err, JournalError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("finance_journal.txt");
        fs::write(&path, "2024-01-05,Income,1500,salary\n\n2024-01-06,expense,5,tea\n").unwrap();

        let repo = JournalRepository::open(&path).unwrap();
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.entries()[0].category, Category::Income);
    }

    #[test]
    fn test_failed_save_rolls_back_add() {
        let temp_dir = TempDir::new().unwrap();
        // The journal path is an existing directory, so every write fails
        let path = temp_dir.path().join("journal_dir");
        fs::create_dir(&path).unwrap();

        let mut repo = JournalRepository::new(&path).with_write_mode(WriteMode::InPlace);
        let result = repo.add_entry(entry(5, Category::Income, 10, "tip"));

        assert!(result.is_err());
        assert!(repo.is_empty());
    }

    #[test]
    fn test_failed_save_rolls_back_update() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("finance_journal.txt");
        let mut repo = JournalRepository::open(&path)
            .unwrap()
            .with_write_mode(WriteMode::InPlace);
        add_example_entries(&mut repo);

        let handle = repo.search(&EntryFilter::new().category(Category::Expense))[0].handle;
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        let result = repo.update(handle, &EntryPatch::new().amount(Decimal::new(250, 0)));
        assert!(matches!(result, Err(JournalError::Storage(_))));

        let groceries = repo.get(handle).unwrap();
        assert_eq!(groceries.amount, Decimal::new(200, 0));
        assert_eq!(groceries.description, "groceries");
        assert_eq!(repo.expense_total().unwrap(), Decimal::new(200, 0));
    }

    #[test]
    fn test_totals_report_overflow() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("finance_journal.txt");
        fs::write(
            &path,
            "2024-01-05,income,50000000000000000000000000000,a\n\
             2024-01-06,income,50000000000000000000000000000,b\n",
        )
        .unwrap();

        let repo = JournalRepository::open(&path).unwrap();
        assert_eq!(repo.len(), 2);
        assert!(matches!(repo.income_total(), Err(JournalError::Overflow(_))));
        assert!(matches!(repo.balance(), Err(JournalError::Overflow(_))));
        assert_eq!(repo.expense_total().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_balance_overflow_with_opposite_totals() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("finance_journal.txt");
        fs::write(
            &path,
            "2024-01-05,income,70000000000000000000000000000,a\n\
             2024-01-06,expense,-70000000000000000000000000000,b\n",
        )
        .unwrap();

        let repo = JournalRepository::open(&path).unwrap();
        assert!(repo.income_total().is_ok());
        assert!(repo.expense_total().is_ok());
        let err = repo.balance().unwrap_err();
        assert_eq!(err.to_string(), "Arithmetic overflow: balance is out of range");
    }

    #[test]
    fn test_in_place_mode_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("finance_journal.txt");

        let mut repo = JournalRepository::open(&path)
            .unwrap()
            .with_write_mode(WriteMode::InPlace);
        add_example_entries(&mut repo);

        let reopened = JournalRepository::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
    }
}
