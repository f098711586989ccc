//! Entry CLI commands
//!
//! One-shot commands over the journal: balance, add, list, search and edit.
//! Edits address an entry by its row in the search with the same filters.

use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::display::{format_balance, format_entry_list, format_search_results};
use crate::error::{JournalError, JournalResult};
use crate::models::{parse_amount, Entry, EntryPatch};
use crate::services::JournalService;
use crate::storage::{EntryFilter, Storage};

use super::input::{parse_category, parse_date, parse_index};

/// Optional search filters, combined with AND
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only entries of this category (income or expense)
    #[arg(short, long)]
    pub category: Option<String>,
    /// Only entries on this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,
    /// Only entries with exactly this amount
    #[arg(short, long, allow_hyphen_values = true)]
    pub amount: Option<String>,
}

impl FilterArgs {
    /// Validate the raw flags into a filter
    pub fn to_filter(&self) -> JournalResult<EntryFilter> {
        let mut filter = EntryFilter::new();
        if let Some(category) = &self.category {
            filter = filter.category(parse_category(category)?);
        }
        if let Some(date) = &self.date {
            filter = filter.date(parse_date(date)?);
        }
        if let Some(amount) = &self.amount {
            filter = filter.amount(parse_amount(amount)?);
        }
        Ok(filter)
    }
}

/// Entry subcommands
#[derive(Subcommand)]
pub enum EntryCommands {
    /// Show the balance with income and expense totals
    Balance,
    /// Add a new entry
    Add {
        /// Entry date (YYYY-MM-DD)
        date: String,
        /// income or expense
        category: String,
        /// Amount, e.g. 1500 or 12.75
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Free-form description
        #[arg(default_value = "")]
        description: String,
    },
    /// List all entries
    List,
    /// Search entries by category, date and amount
    Search {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Edit one entry of a search result
    Edit {
        /// Row number in the search result (starting at 1)
        row: String,
        #[command(flatten)]
        filter: FilterArgs,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        new_date: Option<String>,
        /// New category
        #[arg(long)]
        new_category: Option<String>,
        /// New amount
        #[arg(long, allow_hyphen_values = true)]
        new_amount: Option<String>,
        /// New description
        #[arg(long)]
        new_description: Option<String>,
    },
}

/// Handle an entry command
pub fn handle_entry_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: EntryCommands,
) -> JournalResult<()> {
    let date_format = settings.date_format.as_str();
    let mut service = JournalService::new(storage);

    match cmd {
        EntryCommands::Balance => {
            print!("{}", format_balance(&service.summary()?));
        }
        EntryCommands::Add {
            date,
            category,
            amount,
            description,
        } => {
            let entry = Entry::new(
                parse_date(&date)?,
                parse_category(&category)?,
                parse_amount(&amount)?,
                description,
            )?;
            let handle = service.add(entry)?;
            println!("Added entry #{}.", handle.index() + 1);
        }
        EntryCommands::List => {
            print!("{}", format_entry_list(service.list(), date_format));
        }
        EntryCommands::Search { filter } => {
            let filter = filter.to_filter()?;
            print!("{}", format_search_results(&service.search(&filter), date_format));
        }
        EntryCommands::Edit {
            row,
            filter,
            new_date,
            new_category,
            new_amount,
            new_description,
        } => {
            let mut patch = EntryPatch::new();
            if let Some(date) = new_date {
                patch = patch.date(parse_date(&date)?);
            }
            if let Some(category) = new_category {
                patch = patch.category(parse_category(&category)?);
            }
            if let Some(amount) = new_amount {
                patch = patch.amount(parse_amount(&amount)?);
            }
            if let Some(description) = new_description {
                patch = patch.description(description);
            }
            if patch.is_empty() {
                return Err(JournalError::Validation(
                    "Nothing to change: pass at least one --new-* option".into(),
                ));
            }

            let filter = filter.to_filter()?;
            let handles: Vec<_> = service.search(&filter).iter().map(|hit| hit.handle).collect();
            if handles.is_empty() {
                return Err(JournalError::entry_not_found(format!("row {}", row)));
            }
            let handle = handles[parse_index(&row, handles.len())?];

            let updated = service.update(handle, &patch)?;
            println!("Updated entry #{}: {}", handle.index() + 1, updated);
        }
    }

    for warning in storage.take_warnings() {
        eprintln!("Warning: {}", warning);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JournalPaths;
    use crate::models::Category;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = JournalPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, &Settings::default(), None).unwrap();
        (temp_dir, storage)
    }

    fn add(storage: &mut Storage, date: &str, category: &str, amount: &str, description: &str) {
        handle_entry_command(
            storage,
            &Settings::default(),
            EntryCommands::Add {
                date: date.into(),
                category: category.into(),
                amount: amount.into(),
                description: description.into(),
            },
        )
        .unwrap();
    }

    #[test]
    fn test_filter_args() {
        let args = FilterArgs {
            category: Some("Expense".into()),
            date: None,
            amount: Some("-5".into()),
        };
        let filter = args.to_filter().unwrap();
        assert_eq!(filter.category, Some(Category::Expense));
        assert_eq!(filter.amount, Some(Decimal::new(-5, 0)));
        assert!(filter.date.is_none());

        let bad = FilterArgs {
            date: Some("yesterday".into()),
            ..FilterArgs::default()
        };
        assert!(bad.to_filter().unwrap_err().is_validation());
    }

    #[test]
    fn test_add_validates_input() {
        let (_temp_dir, mut storage) = create_test_storage();
        let result = handle_entry_command(
            &mut storage,
            &Settings::default(),
            EntryCommands::Add {
                date: "2024-01-05".into(),
                category: "gift".into(),
                amount: "10".into(),
                description: String::new(),
            },
        );
        assert!(result.unwrap_err().is_validation());
        assert!(storage.journal.is_empty());
    }

    #[test]
    fn test_edit_by_search_row() {
        let (_temp_dir, mut storage) = create_test_storage();
        add(&mut storage, "2024-01-05", "income", "1500", "salary");
        add(&mut storage, "2024-01-10", "expense", "200", "groceries");
        add(&mut storage, "2024-01-11", "expense", "30", "taxi");

        handle_entry_command(
            &mut storage,
            &Settings::default(),
            EntryCommands::Edit {
                row: "2".into(),
                filter: FilterArgs {
                    category: Some("expense".into()),
                    ..FilterArgs::default()
                },
                new_date: None,
                new_category: None,
                new_amount: Some("35".into()),
                new_description: None,
            },
        )
        .unwrap();

        let taxi = &storage.journal.entries()[2];
        assert_eq!(taxi.description, "taxi");
        assert_eq!(taxi.amount, Decimal::new(35, 0));
        assert_eq!(storage.journal.entries()[1].amount, Decimal::new(200, 0));
    }

    #[test]
    fn test_edit_requires_changes_and_valid_row() {
        let (_temp_dir, mut storage) = create_test_storage();
        add(&mut storage, "2024-01-05", "income", "1500", "salary");

        let no_changes = handle_entry_command(
            &mut storage,
            &Settings::default(),
            EntryCommands::Edit {
                row: "1".into(),
                filter: FilterArgs::default(),
                new_date: None,
                new_category: None,
                new_amount: None,
                new_description: None,
            },
        );
        assert!(no_changes.unwrap_err().is_validation());

        let bad_row = handle_entry_command(
            &mut storage,
            &Settings::default(),
            EntryCommands::Edit {
                row: "3".into(),
                filter: FilterArgs::default(),
                new_date: None,
                new_category: None,
                new_amount: None,
                new_description: Some("bonus".into()),
            },
        );
        assert!(bad_row.unwrap_err().is_validation());
        assert_eq!(storage.journal.entries()[0].description, "salary");
    }
}
