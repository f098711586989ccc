//! Finance journal - a personal income and expense ledger for the terminal
//!
//! Entries (date, category, amount, description) are kept in a plain text
//! file, one per line, and loaded into memory for balance computation,
//! listing, filtered search and in-place editing.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Entry, category and sparse-update types
//! - `storage`: Journal file storage and the search engine
//! - `services`: Business logic layer with audit logging
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers, input validation and the interactive menu
//!
//! # Example
//!
//! ```rust,no_run
//! use finance_journal::models::{Category, Entry};
//! use finance_journal::storage::{EntryFilter, JournalRepository};
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! # fn main() -> Result<(), finance_journal::JournalError> {
//! let mut journal = JournalRepository::open("finance_journal.txt")?;
//! let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! journal.add_entry(Entry::new(date, Category::Income, Decimal::new(1500, 0), "salary")?)?;
//!
//! let incomes = journal.search(&EntryFilter::new().category(Category::Income));
//! println!("{} income entries, balance {}", incomes.len(), journal.balance()?);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{JournalError, JournalResult};
