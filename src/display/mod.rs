//! Display formatting for terminal output
//!
//! Read-only views over entries and balance figures.

pub mod entry;

pub use entry::{format_balance, format_entry_list, format_search_results};
