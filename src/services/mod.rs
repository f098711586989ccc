//! Business logic layer
//!
//! Services sit between the CLI and storage: they run the journal operations
//! and record each change in the audit log.

pub mod journal;

pub use journal::{BalanceSummary, JournalService};
