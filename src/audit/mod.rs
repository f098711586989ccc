//! Audit trail for journal changes
//!
//! Every entry that is added or edited through the journal service is
//! recorded in an append-only log, one JSON object per line (JSONL), with the
//! entry's state before and after the change.
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_journal::audit::{AuditEntry, AuditLogger};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(1, &entry))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
