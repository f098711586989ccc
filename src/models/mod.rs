//! Core data models for the finance journal
//!
//! An entry is one dated income or expense record; a patch is a sparse
//! update applied to an existing entry.

pub mod category;
pub mod entry;

pub use category::Category;
pub use entry::{parse_amount, Entry, EntryPatch};
