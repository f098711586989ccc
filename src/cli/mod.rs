//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod entry;
pub mod input;
pub mod interactive;

pub use entry::{handle_entry_command, EntryCommands, FilterArgs};
pub use interactive::Session;
