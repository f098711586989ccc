//! Interactive menu session
//!
//! A numbered menu driven by line input: show the balance, add an entry, list
//! all entries, or search and then edit one of the matches. Invalid answers
//! are asked again; typing `cancel` abandons the current flow.

use std::io::{BufRead, Write};

use crate::display::{format_balance, format_entry_list, format_search_results};
use crate::error::{JournalError, JournalResult};
use crate::models::{parse_amount, Entry, EntryPatch};
use crate::services::JournalService;
use crate::storage::{EntryFilter, EntryHandle, Storage};

use super::input::{parse_category, parse_date, parse_index, Answer, Prompt, CANCEL_WORD};

/// Extracts the value of an answer or leaves the current flow
macro_rules! value_or_return {
    ($session:expr, $answer:expr) => {
        match $answer {
            Answer::Value(value) => value,
            Answer::Skip | Answer::Cancel => {
                writeln!($session.prompt.out(), "Cancelled.")?;
                return Ok(());
            }
        }
    };
}

/// Interactive session over a journal
pub struct Session<'a, R, W> {
    storage: &'a mut Storage,
    prompt: Prompt<R, W>,
    date_format: String,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(storage: &'a mut Storage, input: R, output: W, date_format: impl Into<String>) -> Self {
        Self {
            storage,
            prompt: Prompt::new(input, output),
            date_format: date_format.into(),
        }
    }

    /// Run the menu loop until the user exits or input ends
    pub fn run(&mut self) -> JournalResult<()> {
        loop {
            self.print_menu()?;

            let choice = match self.prompt.ask("Choose an action: ")? {
                Some(choice) => choice,
                None => {
                    writeln!(self.prompt.out())?;
                    return Ok(());
                }
            };

            let result = match choice.trim() {
                "1" => self.show_balance(),
                "2" => self.add_entry(),
                "3" => self.list_entries(),
                "4" => self.search_and_edit(),
                "5" => {
                    writeln!(self.prompt.out(), "Goodbye.")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.prompt.out(), "Unknown option. Please choose 1-5.")?;
                    Ok(())
                }
            };

            if let Err(e) = result {
                self.report(e)?;
            }
        }
    }

    /// Show recoverable errors and keep going; anything else ends the session
    fn report(&mut self, err: JournalError) -> JournalResult<()> {
        match err {
            JournalError::Io(_) | JournalError::Json(_) | JournalError::Config(_) => Err(err),
            other => {
                writeln!(self.prompt.out(), "Error: {}", other)?;
                Ok(())
            }
        }
    }

    fn print_menu(&mut self) -> JournalResult<()> {
        let out = self.prompt.out();
        writeln!(out)?;
        writeln!(out, "1. Show balance")?;
        writeln!(out, "2. Add entry")?;
        writeln!(out, "3. List all entries")?;
        writeln!(out, "4. Search and edit entries")?;
        writeln!(out, "5. Exit")?;
        Ok(())
    }

    fn service(&mut self) -> JournalService<'_> {
        JournalService::new(self.storage)
    }

    fn show_balance(&mut self) -> JournalResult<()> {
        let summary = self.service().summary()?;
        write!(self.prompt.out(), "\n{}", format_balance(&summary))?;
        Ok(())
    }

    fn list_entries(&mut self) -> JournalResult<()> {
        let table = format_entry_list(self.storage.journal.entries(), &self.date_format);
        write!(self.prompt.out(), "\n{}", table)?;
        Ok(())
    }

    fn add_entry(&mut self) -> JournalResult<()> {
        let hint = format!(" (or '{}')", CANCEL_WORD);

        let date = value_or_return!(
            self,
            self.prompt
                .ask_parsed(&format!("Date (YYYY-MM-DD){}: ", hint), false, parse_date)?
        );
        let category = value_or_return!(
            self,
            self.prompt.ask_parsed(
                &format!("Category (income/expense){}: ", hint),
                false,
                parse_category
            )?
        );
        let amount = value_or_return!(
            self,
            self.prompt
                .ask_parsed(&format!("Amount{}: ", hint), false, parse_amount)?
        );
        let description = value_or_return!(self, self.prompt.ask_text("Description: ", false)?);

        let entry = Entry::new(date, category, amount, description)?;
        self.service().add(entry)?;
        writeln!(self.prompt.out(), "Entry added.")?;
        self.print_warnings()
    }

    fn search_and_edit(&mut self) -> JournalResult<()> {
        let mut filter = EntryFilter::new();
        let keep = "leave empty to match any";

        match self
            .prompt
            .ask_parsed(&format!("Date (YYYY-MM-DD, {}): ", keep), true, parse_date)?
        {
            Answer::Value(date) => filter = filter.date(date),
            Answer::Skip => {}
            Answer::Cancel => return Ok(()),
        }
        match self
            .prompt
            .ask_parsed(&format!("Category (income/expense, {}): ", keep), true, parse_category)?
        {
            Answer::Value(category) => filter = filter.category(category),
            Answer::Skip => {}
            Answer::Cancel => return Ok(()),
        }
        match self
            .prompt
            .ask_parsed(&format!("Amount ({}): ", keep), true, parse_amount)?
        {
            Answer::Value(amount) => filter = filter.amount(amount),
            Answer::Skip => {}
            Answer::Cancel => return Ok(()),
        }

        let (handles, table): (Vec<EntryHandle>, String) = {
            let hits = self.storage.journal.search(&filter);
            (
                hits.iter().map(|hit| hit.handle).collect(),
                format_search_results(&hits, &self.date_format),
            )
        };
        write!(self.prompt.out(), "\n{}", table)?;

        if handles.is_empty() {
            return Ok(());
        }

        loop {
            writeln!(self.prompt.out(), "\n1. Edit an entry\n2. Back")?;
            match self.prompt.ask("Choose an action: ")?.as_deref().map(str::trim) {
                Some("1") => return self.edit_entry(&handles),
                Some("2") | None => return Ok(()),
                Some(_) => writeln!(self.prompt.out(), "Unknown option. Please choose 1 or 2.")?,
            }
        }
    }

    fn edit_entry(&mut self, handles: &[EntryHandle]) -> JournalResult<()> {
        let count = handles.len();
        let index = value_or_return!(
            self,
            self.prompt
                .ask_parsed("Row number to edit: ", false, |s| parse_index(s, count))?
        );
        let handle = handles[index];

        let current = self.storage.journal.get(handle)?.to_string();
        writeln!(self.prompt.out(), "Editing: {}", current)?;

        let keep = "leave empty to keep";
        let mut patch = EntryPatch::new();

        match self
            .prompt
            .ask_parsed(&format!("New date ({}): ", keep), true, parse_date)?
        {
            Answer::Value(date) => patch = patch.date(date),
            Answer::Skip => {}
            Answer::Cancel => return self.edit_cancelled(),
        }
        match self
            .prompt
            .ask_parsed(&format!("New category ({}): ", keep), true, parse_category)?
        {
            Answer::Value(category) => patch = patch.category(category),
            Answer::Skip => {}
            Answer::Cancel => return self.edit_cancelled(),
        }
        match self
            .prompt
            .ask_parsed(&format!("New amount ({}): ", keep), true, parse_amount)?
        {
            Answer::Value(amount) => patch = patch.amount(amount),
            Answer::Skip => {}
            Answer::Cancel => return self.edit_cancelled(),
        }
        match self
            .prompt
            .ask_text(&format!("New description ({}): ", keep), true)?
        {
            Answer::Value(description) => patch = patch.description(description),
            Answer::Skip => {}
            Answer::Cancel => return self.edit_cancelled(),
        }

        self.service().update(handle, &patch)?;
        writeln!(self.prompt.out(), "Changes saved.")?;
        self.print_warnings()
    }

    fn print_warnings(&mut self) -> JournalResult<()> {
        for warning in self.storage.take_warnings() {
            writeln!(self.prompt.out(), "Warning: {}", warning)?;
        }
        Ok(())
    }

    fn edit_cancelled(&mut self) -> JournalResult<()> {
        writeln!(self.prompt.out(), "Edit cancelled, nothing was saved.")?;
        Ok(())
    }
}
