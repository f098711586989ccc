//! Input parsing and prompting
//!
//! Turns raw user text into typed values before anything reaches the journal,
//! and drives question/answer prompts over any reader/writer pair.

use std::io::{BufRead, Write};

use chrono::NaiveDate;

use crate::error::{JournalError, JournalResult};
pub use crate::models::parse_amount;
use crate::models::Category;

/// Word that aborts a prompt flow
pub const CANCEL_WORD: &str = "cancel";

/// Parse a date in strict `YYYY-MM-DD` form
pub fn parse_date(input: &str) -> JournalResult<NaiveDate> {
    let input = input.trim();
    let shape_ok = input.len() == 10
        && input.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });

    if !shape_ok {
        return Err(JournalError::Validation(format!(
            "Invalid date '{}': expected YYYY-MM-DD",
            input
        )));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| JournalError::Validation(format!("Invalid date '{}': no such day", input)))
}

/// Parse a category name, case-insensitively
pub fn parse_category(input: &str) -> JournalResult<Category> {
    input.parse()
}

/// Parse a 1-based row number into a 0-based index below `len`
pub fn parse_index(input: &str, len: usize) -> JournalResult<usize> {
    let n: usize = input.trim().parse().map_err(|_| {
        JournalError::Validation(format!("'{}' is not a row number", input.trim()))
    })?;

    if n == 0 || n > len {
        return Err(JournalError::Validation(format!(
            "Row {} does not exist; choose 1 to {}",
            n, len
        )));
    }

    Ok(n - 1)
}

/// Outcome of asking for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer<T> {
    Value(T),
    /// Empty input on an optional field
    Skip,
    /// The user typed the cancel word or input ended
    Cancel,
}

/// Line-based prompter over a reader and a writer
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Access the output stream
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print a question and read one line; `None` at end of input
    pub fn ask(&mut self, question: &str) -> JournalResult<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask until the answer parses, the field is skipped or the flow is cancelled
    pub fn ask_parsed<T, F>(
        &mut self,
        question: &str,
        optional: bool,
        parse: F,
    ) -> JournalResult<Answer<T>>
    where
        F: Fn(&str) -> JournalResult<T>,
    {
        loop {
            let line = match self.ask(question)? {
                Some(line) => line,
                None => return Ok(Answer::Cancel),
            };
            let trimmed = line.trim();

            if trimmed.eq_ignore_ascii_case(CANCEL_WORD) {
                return Ok(Answer::Cancel);
            }
            if trimmed.is_empty() && optional {
                return Ok(Answer::Skip);
            }

            match parse(trimmed) {
                Ok(value) => return Ok(Answer::Value(value)),
                Err(e) => writeln!(self.output, "{} Try again.", e)?,
            }
        }
    }

    /// Ask for free text; empty input is `Skip` when `optional`
    pub fn ask_text(&mut self, question: &str, optional: bool) -> JournalResult<Answer<String>> {
        match self.ask(question)? {
            None => Ok(Answer::Cancel),
            Some(line) if optional && line.trim().is_empty() => Ok(Answer::Skip),
            Some(line) => Ok(Answer::Value(line)),
        }
    }
}
