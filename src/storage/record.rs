//! Line format of the journal file
//!
//! One entry per line: `YYYY-MM-DD,<category>,<amount>,<description>`.
//! There is no quoting. The first three fields are positional and everything
//! after the third comma belongs to the description, so descriptions may
//! contain commas but never line breaks.

use chrono::NaiveDate;

use crate::error::{JournalError, JournalResult};
use crate::models::{parse_amount, Category, Entry};

/// Date format used in the journal file
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DELIMITER: char = ',';

/// Serialize an entry to its single-line form
pub fn format_record(entry: &Entry) -> String {
    format!(
        "{}{d}{}{d}{}{d}{}",
        entry.date.format(DATE_FORMAT),
        entry.category,
        entry.amount,
        entry.description,
        d = DELIMITER
    )
}

/// Parse one line of the journal file; `line_num` is 1-based and only used in errors
pub fn parse_record(line: &str, line_num: usize) -> JournalResult<Entry> {
    let line = line.trim_end_matches(['\r', '\n']);
    let fields: Vec<&str> = line.splitn(4, DELIMITER).collect();

    if fields.len() != 4 {
        return Err(JournalError::malformed(
            line_num,
            format!("expected 4 fields, found {}", fields.len()),
        ));
    }

    let date = NaiveDate::parse_from_str(fields[0].trim(), DATE_FORMAT).map_err(|e| {
        JournalError::malformed(line_num, format!("invalid date '{}': {}", fields[0], e))
    })?;

    let category: Category = fields[1]
        .parse()
        .map_err(|e: JournalError| JournalError::malformed(line_num, e.to_string()))?;

    let amount = parse_amount(fields[2])
        .map_err(|e| JournalError::malformed(line_num, e.to_string()))?;

    Entry::new(date, category, amount, fields[3])
        .map_err(|e| JournalError::malformed(line_num, e.to_string()))
}
