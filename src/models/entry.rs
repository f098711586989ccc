//! Journal entry model
//!
//! An entry is a fixed-shape record: date, category, amount and a free-form
//! description. Entries are always fully populated; construction and patching
//! validate the result and either succeed completely or leave nothing behind.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::Category;
use crate::error::{JournalError, JournalResult};

/// One ledger record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Calendar date of the operation
    pub date: NaiveDate,

    /// Income or expense
    pub category: Category,

    /// Amount as given; the category decides the direction, not the sign
    pub amount: Decimal,

    /// Free-form text, kept on a single line
    pub description: String,
}

impl Entry {
    /// Create a new validated entry
    pub fn new(
        date: NaiveDate,
        category: Category,
        amount: Decimal,
        description: impl Into<String>,
    ) -> JournalResult<Self> {
        let entry = Self {
            date,
            category,
            amount,
            description: description.into(),
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Check the invariants that the storage format relies on
    pub fn validate(&self) -> JournalResult<()> {
        if self.description.contains(['\n', '\r']) {
            return Err(JournalError::Validation(
                "Description must fit on a single line".into(),
            ));
        }
        Ok(())
    }

    /// Amount counted towards income, zero for expenses
    pub fn income(&self) -> Decimal {
        if self.category.is_income() {
            self.amount
        } else {
            Decimal::ZERO
        }
    }

    /// Amount counted towards expenses, zero for income
    pub fn expense(&self) -> Decimal {
        if self.category.is_expense() {
            self.amount
        } else {
            Decimal::ZERO
        }
    }

    /// Apply a sparse update, keeping the entry unchanged if the result is invalid
    pub fn apply(&mut self, patch: &EntryPatch) -> JournalResult<()> {
        let mut updated = self.clone();

        if let Some(date) = patch.date {
            updated.date = date;
        }
        if let Some(category) = patch.category {
            updated.category = category;
        }
        if let Some(amount) = patch.amount {
            updated.amount = amount;
        }
        if let Some(description) = &patch.description {
            updated.description = description.clone();
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.amount,
            self.description
        )
    }
}

/// A sparse update for an existing entry; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub date: Option<NaiveDate>,
    pub category: Option<Category>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
}

impl EntryPatch {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// True when the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.category.is_none()
            && self.amount.is_none()
            && self.description.is_none()
    }
}

/// Parse a decimal amount
///
/// Accepts plain decimals ("1500", "-20.75") and scientific notation
/// ("1.5e3"), which older journal files may contain.
pub fn parse_amount(s: &str) -> JournalResult<Decimal> {
    let s = s.trim();
    match Decimal::from_str_exact(s) {
        Ok(amount) => Ok(amount),
        // Parses, but only after rounding away digits
        Err(_) if Decimal::from_str(s).is_ok() => Err(JournalError::Validation(format!(
            "Amount '{}' has more digits than can be stored exactly (at most 28 decimal places)",
            s
        ))),
        Err(_) => Decimal::from_scientific(s)
            .map_err(|_| JournalError::Validation(format!("Invalid amount: '{}'", s))),
    }
}
