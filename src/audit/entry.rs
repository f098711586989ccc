//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Entry;

use super::diff::generate_diff;

/// Types of changes that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Entry was added
    Create,
    /// Entry was edited
    Update,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
        }
    }
}

/// A single audit log record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the change happened (UTC)
    pub timestamp: DateTime<Utc>,

    /// What kind of change it was
    pub operation: Operation,

    /// 1-based position of the entry in the journal at the time of the change
    pub position: usize,

    /// Short label, e.g. "2024-01-10 groceries"
    pub label: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Human-readable list of changed fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    /// Record an added entry
    pub fn create(position: usize, entry: &Entry) -> Self {
        Self {
            timestamp: Utc::now(),
            operation: Operation::Create,
            position,
            label: label(entry),
            before: None,
            after: serde_json::to_value(entry).ok(),
            diff_summary: None,
        }
    }

    /// Record an edited entry
    pub fn update(position: usize, before: &Entry, after: &Entry) -> Self {
        let before = serde_json::to_value(before).ok();
        let after_value = serde_json::to_value(after).ok();
        let diff_summary = match (&before, &after_value) {
            (Some(b), Some(a)) => generate_diff(b, a),
            _ => None,
        };

        Self {
            timestamp: Utc::now(),
            operation: Operation::Update,
            position,
            label: label(after),
            before,
            after: after_value,
            diff_summary,
        }
    }

    /// Format the record for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} #{} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.position,
            self.label
        );

        if let Some(diff) = &self.diff_summary {
            output.push_str(&format!("\n  Changes: {}", diff));
        }

        output
    }
}

fn label(entry: &Entry) -> String {
    format!("{} {}", entry.date.format("%Y-%m-%d"), entry.description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, EntryPatch};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn groceries() -> Entry {
        Entry::new(
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            Category::Expense,
            Decimal::new(200, 0),
            "groceries",
        )
        .unwrap()
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Update.to_string(), "UPDATE");
    }

    #[test]
    fn test_create_entry() {
        let record = AuditEntry::create(2, &groceries());

        assert_eq!(record.operation, Operation::Create);
        assert_eq!(record.position, 2);
        assert_eq!(record.label, "2024-01-10 groceries");
        assert!(record.before.is_none());
        assert_eq!(record.after.unwrap()["category"], "expense");
    }

    #[test]
    fn test_update_entry_has_diff() {
        let before = groceries();
        let mut after = before.clone();
        after
            .apply(&EntryPatch::new().amount(Decimal::new(250, 0)))
            .unwrap();

        let record = AuditEntry::update(1, &before, &after);
        assert_eq!(record.operation, Operation::Update);
        assert!(record.before.is_some());
        assert_eq!(record.diff_summary.as_deref(), Some("amount: 200 -> 250"));
    }

    #[test]
    fn test_serialization() {
        let record = AuditEntry::create(1, &groceries());
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("\"before\""));

        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.operation, Operation::Create);
        assert_eq!(deserialized.position, 1);
    }

    #[test]
    fn test_human_readable_format() {
        let before = groceries();
        let mut after = before.clone();
        after.apply(&EntryPatch::new().description("market")).unwrap();

        let formatted = AuditEntry::update(3, &before, &after).format_human_readable();
        assert!(formatted.contains("UPDATE #3 (2024-01-10 market)"));
        assert!(formatted.contains("Changes: description: groceries -> market"));
    }
}
