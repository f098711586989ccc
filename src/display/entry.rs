//! Entry display formatting
//!
//! Formats journal entries as aligned tables and the balance summary.

use crate::models::Entry;
use crate::services::BalanceSummary;
use crate::storage::SearchHit;

/// Format all entries as a table
pub fn format_entry_list(entries: &[Entry], date_format: &str) -> String {
    if entries.is_empty() {
        return "No entries found.\n".to_string();
    }
    format_table(entries.iter().map(|e| (None, e)), date_format)
}

/// Format search results as a table numbered from 1, for picking a row to edit
pub fn format_search_results(hits: &[SearchHit<'_>], date_format: &str) -> String {
    if hits.is_empty() {
        return "No entries match the given filters.\n".to_string();
    }
    format_table(
        hits.iter().enumerate().map(|(i, hit)| (Some(i + 1), hit.entry)),
        date_format,
    )
}

/// Format the balance together with its income and expense parts
pub fn format_balance(summary: &BalanceSummary) -> String {
    let mut output = String::new();
    output.push_str(&format!("Balance:  {:>12}\n", summary.balance.to_string()));
    output.push_str(&format!("Income:   {:>12}\n", summary.income.to_string()));
    output.push_str(&format!("Expenses: {:>12}\n", summary.expense.to_string()));
    output
}

fn format_table<'a, I>(rows: I, date_format: &str) -> String
where
    I: Iterator<Item = (Option<usize>, &'a Entry)>,
{
    let rows: Vec<(Option<usize>, String, &Entry)> = rows
        .map(|(n, e)| (n, e.date.format(date_format).to_string(), e))
        .collect();
    let numbered = rows.iter().any(|(n, _, _)| n.is_some());

    let date_width = rows.iter().map(|(_, d, _)| d.len()).max().unwrap_or(4).max(4);
    let amount_width = rows
        .iter()
        .map(|(_, _, e)| e.amount.to_string().len())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    if numbered {
        output.push_str(&format!("{:>4}  ", "#"));
    }
    output.push_str(&format!(
        "{:<date_width$}  {:<8}  {:>amount_width$}  {}\n",
        "Date",
        "Category",
        "Amount",
        "Description",
        date_width = date_width,
        amount_width = amount_width,
    ));

    if numbered {
        output.push_str(&format!("{:->4}  ", ""));
    }
    output.push_str(&format!(
        "{:-<date_width$}  {:-<8}  {:->amount_width$}  {:-<11}\n",
        "",
        "",
        "",
        "",
        date_width = date_width,
        amount_width = amount_width,
    ));

    for (number, date, entry) in &rows {
        if let Some(n) = number {
            output.push_str(&format!("{:>4}  ", n));
        }
        output.push_str(&format!(
            "{:<date_width$}  {:<8}  {:>amount_width$}  {}\n",
            date,
            entry.category.as_str(),
            entry.amount.to_string(),
            entry.description,
            date_width = date_width,
            amount_width = amount_width,
        ));
    }

    output
}
