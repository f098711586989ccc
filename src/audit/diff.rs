//! Diff generation for audit logging

use serde_json::Value;

/// Describe the fields that differ between two serialized entries
///
/// Both values are objects with the same keys. Returns `None` when nothing
/// changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let (Value::Object(before), Value::Object(after)) = (before, after) else {
        return None;
    };

    let changes: Vec<String> = before
        .iter()
        .filter_map(|(key, old)| {
            let new = after.get(key).filter(|new| *new != old)?;
            Some(format!("{}: {} -> {}", key, format_value(old), format_value(new)))
        })
        .collect();

    (!changes.is_empty()).then(|| changes.join(", "))
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.is_empty() => "(empty)".to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("{}...", head)
        }
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
