pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Row collections a report may carry, in the order a reader wants them.
pub(crate) const ROW_KEYS: [&str; 3] = ["periods", "net_worth", "comparisons"];

/// The first array of objects under one of `ROW_KEYS`, if any.
pub(crate) fn primary_rows(result: &Value) -> Option<(&'static str, &Vec<Value>)> {
    ROW_KEYS.iter().find_map(|key| match result.get(*key) {
        Some(Value::Array(rows)) if rows.iter().all(Value::is_object) => Some((*key, rows)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primary_rows_prefers_periods() {
        let v = json!({ "net_worth": [{ "year": 1 }], "periods": [{ "month": 1 }] });
        let (key, rows) = primary_rows(&v).unwrap();
        assert_eq!(key, "periods");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_primary_rows_none_for_flat_result() {
        assert!(primary_rows(&json!({ "updated": 730 })).is_none());
    }
}
