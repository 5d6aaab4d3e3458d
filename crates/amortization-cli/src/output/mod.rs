pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Columns of a payment row in reading order; other keys follow alphabetically.
pub(crate) const ROW_COLUMNS: [&str; 7] = [
    "month",
    "payment_date",
    "payment",
    "principal",
    "interest",
    "beginning_balance",
    "balance",
];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Header order for an array of row objects: known row columns first,
/// then any remaining keys of the first row.
pub(crate) fn column_order(first: &serde_json::Map<String, Value>) -> Vec<String> {
    let mut headers: Vec<String> = ROW_COLUMNS
        .iter()
        .filter(|c| first.contains_key(**c))
        .map(|c| c.to_string())
        .collect();
    for key in first.keys() {
        if !headers.iter().any(|h| h == key) {
            headers.push(key.clone());
        }
    }
    headers
}

/// Render a scalar for tables and CSV cells.
pub(crate) fn format_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_column_order_puts_row_fields_first() {
        let row = json!({"balance": "1", "extra": 2, "month": 1, "payment": "3"});
        let headers = column_order(row.as_object().unwrap());
        assert_eq!(headers, vec!["month", "payment", "balance", "extra"]);
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(&json!("536.82")), "536.82");
        assert_eq!(format_cell(&json!(360)), "360");
        assert_eq!(format_cell(&Value::Null), "");
    }
}
