use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{column_order, format_cell};

/// Format output as tables using the tabled crate.
///
/// Scalar result fields share one Field/Value table; nested objects and
/// row arrays (the schedules) each get their own titled table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_tables(result, map);
            } else if let Some(Value::Array(results)) = map.get("results") {
                print_array_table(results);
            } else {
                print_field_table(map);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_tables(result: &Value, envelope: &Map<String, Value>) {
    let Value::Object(res_map) = result else {
        print_field_table(envelope);
        return;
    };

    let scalars: Map<String, Value> = res_map
        .iter()
        .filter(|(_, v)| !v.is_object() && !v.is_array())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    if !scalars.is_empty() {
        print_field_table(&scalars);
    }

    for (key, val) in res_map {
        match val {
            Value::Object(nested) => {
                println!("\n{}", title(key));
                print_field_table(nested);
            }
            Value::Array(rows) => {
                println!("\n{} ({} rows)", title(key), rows.len());
                print_array_table(rows);
            }
            _ => {}
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_field_table(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_cell(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        if arr.is_empty() {
            println!("(empty)");
        }
        for item in arr {
            println!("{}", format_cell(item));
        }
        return;
    };

    let headers = column_order(first);
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_cell).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }

    println!("{}", Table::from(builder));
}

/// `standard_schedule` -> `Standard Schedule`
fn title(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title("accelerated_schedule"), "Accelerated Schedule");
        assert_eq!(title("comparison"), "Comparison");
    }
}
