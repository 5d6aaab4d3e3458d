use serde_json::{Map, Value};
use std::io;

use super::{column_order, format_cell};

/// Write output as CSV to stdout.
///
/// When the result carries row arrays (the schedules), every row is written
/// under one header with a leading `schedule` column naming its array.
/// Otherwise the result is written as two-column `field,value` pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let outcome = match value {
        Value::Object(map) => match (map.get("result"), map.get("results")) {
            (Some(Value::Object(result)), _) if has_row_arrays(result) => {
                write_tagged_rows(&mut wtr, result)
            }
            (Some(Value::Object(result)), _) => write_fields(&mut wtr, result),
            (_, Some(Value::Array(results))) => write_rows(&mut wtr, results),
            _ => write_fields(&mut wtr, map),
        },
        Value::Array(arr) => write_rows(&mut wtr, arr),
        _ => wtr.write_record([&format_cell(value)]),
    };

    if let Err(e) = outcome.and_then(|_| wtr.flush().map_err(csv::Error::from)) {
        tracing::error!(error = %e, "CSV output failed");
    }
}

fn has_row_arrays(result: &Map<String, Value>) -> bool {
    result.values().any(|v| {
        matches!(v, Value::Array(rows) if !rows.is_empty() && rows.iter().all(Value::is_object))
    })
}

fn write_fields<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    map: &Map<String, Value>,
) -> csv::Result<()> {
    wtr.write_record(["field", "value"])?;
    for (key, val) in map {
        wtr.write_record([key.as_str(), &format_cell(val)])?;
    }
    Ok(())
}

fn write_tagged_rows<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    result: &Map<String, Value>,
) -> csv::Result<()> {
    let tables: Vec<(&String, &Vec<Value>)> = result
        .iter()
        .filter_map(|(key, val)| match val {
            Value::Array(rows) => Some((key, rows)),
            _ => None,
        })
        .collect();

    let headers = tables
        .first()
        .map(|(_, rows)| headers_for(rows))
        .unwrap_or_default();
    let mut record = vec!["schedule".to_string()];
    record.extend(headers.iter().cloned());
    wtr.write_record(&record)?;

    for (key, rows) in tables {
        write_body(wtr, rows, Some(key.as_str()), &headers)?;
    }
    Ok(())
}

fn write_rows<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    rows: &[Value],
) -> csv::Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    if !rows[0].is_object() {
        for item in rows {
            wtr.write_record([&format_cell(item)])?;
        }
        return Ok(());
    }

    let headers = headers_for(rows);
    wtr.write_record(&headers)?;
    write_body(wtr, rows, None, &headers)
}

fn write_body<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    rows: &[Value],
    tag: Option<&str>,
    headers: &[String],
) -> csv::Result<()> {
    for item in rows {
        if let Value::Object(map) = item {
            let mut record: Vec<String> = tag.map(|t| vec![t.to_string()]).unwrap_or_default();
            record.extend(
                headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_cell).unwrap_or_default()),
            );
            wtr.write_record(&record)?;
        }
    }
    Ok(())
}

fn headers_for(rows: &[Value]) -> Vec<String> {
    match rows.first() {
        Some(Value::Object(first)) => column_order(first),
        _ => Vec::new(),
    }
}
