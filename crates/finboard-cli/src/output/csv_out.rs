use serde_json::Value;
use std::io;

use super::{display_value, result_of, row_collections};

/// Write output as CSV to stdout.
///
/// Reports with a row collection (schedule periods, loans) emit those rows;
/// everything else becomes a two-column field/value listing.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    let result = result_of(value);

    let primary = row_collections(result)
        .into_iter()
        .find(|(key, _)| *key != "alerts");

    match (result, primary) {
        (_, Some((_, rows))) => write_rows(&mut wtr, rows),
        (Value::Object(map), None) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in map {
                let _ = wtr.write_record([key.as_str(), &csv_value(val)]);
            }
        }
        (Value::Array(rows), None) => write_rows(&mut wtr, rows),
        (other, None) => {
            let _ = wtr.write_record([csv_value(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        return;
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let _ = wtr.write_record(&headers);
    for row in rows.iter().filter_map(Value::as_object) {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(csv_value).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&record);
    }
}

/// CSV keeps full precision; only nested values are flattened.
fn csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(_) | Value::Bool(_) | Value::Null => display_value(value),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
