use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{display_value, result_of, row_collections};

/// Print a report as tables: headline figures first, then one table per
/// row collection (schedule periods, loans), then alerts and warnings.
pub fn print_table(value: &Value) {
    let result = result_of(value);

    match result {
        Value::Object(map) => {
            print_headline(map);
            for (key, rows) in row_collections(result) {
                if key == "alerts" {
                    continue;
                }
                println!("\n{}:", key.replace('_', " "));
                print_rows(rows);
            }
            print_alerts(map);
        }
        Value::Array(rows) => print_rows(rows),
        other => println!("{}", display_value(other)),
    }

    let Some(envelope) = value.as_object() else {
        return;
    };

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

fn print_headline(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        match val {
            Value::Array(_) => continue,
            // Display-currency block: one row per converted figure
            Value::Object(inner) => {
                for (inner_key, inner_val) in inner {
                    builder.push_record([format!("{key}.{inner_key}"), display_value(inner_val)]);
                }
            }
            _ => builder.push_record([key.clone(), display_value(val)]),
        }
    }
    println!("{}", Table::from(builder));
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());
    for row in rows.iter().filter_map(Value::as_object) {
        builder.push_record(
            headers
                .iter()
                .map(|h| row.get(h).map(display_value).unwrap_or_default()),
        );
    }
    println!("{}", Table::from(builder));
}

fn print_alerts(map: &Map<String, Value>) {
    let Some(Value::Array(alerts)) = map.get("alerts") else {
        return;
    };
    if alerts.is_empty() {
        return;
    }

    println!("\n{}", "Deadline Approaching!".red().bold());
    for alert in alerts {
        if let Some(message) = alert.get("message").and_then(Value::as_str) {
            println!("  {}", message.red());
        }
    }
}
