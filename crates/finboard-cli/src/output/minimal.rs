use serde_json::Value;

use super::{display_value, result_of};

/// Key figure of each report, in priority order.
const PRIORITY_KEYS: [&str; 5] = [
    "monthly_payment",
    "days_until",
    "total_monthly_payment",
    "total_interest",
    "status",
];

/// Print just the headline figure, followed by any deadline alerts.
pub fn print_minimal(value: &Value) {
    let result = result_of(value);

    let Value::Object(map) = result else {
        println!("{}", display_value(result));
        return;
    };

    let headline = PRIORITY_KEYS
        .iter()
        .find_map(|key| map.get(*key).filter(|v| !v.is_null()));

    match headline {
        Some(val) => println!("{}", display_value(val)),
        None => {
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, display_value(val));
            }
        }
    }

    if let Some(Value::Array(alerts)) = map.get("alerts") {
        for message in alerts.iter().filter_map(|a| a.get("message")?.as_str()) {
            println!("{}", message);
        }
    }
}
