use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::primary_rows;

/// Format output as tables using the tabled crate.
///
/// Scalar result fields go in a Field/Value table; the main row collection
/// (schedule periods, net-worth years or rate comparisons) gets its own
/// table; alert and recommendation lists are printed as bullets.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        Value::Array(arr) => {
            print_array_table(arr);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    let Value::Object(res_map) = result else {
        print_flat_object(&Value::Object(envelope.clone()));
        return;
    };

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in res_map {
        match val {
            Value::Array(items) if items.iter().any(Value::is_object) => {
                builder.push_record([key.as_str(), &format!("[{} rows]", items.len())]);
            }
            Value::Array(items) if items.iter().all(Value::is_string) => {}
            _ => builder.push_record([key.as_str(), &format_value(val)]),
        }
    }
    println!("{}", Table::from(builder));

    if let Some((key, rows)) = primary_rows(result) {
        println!("\n{}:", key);
        print_array_table(rows);
    }

    for key in ["alerts", "recommendations"] {
        print_bullets(key, res_map.get(key));
    }
    print_bullets("warnings", envelope.get("warnings"));

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_bullets(title: &str, list: Option<&Value>) {
    if let Some(Value::Array(items)) = list {
        if !items.is_empty() {
            println!("\n{}:", title);
            for item in items {
                if let Value::String(s) = item {
                    println!("  - {}", s);
                }
            }
        }
    }
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
