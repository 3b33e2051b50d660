use serde_json::Value;
use tabled::{Table, builder::Builder};

use super::flatten_object;

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            // Check if "result" key holds the primary data
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(value);
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &serde_json::Map<String, Value>) {
    // Print the result section
    if let Value::Object(res_map) = result {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in flatten_object(res_map) {
            if key == "results" || key == "matrix" {
                continue;
            }
            builder.push_record([key.as_str(), &format_value(&val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);

        // What-if scenarios get their own table
        if let Some(Value::Array(rows)) = res_map.get("results") {
            println!();
            print_scenario_table(rows);
        }
        if let Some(Value::Array(rows)) = res_map.get("matrix") {
            println!("\nMatrix (rows: variable_1, columns: variable_2):");
            for row in rows {
                println!("  {}", format_value(row));
            }
        }
    } else {
        print_flat_object(&Value::Object(envelope.clone()));
    }

    // Print warnings if any
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    // Print methodology
    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_scenario_table(rows: &[Value]) {
    let columns = [
        ("Scenario", "name"),
        ("Annual savings", "projection.total_annual_savings"),
        ("ROI %", "projection.roi"),
        ("Break-even (months)", "projection.break_even_months"),
        ("Savings delta", "savings_delta"),
        ("ROI delta", "roi_delta"),
        ("Recommendations", "recommendations"),
    ];

    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|(title, _)| *title));
    for item in rows {
        if let Value::Object(map) = item {
            let flat: std::collections::HashMap<String, Value> =
                flatten_object(map).into_iter().collect();
            builder.push_record(
                columns
                    .iter()
                    .map(|(_, key)| flat.get(*key).map(format_value).unwrap_or_default()),
            );
        }
    }
    println!("{}", Table::from(builder));
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
