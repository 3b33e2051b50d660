use serde_json::Value;
use std::io;

use super::flatten_object;

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            if let Some(Value::Object(result)) = map.get("result") {
                if let Some(Value::Array(results)) = result.get("results") {
                    // What-if comparison: one row per scenario
                    write_array_csv(&mut wtr, results);
                } else if let Some(Value::Array(matrix)) = result.get("matrix") {
                    write_matrix_csv(&mut wtr, result, matrix);
                } else {
                    // Two-column CSV: field, value
                    let _ = wtr.write_record(["field", "value"]);
                    for (key, val) in flatten_object(result) {
                        let _ = wtr.write_record([key.as_str(), &format_csv_value(&val)]);
                    }
                }
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in flatten_object(map) {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(&val)]);
                }
            }
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    // Extract headers from first object, nested fields flattened
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = flatten_object(first).into_iter().map(|(k, _)| k).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let flat: std::collections::HashMap<String, Value> =
                    flatten_object(map).into_iter().collect();
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| flat.get(h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

/// Sensitivity grid: first column holds variable_1 values, the header row
/// holds variable_2 values (a single "value" column for one-way sweeps).
fn write_matrix_csv(
    wtr: &mut csv::Writer<io::StdoutLock<'_>>,
    result: &serde_json::Map<String, Value>,
    matrix: &[Value],
) {
    let axis = |key: &str| -> Vec<String> {
        match result.get(key) {
            Some(Value::Array(a)) => a.iter().map(format_csv_value).collect(),
            _ => Vec::new(),
        }
    };
    let rows_axis = axis("variable_1_values");
    let cols_axis = axis("variable_2_values");

    let mut header = vec![String::new()];
    if cols_axis.is_empty() {
        header.push("value".to_string());
    } else {
        header.extend(cols_axis);
    }
    let _ = wtr.write_record(&header);

    for (i, row) in matrix.iter().enumerate() {
        let mut record = vec![rows_axis.get(i).cloned().unwrap_or_default()];
        if let Value::Array(cells) = row {
            record.extend(cells.iter().map(format_csv_value));
        }
        let _ = wtr.write_record(&record);
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
