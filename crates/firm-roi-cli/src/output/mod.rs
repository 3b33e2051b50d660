pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use firm_roi_core::profitability::session::BOOKING_URL;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
///
/// `offer_booking` is set for projections: json gains a `booking_url` field
/// and table output ends with the consultation link. csv and minimal stay
/// pure data.
pub fn format_output(format: &OutputFormat, value: &Value, offer_booking: bool) {
    match format {
        OutputFormat::Json => json::print_json(value, offer_booking.then_some(BOOKING_URL)),
        OutputFormat::Table => {
            table::print_table(value);
            if offer_booking {
                println!("\nSchedule a free consultation: {}", BOOKING_URL);
            }
        }
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Flatten nested objects into dotted keys ("projection.roi"). Arrays of
/// scalars stay as arrays; everything else is kept as-is.
pub fn flatten_object(map: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut rows = Vec::new();
    flatten_into("", map, &mut rows);
    rows
}

fn flatten_into(prefix: &str, map: &Map<String, Value>, rows: &mut Vec<(String, Value)>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match val {
            Value::Object(inner) => flatten_into(&name, inner, rows),
            other => rows.push((name, other.clone())),
        }
    }
}
