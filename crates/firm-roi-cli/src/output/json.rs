use serde_json::Value;

/// Pretty-print JSON to stdout. When a booking link applies, it is added
/// as a top-level `booking_url` field next to the envelope.
pub fn print_json(value: &Value, booking_url: Option<&str>) {
    let rendered = match (value, booking_url) {
        (Value::Object(map), Some(url)) => {
            let mut map = map.clone();
            map.insert("booking_url".to_string(), Value::String(url.to_string()));
            serde_json::to_string_pretty(&Value::Object(map))
        }
        _ => serde_json::to_string_pretty(value),
    };
    match rendered {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}
