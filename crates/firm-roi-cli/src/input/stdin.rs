use serde_json::Value;
use std::io::{self, Read};

/// Read a piped JSON document from stdin.
///
/// Returns None when stdin is a terminal or the pipe is empty, so callers
/// fall back to command-line flags.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    tracing::debug!(bytes = trimmed.len(), "read input from stdin");
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| format!("Failed to parse JSON from stdin: {}", e).into())
}
