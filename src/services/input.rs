//! Input source: one JSON-encoded [`InputEvent`] per line.
//!
//! ```text
//! {"kind":"create","position":{"x":100,"y":100}}
//! {"kind":"press","position":{"x":125,"y":125},"button":"primary","timestamp":0}
//! {"kind":"release","timestamp":80}
//! ```

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::path::Path;

use canvas::input::InputEvent;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::warn;

/// Open the events file, or stdin when no path is given.
///
/// # Errors
///
/// Returns the I/O error from opening the file.
pub async fn open(path: Option<&Path>) -> std::io::Result<Box<dyn AsyncBufRead + Unpin + Send>> {
    match path {
        Some(path) => Ok(Box::new(BufReader::new(tokio::fs::File::open(path).await?))),
        None => Ok(Box::new(BufReader::new(tokio::io::stdin()))),
    }
}

/// Decode one line. Blank lines and `#` comments yield nothing; malformed
/// lines are logged and skipped.
#[must_use]
pub fn parse_line(line: &str, line_no: usize) -> Option<InputEvent> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(event) => Some(event),
        Err(e) => {
            warn!(line = line_no, error = %e, "skipping malformed input event");
            None
        }
    }
}
