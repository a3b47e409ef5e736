//! Content types for served files.

use std::path::Path;

/// Fallback for any extension not in the table.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Content type for a file, chosen by extension (case-insensitive).
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        _ => OCTET_STREAM,
    }
}
