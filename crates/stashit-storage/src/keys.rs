//! Storage key generation.
//!
//! Key format: `<nanosecond unix timestamp>_<sanitized file name>`. The
//! timestamp prefix makes repeated uploads of the same name land on
//! distinct keys; the create-only upload mode backs that up at the store.

use chrono::Utc;

/// Generate a fresh storage key for the given file name.
pub fn storage_key(file_name: &str) -> String {
    let now = Utc::now();
    let ts = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros());
    format!("{ts}_{}", sanitize(file_name))
}

fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
            out.push(ch);
        } else {
            out.push('_');
        }
    }
    if out.is_empty() {
        "file".to_string()
    } else {
        out
    }
}
