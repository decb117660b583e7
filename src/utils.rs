//! Shared utility functions used across modules.

/// Truncate a string to `max_len` characters, appending "..." if truncated.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Render a polarity the way the result line shows it. Whole numbers keep
/// their `.0` and negative zero keeps its sign.
pub fn format_score(value: f64) -> String {
    format!("{:?}", value)
}
