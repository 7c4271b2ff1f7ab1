//! String utility functions for common string operations.

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// First line of `s`, without its line terminator.
pub fn first_line(s: &str) -> &str {
    s.lines().next().unwrap_or("")
}

/// Truncate `s` to at most `limit` characters, appending `...` when anything
/// was cut. Counts characters, not bytes, so multi-byte text is never split.
///
/// # Example
///
/// ```
/// use folder_notes::string_utils::truncate_chars;
///
/// assert_eq!(truncate_chars("short", 64), "short");
/// assert_eq!(truncate_chars("abcdef", 3), "abc...");
/// ```
pub fn truncate_chars(s: &str, limit: usize) -> String {
    match s.char_indices().nth(limit) {
        Some((byte_index, _)) => format!("{}{}", &s[..byte_index], ELLIPSIS),
        None => s.to_string(),
    }
}
