//! Line-level helpers for the `key = value` config format.

/// Truncate `line` at the first `#`.
///
/// A `#` inside a quoted value is still treated as a comment start.
pub fn remove_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Lenient boolean: `true`, `t`, `on`, `y`, `yes` (any case) are true,
/// everything else is false.
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "t" | "on" | "y" | "yes"
    )
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
