//! Terminal formatting helpers.

use chrono::{DateTime, Utc};
use console::Style;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string to fit within a maximum display width, adding `…` if needed.
///
/// Wide (e.g. CJK) characters count as two columns.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    // Reserve one column for the ellipsis
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

/// Pads `s` with spaces to `width` display columns.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let mut padded = s.to_string();
    padded.push_str(&" ".repeat(width.saturating_sub(s.width())));
    padded
}

/// Formats a millisecond timestamp as a UTC date, `----------` when unknown.
pub fn format_date(millis: i64) -> String {
    if millis == 0 {
        return "-".repeat(10);
    }
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".repeat(10))
}

pub fn label() -> Style {
    Style::new().dim()
}

pub fn title() -> Style {
    Style::new().bold()
}

pub fn accent() -> Style {
    Style::new().cyan()
}
