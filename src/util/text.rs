use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Number of terminal columns `s` occupies (CJK and emoji count as two).
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncates `s` to at most `max_width` columns, ending with `...` when cut.
///
/// Returns `Cow::Borrowed` when the text already fits. Widths of three or
/// less have no room for an ellipsis, so the text is simply clipped.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let budget = if max_width <= ELLIPSIS_WIDTH {
        max_width
    } else {
        max_width - ELLIPSIS_WIDTH
    };

    let mut used = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        end = idx + c.len_utf8();
    }

    if max_width <= ELLIPSIS_WIDTH {
        Cow::Owned(s[..end].to_string())
    } else {
        Cow::Owned(format!("{}{}", s[..end].trim_end(), ELLIPSIS))
    }
}

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Drops control characters from API-provided text before it reaches a terminal.
///
/// Newlines and tabs are flattened to spaces so one item stays on one line.
pub fn sanitize(s: &str) -> Cow<'_, str> {
    if !s.chars().any(char::is_control) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.chars()
            .filter_map(|c| match c {
                '\n' | '\t' | '\r' => Some(' '),
                c if c.is_control() => None,
                c => Some(c),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_is_borrowed() {
        let result = truncate_to_width("Short", 10);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(truncate_to_width("12345", 5), "12345");
    }

    #[test]
    fn test_ascii_truncation() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
        assert_eq!(truncate_to_width("Testing", 4), "T...");
    }

    #[test]
    fn test_trailing_space_trimmed_before_ellipsis() {
        assert_eq!(truncate_to_width("Hello World", 9), "Hello...");
    }

    #[test]
    fn test_wide_chars_never_split() {
        // Each ideograph is two columns wide.
        assert_eq!(truncate_to_width("\u{4f60}\u{597d}\u{4e16}\u{754c}", 7), "\u{4f60}\u{597d}...");
        assert_eq!(truncate_to_width("\u{4f60}\u{597d}", 1), "");
    }

    #[test]
    fn test_narrow_widths_clip_without_ellipsis() {
        assert_eq!(truncate_to_width("Test", 0), "");
        assert_eq!(truncate_to_width("Test", 2), "Te");
        assert_eq!(truncate_to_width("Test", 3), "Tes");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("movies"), "Movies");
        assert_eq!(capitalize_first("\u{e9}t\u{e9}"), "\u{c9}t\u{e9}");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn test_sanitize() {
        assert!(matches!(sanitize("clean text"), Cow::Borrowed(_)));
        assert_eq!(sanitize("two\nlines\x1b[31m"), "two lines[31m");
        assert_eq!(sanitize("bell\x07"), "bell");
    }
}
