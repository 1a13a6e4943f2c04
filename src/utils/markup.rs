//! Removal of terminal style markup and delimiter-breaking characters.

use regex::Regex;
use std::sync::LazyLock;

/// Matches `[bold]`, `[/red]`, `[bold cyan]` and any other bracketed span.
static MARKUP_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\[\]]*?\]").unwrap());

/// Strips bracketed style tags from text.
///
/// Any bracketed span counts as markup, so `[Promo] Sale` becomes ` Sale`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(strip_markup("[red]No Short URL[/red]"), "No Short URL");
/// ```
pub fn strip_markup(text: &str) -> String {
    MARKUP_REGEX.replace_all(text, "").into_owned()
}

/// Prepares a text value for a CSV cell: markup removed, line breaks removed.
pub fn sanitize_field(text: &str) -> String {
    strip_line_breaks(&strip_markup(text))
}

/// Removes `\r` and `\n` only. Used for URL cells, where brackets are data.
pub fn strip_line_breaks(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup_tags() {
        assert_eq!(strip_markup("[bold]ID:[/bold] 42"), "ID: 42");
        assert_eq!(strip_markup("[bold cyan]x[/bold cyan]"), "x");
    }

    #[test]
    fn test_strip_markup_plain_text_untouched() {
        assert_eq!(
            strip_markup("https://example.com/?a=1&b=2"),
            "https://example.com/?a=1&b=2"
        );
        assert_eq!(strip_markup(""), "");
    }

    #[test]
    fn test_strip_markup_unbalanced_bracket() {
        assert_eq!(strip_markup("a [b"), "a [b");
        assert_eq!(strip_markup("a ]b"), "a ]b");
    }

    #[test]
    fn test_sanitize_field_removes_line_breaks() {
        assert_eq!(sanitize_field("Line one\r\nLine [i]two[/i]"), "Line oneLine two");
    }

    #[test]
    fn test_strip_line_breaks_keeps_brackets() {
        assert_eq!(strip_line_breaks("http://[::1]/x\n"), "http://[::1]/x");
    }

    #[test]
    fn test_sanitize_field_keeps_commas() {
        assert_eq!(sanitize_field("Menu, lunch"), "Menu, lunch");
    }
}
