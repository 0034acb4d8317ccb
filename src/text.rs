//! Helpful utilities for working with text.

use htmlentity::entity::{self, ICodedDataTrait};
use itertools::Itertools;

/// Marker appended to truncated text.
pub const ELLIPSIS: char = '…';

/// Converts HTML entities into their single-character equivalents.
///
/// For example, the search API returns "&" as "&amp;", ">" as "&gt;",
/// and "<" as "&lt;"; this function will convert those HTML
/// entities into single, human-readable characters.
///
/// Leading and trailing whitespace will also be trimmed from the string.
///
/// # Examples
///
/// ```
/// use xrecent::text::convert_html_entities;
/// let raw = "  &lt;This &amp; That&gt;  ";
/// let converted = convert_html_entities(raw);
/// assert_eq!(converted, "<This & That>");
/// ```
///
/// ```
/// use xrecent::text::convert_html_entities;
/// let raw = "A Plaintext Post";
/// let converted = convert_html_entities(raw);
/// assert_eq!(converted, raw);
/// ```
pub fn convert_html_entities(text: &str) -> String {
    let text = text.trim();
    entity::decode(text.as_bytes())
        .to_string()
        .unwrap_or(text.to_string())
}

/// Collapses every run of whitespace, including newlines, into a single
/// space and trims the ends.
///
/// # Examples
///
/// ```
/// use xrecent::text::collapse_whitespace;
/// assert_eq!(collapse_whitespace("  one\n\ntwo \t three "), "one two three");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().join(" ")
}

/// Shortens `text` to at most `limit` characters.
///
/// Text that is too long is cut to `limit - 1` characters followed by
/// [`ELLIPSIS`]. Characters, not bytes, are counted.
///
/// # Examples
///
/// ```
/// use xrecent::text::truncate;
/// assert_eq!(truncate("short", 10), "short");
/// assert_eq!(truncate("a bit too long", 8), "a bit t…");
/// ```
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let mut truncated: String = text.chars().take(limit.saturating_sub(1)).collect();
        truncated.push(ELLIPSIS);
        truncated
    }
}

/// A single-line, length-limited rendering of a post's text.
pub fn snippet(text: &str, limit: usize) -> String {
    truncate(&collapse_whitespace(&convert_html_entities(text)), limit)
}
