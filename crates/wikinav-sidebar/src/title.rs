//! Title extraction from document content.
//!
//! A document's title is its first top-level heading (`# Title`), with
//! badge markup such as `[![Build](img)](link)` removed.

use std::sync::LazyLock;

use regex::Regex;

/// First line starting with a single `#` followed by horizontal whitespace.
///
/// CRLF mode keeps a trailing `\r` out of the capture.
static H1_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^#[ \t]+(.+)$").expect("invalid heading regex"));

/// Image link wrapped in a link, with any whitespace before it.
static BADGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\[!\[.*?\]\(.*?\)\]\(.*?\)").expect("invalid badge regex")
});

/// Extract the display title from document content.
///
/// Returns `None` when the content has no top-level heading, or when the
/// heading is made up of badges only.
///
/// # Example
///
/// ```
/// use wikinav_sidebar::extract_title;
///
/// let content = "# MyGame [![Build](https://ci/badge.svg)](https://ci)\n\nText.";
/// assert_eq!(extract_title(content).as_deref(), Some("MyGame"));
/// assert_eq!(extract_title("No heading here"), None);
/// ```
#[must_use]
pub fn extract_title(content: &str) -> Option<String> {
    let caps = H1_PATTERN.captures(content)?;
    let stripped = BADGE_PATTERN.replace_all(&caps[1], "");
    let title = stripped.trim();
    (!title.is_empty()).then(|| title.to_owned())
}

/// Label derived from a file name when no title can be extracted.
///
/// Strips the trailing `.{extension}` and leaves the rest untouched.
#[must_use]
pub fn fallback_label(file_name: &str, extension: &str) -> String {
    file_name
        .strip_suffix(extension)
        .and_then(|stem| stem.strip_suffix('.'))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(file_name)
        .to_owned()
}
