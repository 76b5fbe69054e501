//! Text cleaning for report output
//!
//! Markdown reports use [`strict_clean`] for single-line table cells and
//! [`light_clean`] for multi-line release note bodies. Plain-text changelogs
//! use [`changes_clean`], which escapes HTML and non-ASCII characters.

use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

/// Numeric suffix JIRA appends to some display names, e.g. `"Jane Doe (42)"`
static NAME_SUFFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" \([0-9]+\)").expect("Invalid regex"));

/// Escape `_` and `|`, drop carriage returns, trim trailing whitespace
pub fn strict_clean(text: &str) -> String {
    text.replace('_', "\\_")
        .replace('\r', "")
        .replace('|', "\\|")
        .trim_end()
        .to_string()
}

/// Escape `_`, drop carriage returns, trim trailing whitespace; `|` survives
pub fn light_clean(text: &str) -> String {
    text.replace('_', "\\_")
        .replace('\r', "")
        .trim_end()
        .to_string()
}

/// Strip name suffixes, then escape for an ASCII plain-text changelog
pub fn changes_clean(text: &str) -> String {
    quote_html(&NAME_SUFFIX_REGEX.replace_all(text, ""))
}

/// Escape `&`, `<`, `>` and write non-ASCII characters as decimal
/// character references
pub fn quote_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c if c.is_ascii() => out.push(c),
            c => {
                let _ = write!(out, "&#{};", c as u32);
            }
        }
    }
    out
}
