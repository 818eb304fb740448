//! Text helpers shared by the renderer and the post-processing pass.

use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_LINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

static TRAILING_SPACE_AFTER_TERMINATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.;])\s+$").unwrap());

/// One level of list indentation
pub const INDENT: &str = "    ";

/// Collapse every run of two or more newlines into a single blank line
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINE_RUN.replace_all(text, "\n\n").into_owned()
}

/// Drop whitespace that trails a final `.` or `;`
pub fn trim_after_terminator(text: &str) -> String {
    TRAILING_SPACE_AFTER_TERMINATOR
        .replace(text, "$1")
        .into_owned()
}

/// Replace curly double quotes with ASCII ones
pub fn normalize_quotes(text: &str) -> String {
    text.replace(['\u{201C}', '\u{201D}'], "\"")
}

/// Escape the characters a Markdown renderer would read as inline HTML
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;")
}

/// Point inter-page links at the converted Markdown files
pub fn rewrite_href(href: &str) -> String {
    href.replace(".html", ".md")
}

/// Indentation for a list nesting level; nothing at level 0 or below
pub fn indent(level: i32) -> String {
    if level > 0 {
        INDENT.repeat(level as usize)
    } else {
        String::new()
    }
}
