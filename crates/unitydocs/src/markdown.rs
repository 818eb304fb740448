//! Markdown to HTML rendering.
//!
//! The reverse direction of the converter: converted pages are rendered back
//! to HTML with `comrak`, and links between pages are pointed at `.html`
//! files again.

use std::path::Path;

use comrak::nodes::NodeValue;
use comrak::{format_html, parse_document, Arena, Options};

use crate::Result;

/// Render Markdown to HTML, rewriting `.md` link targets to `.html`
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    let arena = Arena::new();
    let options = default_comrak_options();
    let root = parse_document(&arena, markdown, &options);

    for node in root.descendants() {
        let mut ast = node.data.borrow_mut();
        if let NodeValue::Link(ref mut link) | NodeValue::Image(ref mut link) = ast.value {
            link.url = rewrite_link_target(&link.url);
        }
    }

    let mut html = Vec::new();
    format_html(root, &options, &mut html)?;
    Ok(String::from_utf8_lossy(&html).into_owned())
}

fn default_comrak_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.extension.description_lists = true;
    options.extension.superscript = true;
    options
}

/// Swap a trailing `.md` extension for `.html`
fn rewrite_link_target(url: &str) -> String {
    let is_markdown = Path::new(url).extension().is_some_and(|ext| ext == "md");
    match url.strip_suffix(".md") {
        Some(stem) if is_markdown => format!("{}.html", stem),
        _ => url.to_string(),
    }
}
