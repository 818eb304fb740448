//! HTML parsing support.
//!
//! Parses HTML strings with `scraper` (html5ever) and copies the result into
//! the arena [`Document`] used by the converter. Comments, doctypes and
//! processing instructions are dropped on the way.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::{Document, NodeId};

/// Parse a complete HTML page.
///
/// The `<html>` element becomes the single child of the document root.
///
/// # Example
///
/// ```rust
/// use unitydocs::parse_html;
///
/// let doc = parse_html("<html><body><h1>Camera</h1></body></html>");
/// assert_eq!(doc.root().children().next().unwrap().tag_name(), "html");
/// ```
pub fn parse_html(html: &str) -> Document {
    let parsed = Html::parse_document(html);
    let mut document = Document::new();
    let root = document.root_id();
    append_element(&mut document, root, parsed.root_element());
    document
}

/// Parse an HTML fragment.
///
/// The fragment's top-level nodes become children of the document root, so
/// `<p>a</p><p>b</p>` yields a root with two `p` children.
pub fn parse_fragment(html: &str) -> Document {
    let parsed = Html::parse_fragment(html);
    let mut document = Document::new();
    let root = document.root_id();
    append_children(&mut document, root, parsed.root_element());
    document
}

/// Copy a scraper element and its subtree under `parent`
fn append_element(document: &mut Document, parent: NodeId, element: ElementRef) {
    let value = element.value();
    let attrs: Vec<(String, String)> = value
        .attrs()
        .map(|(name, val)| (name.to_string(), val.to_string()))
        .collect();

    let id = document.append_element(parent, value.name(), attrs);
    append_children(document, id, element);
}

fn append_children(document: &mut Document, parent: NodeId, element: ElementRef) {
    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                document.append_text(parent, &text.text);
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    append_element(document, parent, child_element);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Tag;

    #[test]
    fn test_parse_document_wraps_html() {
        let doc = parse_html("<p>Hello World</p>");
        let html = doc.root().children().next().unwrap();
        assert_eq!(html.tag_name(), "html");
        assert!(html.find_first(Tag::P).is_some());
    }

    #[test]
    fn test_parse_fragment_top_level() {
        let doc = parse_fragment("<p>a</p><p>b</p>");
        let tags: Vec<&str> = doc.root().children().map(|n| n.tag_name()).collect();
        assert_eq!(tags, vec!["p", "p"]);
    }

    #[test]
    fn test_comments_are_dropped() {
        let doc = parse_fragment("<div><!-- hidden -->shown</div>");
        let div = doc.root().children().next().unwrap();
        assert_eq!(div.children().count(), 1);
        assert_eq!(div.text_content(), "shown");
    }

    #[test]
    fn test_attributes_are_kept() {
        let doc = parse_fragment(r#"<a href="Camera.html" title="Camera">x</a>"#);
        let a = doc.root().find_first(Tag::A).unwrap();
        assert_eq!(a.attr("href"), Some("Camera.html"));
        assert_eq!(a.attr("title"), Some("Camera"));
    }

    #[test]
    fn test_entities_are_decoded() {
        let doc = parse_fragment("<code>a &lt; b</code>");
        assert_eq!(doc.root().text_content(), "a < b");
    }
}
