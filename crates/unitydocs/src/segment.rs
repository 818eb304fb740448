//! Locating the content of a Unity documentation page.
//!
//! Every exported page nests its body as
//! `#content-wrap > div > div > div.section`. Scripting API pages split that
//! body into `subsection` blocks (one per member); manual pages are a single
//! heading followed by prose.

use crate::node::{Document, NodeId, NodeRef, Tag};
use crate::service::ConvertOptions;
use crate::{ConvertError, Result};

/// Identifier of the page wrapper element
pub const CONTENT_WRAP_ID: &str = "content-wrap";

/// Class of the content container
pub const SECTION_CLASS: &str = "section";

/// Class of a member block on scripting API pages
pub const SUBSECTION_CLASS: &str = "subsection";

/// Kind of page being converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionMode {
    /// Scripting API page with one or more `subsection` blocks
    Reference,
    /// Manual page: a heading followed by flowing content
    Manual,
}

/// What to render for a page
#[derive(Debug, Clone)]
pub struct Segment<'a> {
    pub title: String,
    pub mode: ConversionMode,
    /// Nodes rendered one after another to form the body
    pub span: Vec<NodeRef<'a>>,
}

/// Find the `div.section` content container
pub fn locate_content(document: &Document) -> Result<NodeId> {
    document
        .root()
        .descendants()
        .filter(|n| n.element_id() == Some(CONTENT_WRAP_ID))
        .find_map(section_under)
        .map(|n| n.id())
        .ok_or_else(|| {
            ConvertError::Structure(format!(
                "no `div.{}` container found under `#{}`",
                SECTION_CLASS, CONTENT_WRAP_ID
            ))
        })
}

/// `wrap > div > div > div.section`, first in document order
fn section_under(wrap: NodeRef<'_>) -> Option<NodeRef<'_>> {
    divs(wrap)
        .flat_map(divs)
        .flat_map(divs)
        .find(|n| n.has_class(SECTION_CLASS))
}

fn divs(node: NodeRef<'_>) -> impl Iterator<Item = NodeRef<'_>> {
    node.element_children().filter(|c| c.tag() == Tag::Div)
}

/// Locate the container and split it into title, mode and span
pub fn segment<'a>(document: &'a Document, options: &ConvertOptions) -> Result<Segment<'a>> {
    let container = locate_content(document)?;
    segment_container(document.get(container), options)
}

/// Split an already located container into title, mode and span
pub fn segment_container<'a>(
    container: NodeRef<'a>,
    options: &ConvertOptions,
) -> Result<Segment<'a>> {
    let subsections = container.find_all_with_class(SUBSECTION_CLASS);
    if !subsections.is_empty() {
        let title = container
            .find_first(Tag::H1)
            .ok_or_else(|| ConvertError::Structure("reference page has no `h1` title".to_string()))?
            .text_content();

        log::debug!(
            "reference page `{}` with {} subsection(s)",
            title.trim(),
            subsections.len()
        );
        return Ok(Segment {
            title: title.trim().to_string(),
            mode: ConversionMode::Reference,
            span: subsections,
        });
    }

    let anchor = container
        .find_first(Tag::H1)
        .or_else(|| container.find_first(Tag::H2))
        .ok_or_else(|| ConvertError::Structure("manual page has neither `h1` nor `h2`".to_string()))?;

    let sentinel = options.content_sentinel_id.as_str();
    let span: Vec<NodeRef<'a>> = anchor
        .next_siblings()
        .take_while(|n| n.element_id() != Some(sentinel))
        .collect();

    let title = anchor.text_content().trim().to_string();
    log::debug!("manual page `{}` with {} node(s)", title, span.len());
    Ok(Segment {
        title,
        mode: ConversionMode::Manual,
        span,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_html;

    fn page(body: &str) -> String {
        format!(
            r#"<html><body><div id="content-wrap"><div class="content-block"><div class="content"><div class="section">{}</div></div></div></div></body></html>"#,
            body
        )
    }

    #[test]
    fn test_missing_container() {
        let doc = parse_html("<html><body><div class=\"section\"><h1>x</h1></div></body></html>");
        let err = locate_content(&doc).unwrap_err();
        assert!(matches!(err, ConvertError::Structure(_)));
    }

    #[test]
    fn test_container_requires_section_class() {
        let html = r#"<div id="content-wrap"><div><div><div class="other"><h1>x</h1></div></div></div></div>"#;
        let doc = parse_html(html);
        assert!(locate_content(&doc).is_err());
    }

    #[test]
    fn test_reference_mode() {
        let doc = parse_html(&page(
            r#"<h1>Rigidbody.mass</h1><div class="subsection"><p>a</p></div><div class="subsection"><p>b</p></div>"#,
        ));
        let segment = segment(&doc, &ConvertOptions::default()).unwrap();
        assert_eq!(segment.mode, ConversionMode::Reference);
        assert_eq!(segment.title, "Rigidbody.mass");
        assert_eq!(segment.span.len(), 2);
    }

    #[test]
    fn test_manual_mode_stops_at_sentinel() {
        let doc = parse_html(&page(
            r#"<h1> Cameras </h1><p>one</p><p>two</p><div id="_content"><p>feedback</p></div><p>after</p>"#,
        ));
        let segment = segment(&doc, &ConvertOptions::default()).unwrap();
        assert_eq!(segment.mode, ConversionMode::Manual);
        assert_eq!(segment.title, "Cameras");
        let texts: Vec<String> = segment.span.iter().map(|n| n.text_content()).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[test]
    fn test_manual_mode_runs_to_end_without_sentinel() {
        let doc = parse_html(&page(r#"<h2>Layers</h2><p>one</p><p>two</p>"#));
        let segment = segment(&doc, &ConvertOptions::default()).unwrap();
        assert_eq!(segment.title, "Layers");
        assert_eq!(segment.span.len(), 2);
    }

    #[test]
    fn test_manual_mode_without_heading() {
        let doc = parse_html(&page("<p>orphan</p>"));
        let err = segment(&doc, &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::Structure(_)));
    }
}
