//! Fixes for quirks of Unity's HTML export, applied before rendering.

use crate::node::{Document, NodeId, Tag};

/// Class of the hover text spans attached to glossary terms
pub const TOOLTIP_CLASS: &str = "tooltiptext";

/// Apply every fix below `container`. Running it twice changes nothing.
pub fn normalize(document: &mut Document, container: NodeId) {
    remove_tooltips(document, container);
    flatten_code_blocks(document, container);
}

/// Detach every element carrying the tooltip class
fn remove_tooltips(document: &mut Document, container: NodeId) {
    let tooltips: Vec<NodeId> = document
        .get(container)
        .find_all_with_class(TOOLTIP_CLASS)
        .iter()
        .map(|n| n.id())
        .collect();

    log::trace!("removing {} tooltip(s)", tooltips.len());
    for id in tooltips {
        document.detach(id);
    }
}

/// Replace the contents of each `pre` holding a `code` child with the code's
/// plain text, so the block renders as one fenced block.
fn flatten_code_blocks(document: &mut Document, container: NodeId) {
    let mut blocks: Vec<(NodeId, String)> = Vec::new();
    for pre in document.get(container).find_all(Tag::Pre) {
        let code: Vec<_> = pre
            .children()
            .filter(|child| child.tag() == Tag::Code)
            .collect();
        if code.is_empty() {
            continue;
        }
        let text: String = code.iter().map(|c| c.text_content()).collect();
        blocks.push((pre.id(), text.trim_end().to_string()));
    }

    log::trace!("flattening {} code block(s)", blocks.len());
    for (pre, text) in blocks {
        document.clear_children(pre);
        document.append_text(pre, &text);
    }
}
