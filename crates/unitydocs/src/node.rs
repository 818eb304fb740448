//! Arena-backed DOM tree for Unity documentation pages.
//!
//! Nodes live in a flat `Vec` owned by [`Document`] and are addressed by
//! [`NodeId`]. Each record keeps a parent index and an ordered list of child
//! indices, so ancestry queries walk indices upward instead of following
//! owning pointers. [`NodeRef`] is the borrowed view the renderer works with.

/// Upper bound on parent hops taken by any ancestry walk.
pub const MAX_DEPTH: usize = 1024;

/// Stable handle of a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The synthetic document root
    Root,
    /// An element with its lower-case tag name and attributes in source order
    Element {
        name: String,
        attrs: Vec<(String, String)>,
    },
    /// A text node
    Text(String),
}

/// Tags the renderer distinguishes. Everything else is [`Tag::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Div,
    Span,
    Table,
    Thead,
    Tr,
    Td,
    Th,
    H1,
    H2,
    H3,
    Img,
    Figure,
    Figcaption,
    A,
    Code,
    Strong,
    Pre,
    Ul,
    Ol,
    Li,
    P,
    Br,
    Text,
    Other,
}

impl Tag {
    /// Map a lower-case tag name to its variant
    pub fn from_name(name: &str) -> Self {
        match name {
            "div" => Tag::Div,
            "span" => Tag::Span,
            "table" => Tag::Table,
            "thead" => Tag::Thead,
            "tr" => Tag::Tr,
            "td" => Tag::Td,
            "th" => Tag::Th,
            "h1" => Tag::H1,
            "h2" => Tag::H2,
            "h3" => Tag::H3,
            "img" => Tag::Img,
            "figure" => Tag::Figure,
            "figcaption" => Tag::Figcaption,
            "a" => Tag::A,
            "code" => Tag::Code,
            "strong" => Tag::Strong,
            "pre" => Tag::Pre,
            "ul" => Tag::Ul,
            "ol" => Tag::Ol,
            "li" => Tag::Li,
            "p" => Tag::P,
            "br" => Tag::Br,
            "#text" => Tag::Text,
            _ => Tag::Other,
        }
    }

    /// Heading level for `h1`..`h3`
    pub fn heading_level(self) -> Option<usize> {
        match self {
            Tag::H1 => Some(1),
            Tag::H2 => Some(2),
            Tag::H3 => Some(3),
            _ => None,
        }
    }

    /// `ul` or `ol`
    pub fn is_list(self) -> bool {
        matches!(self, Tag::Ul | Tag::Ol)
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A parsed page: an arena of nodes with a synthetic root at index 0.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    /// Create an empty document holding only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Handle of the root node
    pub fn root_id(&self) -> NodeId {
        NodeId(0)
    }

    /// Borrowed view of the root node
    pub fn root(&self) -> NodeRef<'_> {
        self.get(self.root_id())
    }

    /// Borrowed view of any node
    pub fn get(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { doc: self, id }
    }

    /// Append a new element as the last child of `parent`
    pub fn append_element(
        &mut self,
        parent: NodeId,
        name: &str,
        attrs: Vec<(String, String)>,
    ) -> NodeId {
        self.push(
            parent,
            NodeKind::Element {
                name: name.to_lowercase(),
                attrs,
            },
        )
    }

    /// Append a new text node as the last child of `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(parent, NodeKind::Text(text.to_string()))
    }

    /// Unlink a node (and so its subtree) from its parent
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != id);
        }
    }

    /// Unlink every child of a node
    pub fn clear_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// A node together with the document it lives in.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn kind(&self) -> &'a NodeKind {
        &self.doc.data(self.id).kind
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind(), NodeKind::Element { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind(), NodeKind::Text(_))
    }

    /// Tag name, or `#text` / `#document` for non-elements
    pub fn tag_name(&self) -> &'a str {
        match self.kind() {
            NodeKind::Element { name, .. } => name,
            NodeKind::Text(_) => "#text",
            NodeKind::Root => "#document",
        }
    }

    pub fn tag(&self) -> Tag {
        Tag::from_name(self.tag_name())
    }

    /// Own text of a text node; empty for everything else
    pub fn text(&self) -> &'a str {
        match self.kind() {
            NodeKind::Text(text) => text,
            _ => "",
        }
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        match self.kind() {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }

    /// The `id` attribute
    pub fn element_id(&self) -> Option<&'a str> {
        self.attr("id")
    }

    /// Whitespace-separated entries of the `class` attribute
    pub fn classes(&self) -> impl Iterator<Item = &'a str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.doc.data(self.id).parent.map(|id| self.doc.get(id))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        doc.data(self.id).children.iter().map(move |id| doc.get(*id))
    }

    /// Only element children
    pub fn element_children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        self.children().filter(|n| n.is_element())
    }

    pub fn has_children(&self) -> bool {
        !self.doc.data(self.id).children.is_empty()
    }

    /// Siblings after this node, in document order
    pub fn next_siblings(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        let id = self.id;
        let following: &'a [NodeId] = match self.doc.data(id).parent {
            Some(parent) => {
                let siblings = &doc.data(parent).children;
                match siblings.iter().position(|s| *s == id) {
                    Some(pos) => &siblings[pos + 1..],
                    None => &[],
                }
            }
            None => &[],
        };
        following.iter().map(move |s| doc.get(*s))
    }

    /// Whether this node is the final child of its parent
    pub fn is_last_child(&self) -> bool {
        self.parent()
            .and_then(|p| p.doc.data(p.id).children.last().copied())
            .is_some_and(|last| last == self.id)
    }

    /// Ancestors from the parent upward, capped at [`MAX_DEPTH`] hops
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        std::iter::successors(self.parent(), |n| n.parent()).take(MAX_DEPTH)
    }

    /// Descendants in document order, excluding this node
    pub fn descendants(&self) -> Descendants<'a> {
        let mut stack: Vec<NodeId> = self.doc.data(self.id).children.clone();
        stack.reverse();
        Descendants {
            doc: self.doc,
            stack,
        }
    }

    /// First descendant with the given tag
    pub fn find_first(&self, tag: Tag) -> Option<NodeRef<'a>> {
        self.descendants().find(|n| n.tag() == tag)
    }

    /// All descendants with the given tag
    pub fn find_all(&self, tag: Tag) -> Vec<NodeRef<'a>> {
        self.descendants().filter(|n| n.tag() == tag).collect()
    }

    /// All descendant elements carrying `class`
    pub fn find_all_with_class(&self, class: &str) -> Vec<NodeRef<'a>> {
        self.descendants().filter(|n| n.has_class(class)).collect()
    }

    /// Flattened text of this node and all descendants
    pub fn text_content(&self) -> String {
        match self.kind() {
            NodeKind::Text(text) => text.clone(),
            _ => self
                .descendants()
                .filter(|n| n.is_text())
                .map(|n| n.text())
                .collect(),
        }
    }

    /// Flattened text is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        match self.kind() {
            NodeKind::Text(text) => text.trim().is_empty(),
            _ => self
                .descendants()
                .filter(|n| n.is_text())
                .all(|n| n.text().trim().is_empty()),
        }
    }

    pub fn has_ancestor_tag(&self, tag: Tag) -> bool {
        self.ancestors().any(|a| a.tag() == tag)
    }

    pub fn has_ancestor_class(&self, class: &str) -> bool {
        self.ancestors().any(|a| a.has_class(class))
    }

    /// Whether no later sibling shares this node's tag
    pub fn is_last_of_kind(&self) -> bool {
        let tag = self.tag_name();
        match self.parent() {
            Some(parent) => parent
                .children()
                .filter(|c| c.tag_name() == tag)
                .last()
                .is_some_and(|last| last.id == self.id),
            None => true,
        }
    }

    /// 1-based position among the parent's children sharing this tag
    pub fn index_among_kind(&self) -> usize {
        let tag = self.tag_name();
        match self.parent() {
            Some(parent) => {
                parent
                    .children()
                    .filter(|c| c.tag_name() == tag)
                    .position(|c| c.id == self.id)
                    .unwrap_or(0)
                    + 1
            }
            None => 1,
        }
    }

    /// List nesting level used for indentation.
    ///
    /// Starts at -1 and counts list ancestors of an `li`, or `li` ancestors of
    /// a `ul`/`ol`. Every other node stays at -1.
    pub fn list_indent_level(&self) -> i32 {
        let tag = self.tag();
        let mut level = -1;
        for ancestor in self.ancestors() {
            let ancestor_tag = ancestor.tag();
            if (tag == Tag::Li && ancestor_tag.is_list())
                || (tag.is_list() && ancestor_tag == Tag::Li)
            {
                level += 1;
            }
        }
        level
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let doc = self.doc;
        let id = self.stack.pop()?;
        self.stack
            .extend(doc.data(id).children.iter().rev().copied());
        Some(doc.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_create_element() {
        let mut doc = Document::new();
        let div = doc.append_element(doc.root_id(), "DIV", Vec::new());
        let node = doc.get(div);
        assert!(node.is_element());
        assert_eq!(node.tag_name(), "div");
        assert_eq!(node.tag(), Tag::Div);
    }

    #[test]
    fn test_attributes_and_classes() {
        let mut doc = Document::new();
        let id = doc.append_element(
            doc.root_id(),
            "div",
            attrs(&[("id", "content-wrap"), ("class", "section  clear")]),
        );
        let node = doc.get(id);
        assert_eq!(node.element_id(), Some("content-wrap"));
        assert!(node.has_class("section"));
        assert!(node.has_class("clear"));
        assert!(!node.has_class("sect"));
        assert_eq!(node.attr("href"), None);
    }

    #[test]
    fn test_text_content_and_blank() {
        let mut doc = Document::new();
        let div = doc.append_element(doc.root_id(), "div", Vec::new());
        doc.append_text(div, "Hello ");
        let span = doc.append_element(div, "span", Vec::new());
        doc.append_text(span, "World");
        let empty = doc.append_element(doc.root_id(), "div", Vec::new());
        doc.append_text(empty, " \n ");

        assert_eq!(doc.get(div).text_content(), "Hello World");
        assert!(!doc.get(div).is_blank());
        assert!(doc.get(empty).is_blank());
    }

    #[test]
    fn test_detach_and_clear() {
        let mut doc = Document::new();
        let pre = doc.append_element(doc.root_id(), "pre", Vec::new());
        let code = doc.append_element(pre, "code", Vec::new());
        doc.append_text(code, "x");
        doc.clear_children(pre);
        assert!(!doc.get(pre).has_children());
        assert!(doc.get(code).parent().is_none());

        let span = doc.append_element(pre, "span", Vec::new());
        doc.detach(span);
        assert!(!doc.get(pre).has_children());
    }

    #[test]
    fn test_siblings_and_last_of_kind() {
        let mut doc = Document::new();
        let ul = doc.append_element(doc.root_id(), "ul", Vec::new());
        let first = doc.append_element(ul, "li", Vec::new());
        let second = doc.append_element(ul, "li", Vec::new());
        let trailing = doc.append_text(ul, "\n");

        assert!(!doc.get(first).is_last_of_kind());
        assert!(doc.get(second).is_last_of_kind());
        assert!(!doc.get(second).is_last_child());
        assert!(doc.get(trailing).is_last_child());
        assert_eq!(doc.get(second).index_among_kind(), 2);
        assert_eq!(doc.get(first).next_siblings().count(), 2);
    }

    #[test]
    fn test_list_indent_level() {
        let mut doc = Document::new();
        let ul = doc.append_element(doc.root_id(), "ul", Vec::new());
        let li = doc.append_element(ul, "li", Vec::new());
        let inner = doc.append_element(li, "ol", Vec::new());
        let inner_li = doc.append_element(inner, "li", Vec::new());
        let p = doc.append_element(inner_li, "p", Vec::new());

        assert_eq!(doc.get(ul).list_indent_level(), -1);
        assert_eq!(doc.get(li).list_indent_level(), 0);
        assert_eq!(doc.get(inner).list_indent_level(), 0);
        assert_eq!(doc.get(inner_li).list_indent_level(), 1);
        assert_eq!(doc.get(p).list_indent_level(), -1);
    }

    #[test]
    fn test_descendants_document_order() {
        let mut doc = Document::new();
        let a = doc.append_element(doc.root_id(), "div", Vec::new());
        let b = doc.append_element(a, "h1", Vec::new());
        doc.append_element(b, "span", Vec::new());
        doc.append_element(a, "h2", Vec::new());

        let tags: Vec<&str> = doc.root().descendants().map(|n| n.tag_name()).collect();
        assert_eq!(tags, vec!["div", "h1", "span", "h2"]);
        assert_eq!(doc.root().find_first(Tag::H2).map(|n| n.tag()), Some(Tag::H2));
        assert!(doc.get(b).has_ancestor_tag(Tag::Div));
    }
}
