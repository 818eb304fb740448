//! UnityDocsConverter - the main entry point for HTML to Markdown conversion.

use crate::html::{parse_fragment, parse_html};
use crate::node::{NodeRef, Tag};
use crate::normalize::normalize;
use crate::rules::{Rule, Rules, SIGNATURE_BLOCK_CLASS};
use crate::segment::{locate_content, segment_container};
use crate::utilities::{collapse_blank_lines, escape_text, normalize_quotes, trim_after_terminator};
use crate::Result;

/// Options for UnityDocsConverter
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Fence string for fenced code blocks
    pub fence: String,

    /// Language tag written after the opening fence
    pub code_language: String,

    /// Bullet list marker
    pub bullet_list_marker: char,

    /// `id` of the trailing block that ends a manual page
    pub content_sentinel_id: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            fence: "```".to_string(),
            code_language: "csharp".to_string(),
            bullet_list_marker: '*',
            content_sentinel_id: "_content".to_string(),
        }
    }
}

/// Converts Unity documentation pages to Markdown.
///
/// The converter holds no per-document state, so one instance can be shared
/// across threads converting different pages.
pub struct UnityDocsConverter {
    options: ConvertOptions,
    rules: Rules,
}

impl UnityDocsConverter {
    /// Create a new UnityDocsConverter with default options
    pub fn new() -> Self {
        Self {
            options: ConvertOptions::default(),
            rules: Rules::new(),
        }
    }

    /// Create a UnityDocsConverter with custom options
    pub fn with_options(options: ConvertOptions) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// Convert a complete exported page to Markdown.
    ///
    /// Either the whole page converts or an error is returned; there is no
    /// partial output.
    pub fn convert(&self, html: &str) -> Result<String> {
        let mut document = parse_html(html);
        let container = locate_content(&document)?;
        normalize(&mut document, container);

        let segment = segment_container(document.get(container), &self.options)?;

        let mut output = format!("# {}\n\n", escape_text(&segment.title));
        for node in &segment.span {
            output.push_str(&self.render(node)?);
        }

        Ok(self.post_process(&output))
    }

    /// Render an HTML fragment without page segmentation
    pub fn convert_fragment(&self, html: &str) -> Result<String> {
        let document = parse_fragment(html);
        let mut output = String::new();
        for child in document.root().children() {
            output.push_str(&self.render(&child)?);
        }
        Ok(output)
    }

    /// Render one node and its subtree.
    ///
    /// Nodes whose text is blank render to nothing, except images and line
    /// breaks.
    pub fn render(&self, node: &NodeRef<'_>) -> Result<String> {
        let tag = node.tag();
        if node.is_blank() && !matches!(tag, Tag::Img | Tag::Br) {
            return Ok(String::new());
        }

        let rule = self.rules.for_node(node, &self.options);
        let mut output = String::new();

        if let Some(prefix) = rule.map(|r| r.prefix(node, &self.options)).transpose()?.flatten() {
            output.push_str(&prefix);
        }

        if node.has_children() {
            for child in node.children() {
                output.push_str(&self.render(&child)?);
            }
        } else {
            output.push_str(&content(node));
        }

        if let Some(suffix) = rule.map(|r| r.suffix(node, &self.options)).transpose()?.flatten() {
            output.push_str(&suffix);
        }

        Ok(output)
    }

    /// Add a custom rule, checked before the built-in ones
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Get the current options
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut ConvertOptions {
        &mut self.options
    }

    /// Post-process the result
    fn post_process(&self, output: &str) -> String {
        collapse_blank_lines(output)
    }
}

impl Default for UnityDocsConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Text of a leaf node.
///
/// Prose is escaped so `<` and `&` survive a Markdown renderer; code keeps
/// its characters literally.
fn content(node: &NodeRef<'_>) -> String {
    let text = match node.tag() {
        Tag::Br => return "\n".to_string(),
        Tag::Img => node.attr("alt").unwrap_or_default().to_string(),
        Tag::Text if node.is_last_child() => {
            let text = trim_after_terminator(node.text());
            if closes_code_block(node) {
                // The closing fence supplies the final newline
                text.trim_end().to_string()
            } else {
                text
            }
        }
        _ => node.text_content(),
    };

    let text = normalize_quotes(&text);
    if node.is_text() && !in_code(node) {
        escape_text(&text)
    } else {
        text
    }
}

fn in_code(node: &NodeRef<'_>) -> bool {
    node.has_ancestor_tag(Tag::Pre)
        || node.has_ancestor_tag(Tag::Code)
        || node.has_ancestor_class(SIGNATURE_BLOCK_CLASS)
}

fn closes_code_block(node: &NodeRef<'_>) -> bool {
    node.parent()
        .is_some_and(|p| p.tag() == Tag::Pre || p.has_class(SIGNATURE_BLOCK_CLASS))
}
