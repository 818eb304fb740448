//! Rendering rules for Unity's documentation export.
//!
//! Order matters: class and ancestor conditions come before the bare-tag
//! rules they refine.

use super::{Filter, Rule};
use crate::node::{NodeRef, Tag};
use crate::service::ConvertOptions;
use crate::utilities::{escape_text, indent, normalize_quotes, rewrite_href};
use crate::ConvertError;

/// Class marking a member signature block
pub const SIGNATURE_BLOCK_CLASS: &str = "sig-block";

/// Create all Unity rules
pub fn unity_rules() -> Vec<Rule> {
    vec![
        signature_block_rule(),
        table_rule(),
        table_head_rule(),
        table_row_rule(),
        table_cell_rule(),
        heading_rule(),
        image_rule(),
        figure_caption_rule(),
        figure_rule(),
        signature_link_rule(),
        link_rule(),
        code_rule(),
        strong_rule(),
        code_block_rule(),
        list_rule(),
        bullet_item_rule(),
        ordered_item_rule(),
        list_paragraph_rule(),
        paragraph_rule(),
    ]
}

fn fence_open(node: &NodeRef<'_>, options: &ConvertOptions) -> String {
    format!(
        "{}{}{}\n",
        indent(node.list_indent_level()),
        options.fence,
        options.code_language
    )
}

fn fence_close(options: &ConvertOptions) -> String {
    format!("\n{}\n\n", options.fence)
}

fn signature_block_rule() -> Rule {
    Rule::new(
        Filter::predicate(|tag, node, _| tag == Tag::Div && node.has_class(SIGNATURE_BLOCK_CLASS)),
        |node, options| Ok(Some(fence_open(node, options))),
        |_, options| Ok(Some(fence_close(options))),
    )
}

fn table_rule() -> Rule {
    Rule::for_tag(
        Tag::Table,
        |node, _| {
            let Some(first_row) = node.find_first(Tag::Tr) else {
                return Ok(None);
            };
            let columns = first_row.find_all(Tag::Td).len();
            if columns == 0 {
                return Ok(None);
            }
            if node.find_first(Tag::Thead).is_some() && node.find_first(Tag::Th).is_some() {
                return Ok(None);
            }

            // Markdown tables need a header, so synthesize an empty one
            let header = vec!["     "; columns].join("|");
            let separator = vec![" --- "; columns].join("|");
            Ok(Some(format!(
                "| {} |\n| {}{} |\n",
                header,
                indent(node.list_indent_level()),
                separator
            )))
        },
        |_, _| Ok(Some("\n\n".to_string())),
    )
}

fn table_head_rule() -> Rule {
    Rule::for_tag(
        Tag::Thead,
        |node, _| {
            let mut cells = node.find_all(Tag::Th);
            if cells.is_empty() {
                cells = node.find_all(Tag::Td);
            }
            if cells.is_empty() {
                return Ok(None);
            }
            let header = cells
                .iter()
                .map(|cell| format!(" {} ", escape_text(&normalize_quotes(&cell.text_content()))))
                .collect::<Vec<_>>()
                .join("|");
            Ok(Some(format!("{}\n", header)))
        },
        |_, _| Ok(None),
    )
}

fn table_row_rule() -> Rule {
    Rule::delimited(Filter::tag(Tag::Tr), Some("|"), Some("\n"))
}

fn table_cell_rule() -> Rule {
    Rule::delimited(Filter::tag(Tag::Td), None, Some("|"))
}

fn heading_rule() -> Rule {
    Rule::new(
        Filter::tags(&[Tag::H1, Tag::H2, Tag::H3]),
        |node, _| {
            let level = node.tag().heading_level().unwrap_or(1);
            Ok(Some(format!(
                "{}{} ",
                indent(node.list_indent_level()),
                "#".repeat(level)
            )))
        },
        |_, _| Ok(Some("\n\n".to_string())),
    )
}

fn image_rule() -> Rule {
    Rule::for_tag(
        Tag::Img,
        |node, _| Ok(Some(format!("{}![", indent(node.list_indent_level())))),
        |node, _| Ok(Some(format!("]({})", node.attr("src").unwrap_or_default()))),
    )
}

fn figure_caption_rule() -> Rule {
    Rule::for_tag(
        Tag::Figcaption,
        |node, _| Ok(Some(format!("\n{}| ", indent(node.list_indent_level())))),
        |_, _| Ok(None),
    )
}

fn figure_rule() -> Rule {
    Rule::delimited(Filter::tag(Tag::Figure), None, Some("\n"))
}

fn signature_link_rule() -> Rule {
    // Link syntax is not valid inside a fenced block, keep just the text
    Rule::delimited(
        Filter::predicate(|tag, node, _| {
            tag == Tag::A && node.has_ancestor_class(SIGNATURE_BLOCK_CLASS)
        }),
        None,
        Some(" "),
    )
}

fn link_rule() -> Rule {
    Rule::for_tag(
        Tag::A,
        |_, _| Ok(Some("[".to_string())),
        |node, _| {
            let href = node.attr("href").ok_or_else(|| ConvertError::MissingAttribute {
                tag: node.tag_name().to_string(),
                attribute: "href".to_string(),
            })?;
            let title = node
                .attr("title")
                .map(|t| format!(" \"{}\"", t))
                .unwrap_or_default();
            Ok(Some(format!("]({}{})", rewrite_href(href), title)))
        },
    )
}

fn code_rule() -> Rule {
    Rule::delimited(Filter::tag(Tag::Code), Some("`"), Some("`"))
}

fn strong_rule() -> Rule {
    Rule::delimited(Filter::tag(Tag::Strong), Some("**"), Some("**"))
}

fn code_block_rule() -> Rule {
    Rule::for_tag(
        Tag::Pre,
        |node, options| Ok(Some(fence_open(node, options))),
        |_, options| Ok(Some(fence_close(options))),
    )
}

fn list_rule() -> Rule {
    Rule::new(
        Filter::tags(&[Tag::Ul, Tag::Ol]),
        |_, _| Ok(None),
        |node, _| {
            let nested = node.ancestors().any(|a| a.tag().is_list() || a.tag() == Tag::Li);
            Ok(Some(if nested { String::new() } else { "\n\n".to_string() }))
        },
    )
}

fn list_item_suffix(node: &NodeRef<'_>) -> Option<String> {
    if node.is_last_of_kind() {
        None
    } else {
        Some("\n".to_string())
    }
}

fn parent_is(node: &NodeRef<'_>, tag: Tag) -> bool {
    node.parent().is_some_and(|p| p.tag() == tag)
}

fn bullet_item_rule() -> Rule {
    Rule::new(
        Filter::predicate(|tag, node, _| tag == Tag::Li && parent_is(node, Tag::Ul)),
        |node, options| {
            Ok(Some(format!(
                "{}{} ",
                indent(node.list_indent_level()),
                options.bullet_list_marker
            )))
        },
        |node, _| Ok(list_item_suffix(node)),
    )
}

fn ordered_item_rule() -> Rule {
    Rule::new(
        Filter::predicate(|tag, node, _| tag == Tag::Li && parent_is(node, Tag::Ol)),
        |node, _| {
            Ok(Some(format!(
                "{}{}. ",
                indent(node.list_indent_level()),
                node.index_among_kind()
            )))
        },
        |node, _| Ok(list_item_suffix(node)),
    )
}

fn list_paragraph_rule() -> Rule {
    Rule::delimited(
        Filter::predicate(|tag, node, _| tag == Tag::P && parent_is(node, Tag::Li)),
        None,
        Some("\n"),
    )
}

fn paragraph_rule() -> Rule {
    Rule::delimited(Filter::tag(Tag::P), None, Some("\n\n"))
}
