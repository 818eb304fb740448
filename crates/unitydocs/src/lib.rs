//! # unitydocs
//!
//! Convert Unity's exported HTML documentation pages to Markdown.
//!
//! ## Design
//!
//! A page goes through a fixed pipeline:
//!
//! 1. **Parse** the HTML with `scraper` into an arena [`Document`].
//! 2. **Normalize** the content container: drop tooltip spans, flatten
//!    `pre > code` blocks into plain text.
//! 3. **Segment** the page: scripting API pages (with `subsection` blocks)
//!    render each block; manual pages render everything after the title
//!    heading up to the trailing feedback block.
//! 4. **Render** each node through an ordered table of [`Rule`]s that
//!    supply a Markdown prefix and suffix per node.
//! 5. **Collapse** runs of blank lines.
//!
//! ## Example
//!
//! ```rust
//! use unitydocs::UnityDocsConverter;
//!
//! let converter = UnityDocsConverter::new();
//! let markdown = converter
//!     .convert_fragment("<p>abc <strong>def</strong> hij</p>")
//!     .unwrap();
//! assert_eq!(markdown, "abc **def** hij\n\n");
//! ```

pub mod html;
#[cfg(feature = "markdown")]
pub mod markdown;
pub mod node;
pub mod normalize;
mod rules;
pub mod segment;
mod service;
mod utilities;

pub use html::{parse_fragment, parse_html};
#[cfg(feature = "markdown")]
pub use markdown::markdown_to_html;
pub use node::{Document, NodeId, NodeKind, NodeRef, Tag};
pub use rules::{AffixFn, Filter, Rule, Rules};
pub use segment::{ConversionMode, Segment};
pub use service::{ConvertOptions, UnityDocsConverter};
pub use utilities::collapse_blank_lines;

/// Error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The page does not have the layout of Unity's documentation export
    #[error("Unexpected page structure: {0}")]
    Structure(String),

    /// An element lacks an attribute needed to render it
    #[error("Missing `{attribute}` attribute on <{tag}>")]
    MissingAttribute { tag: String, attribute: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

/// Convert a complete Unity documentation page with default options
pub fn convert(html: &str) -> Result<String> {
    UnityDocsConverter::new().convert(html)
}
