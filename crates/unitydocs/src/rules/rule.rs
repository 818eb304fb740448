//! Rule and Filter types for HTML conversion.

use crate::node::{NodeRef, Tag};
use crate::service::ConvertOptions;
use crate::Result;

/// Type alias for prefix and suffix functions
pub type AffixFn = Box<dyn Fn(&NodeRef<'_>, &ConvertOptions) -> Result<Option<String>> + Send + Sync>;

/// A filter determines which nodes a rule applies to
pub enum Filter {
    /// Match a single tag
    Tag(Tag),
    /// Match any of multiple tags
    Tags(Vec<Tag>),
    /// Match using a predicate function
    Predicate(Box<dyn Fn(Tag, &NodeRef<'_>, &ConvertOptions) -> bool + Send + Sync>),
}

impl Filter {
    /// Create a filter for a single tag
    pub fn tag(tag: Tag) -> Self {
        Filter::Tag(tag)
    }

    /// Create a filter for multiple tags
    pub fn tags(tags: &[Tag]) -> Self {
        Filter::Tags(tags.to_vec())
    }

    /// Create a filter with a predicate
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(Tag, &NodeRef<'_>, &ConvertOptions) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    /// Check if this filter matches a node
    pub fn matches(&self, tag: Tag, node: &NodeRef<'_>, options: &ConvertOptions) -> bool {
        match self {
            Filter::Tag(t) => tag == *t,
            Filter::Tags(tags) => tags.contains(&tag),
            Filter::Predicate(f) => f(tag, node, options),
        }
    }
}

/// A rule supplies the Markdown emitted before and after a matched node.
///
/// `None` from either side means nothing is emitted there.
pub struct Rule {
    /// Filter to determine which nodes this rule applies to
    pub filter: Filter,
    prefix: AffixFn,
    suffix: AffixFn,
}

impl Rule {
    /// Create a new rule
    pub fn new<P, S>(filter: Filter, prefix: P, suffix: S) -> Self
    where
        P: Fn(&NodeRef<'_>, &ConvertOptions) -> Result<Option<String>> + Send + Sync + 'static,
        S: Fn(&NodeRef<'_>, &ConvertOptions) -> Result<Option<String>> + Send + Sync + 'static,
    {
        Self {
            filter,
            prefix: Box::new(prefix),
            suffix: Box::new(suffix),
        }
    }

    /// Create a rule that matches a single tag
    pub fn for_tag<P, S>(tag: Tag, prefix: P, suffix: S) -> Self
    where
        P: Fn(&NodeRef<'_>, &ConvertOptions) -> Result<Option<String>> + Send + Sync + 'static,
        S: Fn(&NodeRef<'_>, &ConvertOptions) -> Result<Option<String>> + Send + Sync + 'static,
    {
        Self::new(Filter::tag(tag), prefix, suffix)
    }

    /// Create a rule that wraps matched nodes in fixed delimiters
    pub fn delimited(filter: Filter, open: Option<&'static str>, close: Option<&'static str>) -> Self {
        Self::new(
            filter,
            move |_, _| Ok(open.map(str::to_string)),
            move |_, _| Ok(close.map(str::to_string)),
        )
    }

    /// Markdown emitted before the node's content
    pub fn prefix(&self, node: &NodeRef<'_>, options: &ConvertOptions) -> Result<Option<String>> {
        (self.prefix)(node, options)
    }

    /// Markdown emitted after the node's content
    pub fn suffix(&self, node: &NodeRef<'_>, options: &ConvertOptions) -> Result<Option<String>> {
        (self.suffix)(node, options)
    }
}
