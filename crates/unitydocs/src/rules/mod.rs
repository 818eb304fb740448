//! Rule system for HTML to Markdown conversion.

mod rule;
mod unity;

pub use rule::{AffixFn, Filter, Rule};
pub use unity::{unity_rules, SIGNATURE_BLOCK_CLASS};

use indexmap::IndexMap;

use crate::node::NodeRef;
use crate::service::ConvertOptions;

/// Ordered collection of rules; the first match wins
pub struct Rules {
    /// Custom rules added by the user (checked first)
    custom_rules: IndexMap<String, Rule>,
    /// Built-in rules for Unity's documentation export
    unity_rules: Vec<Rule>,
}

impl Rules {
    /// Create a new Rules instance with the built-in Unity rules
    pub fn new() -> Self {
        Self {
            custom_rules: IndexMap::new(),
            unity_rules: unity_rules(),
        }
    }

    /// Add a custom rule, replacing any earlier rule under the same key
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    /// Find the rule for a node
    pub fn for_node<'a>(&'a self, node: &NodeRef<'_>, options: &ConvertOptions) -> Option<&'a Rule> {
        let tag = node.tag();

        self.custom_rules
            .values()
            .chain(self.unity_rules.iter())
            .find(|rule| rule.filter.matches(tag, node, options))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
