use once_cell::sync::Lazy;
use regex::Regex;
#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

static ORDER_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)_(.+)$").expect("order prefix regex is valid")
});

/// One entry of a displayed tree: a file, a directory, or any named item.
///
/// Nodes are built once (by the builder or the parser), pruned and annotated
/// by the collapse passes, and finally rendered by the printer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde_support", serde(rename_all = "camelCase"))]
pub struct Node {
    pub name: String,
    #[cfg_attr(feature = "serde_support", serde(default, skip_serializing_if = "is_zero"))]
    pub order_index: u64,
    #[cfg_attr(feature = "serde_support", serde(default, skip_serializing_if = "is_false"))]
    pub has_order_index: bool,
    /// Prefix digits as written, kept only when they differ from `order_index`
    /// (leading zeros), so `raw_name` reproduces the original entry.
    #[cfg_attr(feature = "serde_support", serde(default, skip_serializing_if = "Option::is_none"))]
    pub order_digits: Option<String>,
    #[cfg_attr(feature = "serde_support", serde(default, skip_serializing_if = "is_false"))]
    pub is_directory: bool,
    /// Extra consecutive copies of this node that were elided right after it.
    #[cfg_attr(feature = "serde_support", serde(default, skip_serializing_if = "is_zero_usize"))]
    pub subsequent_repeated: usize,
    /// Children dropped because this subtree was already shown earlier.
    #[cfg_attr(feature = "serde_support", serde(default, skip_serializing_if = "is_zero_usize"))]
    pub collapsed_pattern_children: usize,
    /// Duplicate leaf children dropped from this node's own child list.
    #[cfg_attr(feature = "serde_support", serde(default, skip_serializing_if = "is_zero_usize"))]
    pub collapsed_leaf_children: usize,
    #[cfg_attr(feature = "serde_support", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<Node>,
}

#[cfg(feature = "serde_support")]
fn is_zero(v: &u64) -> bool {
    *v == 0
}
#[cfg(feature = "serde_support")]
fn is_zero_usize(v: &usize) -> bool {
    *v == 0
}
#[cfg(feature = "serde_support")]
fn is_false(v: &bool) -> bool {
    !*v
}

/// Splits a `"<digits>_<rest>"` raw name into its order index and display name.
pub fn split_order_prefix(raw_name: &str) -> (Option<u64>, &str) {
    match parse_order_prefix(raw_name) {
        Some((index, _, rest)) => (Some(index), rest),
        None => (None, raw_name),
    }
}

fn parse_order_prefix(raw_name: &str) -> Option<(u64, &str, &str)> {
    let caps = ORDER_PREFIX.captures(raw_name)?;
    let digits = caps.get(1)?.as_str();
    let rest = caps.get(2)?.as_str();
    let index = digits.parse::<u64>().ok()?;
    Some((index, digits, rest))
}

impl Node {
    pub fn new(raw_name: &str) -> Self {
        match parse_order_prefix(raw_name) {
            Some((index, digits, name)) => Node {
                name: name.to_string(),
                order_index: index,
                has_order_index: true,
                order_digits: (digits != index.to_string()).then(|| digits.to_string()),
                ..Node::default()
            },
            None => Node {
                name: raw_name.to_string(),
                ..Node::default()
            },
        }
    }

    pub fn directory(raw_name: &str) -> Self {
        Node {
            is_directory: true,
            ..Node::new(raw_name)
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// The name as it appeared before the order prefix was stripped.
    pub fn raw_name(&self) -> String {
        match (self.has_order_index, &self.order_digits) {
            (true, Some(digits)) => format!("{}_{}", digits, self.name),
            (true, None) => format!("{}_{}", self.order_index, self.name),
            (false, _) => self.name.clone(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn elided_children(&self) -> usize {
        self.collapsed_pattern_children + self.collapsed_leaf_children
    }

    /// Visible nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Directories first, then indexed before unindexed, then by index, then by name.
    pub fn display_order(a: &Node, b: &Node) -> Ordering {
        b.is_directory
            .cmp(&a.is_directory)
            .then_with(|| b.has_order_index.cmp(&a.has_order_index))
            .then_with(|| {
                if a.has_order_index && b.has_order_index {
                    a.order_index.cmp(&b.order_index)
                } else {
                    Ordering::Equal
                }
            })
            .then_with(|| a.name.cmp(&b.name))
    }

    pub fn sort_recursive(&mut self) {
        self.children.sort_by(Node::display_order);
        for child in &mut self.children {
            child.sort_recursive();
        }
    }
}
