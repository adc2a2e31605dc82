use crate::fingerprint::{Signature, fingerprint};
use crate::node::Node;
use log;
use std::collections::{HashMap, HashSet};

/// Subtrees already shown in full, keyed by node name.
#[derive(Debug, Default)]
pub struct SeenPatterns {
    by_name: HashMap<String, HashSet<Signature>>,
}

impl SeenPatterns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str, signature: &Signature) -> bool {
        self.by_name
            .get(name)
            .is_some_and(|sigs| sigs.contains(signature))
    }

    /// Returns `false` when the pair was already recorded.
    pub fn record(&mut self, name: &str, signature: Signature) -> bool {
        self.by_name
            .entry(name.to_string())
            .or_default()
            .insert(signature)
    }

    pub fn len(&self) -> usize {
        self.by_name.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Pre-order walk that strips the children of any node whose name and
/// shape were already displayed earlier anywhere in the tree.
pub fn collapse_patterns(root: Node) -> Node {
    let mut seen = SeenPatterns::new();
    collapse_patterns_with(root, &mut seen)
}

pub fn collapse_patterns_with(mut node: Node, seen: &mut SeenPatterns) -> Node {
    let signature = fingerprint(&node);
    if !seen.record(&node.name, signature) {
        if !node.children.is_empty() {
            log::trace!(
                "Eliding {} children of repeated pattern '{}'",
                node.children.len(),
                node.name
            );
            node.collapsed_pattern_children += node.children.len();
            node.children.clear();
        }
        return node;
    }
    let children = std::mem::take(&mut node.children);
    node.children = children
        .into_iter()
        .map(|child| collapse_patterns_with(child, seen))
        .collect();
    node
}
