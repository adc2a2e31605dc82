use crate::node::Node;
use log;
#[cfg(feature = "serde_support")]
use serde::Serialize;

pub mod leaf;
pub mod named;
pub mod pattern;
pub mod repeat;

pub use leaf::collapse_leaves;
pub use named::collapse_named;
pub use pattern::{SeenPatterns, collapse_patterns};
pub use repeat::{Run, collapse_repeats, find_best_run};

/// Which passes `compact` runs. Every algorithmic pass is on by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapseOptions {
    pub repeats: bool,
    pub patterns: bool,
    pub leaves: bool,
    /// Nodes with these exact names always lose their children.
    pub named: Vec<String>,
}

impl Default for CollapseOptions {
    fn default() -> Self {
        Self {
            repeats: true,
            patterns: true,
            leaves: true,
            named: Vec::new(),
        }
    }
}

/// Runs the enabled passes in their fixed order: repeated runs, duplicate
/// patterns, duplicate leaves, then the named override.
pub fn compact(root: Node, options: &CollapseOptions) -> Node {
    log::debug!(
        "Compacting tree '{}' ({} nodes) with {:?}",
        root.name,
        root.node_count(),
        options
    );
    let mut tree = root;
    if options.repeats {
        tree = collapse_repeats(tree);
        log::trace!("After repeated-run pass: {} nodes", tree.node_count());
    }
    if options.patterns {
        tree = collapse_patterns(tree);
        log::trace!("After pattern pass: {} nodes", tree.node_count());
    }
    if options.leaves {
        tree = collapse_leaves(tree);
        log::trace!("After leaf pass: {} nodes", tree.node_count());
    }
    if !options.named.is_empty() {
        tree = collapse_named(tree, &options.named);
        log::trace!("After named pass: {} nodes", tree.node_count());
    }
    log::debug!("Compaction finished: {} nodes visible.", tree.node_count());
    tree
}

/// Totals of what a compacted tree still shows and what it folded away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize))]
#[cfg_attr(feature = "serde_support", serde(rename_all = "camelCase"))]
pub struct CompactionStats {
    pub visible_nodes: usize,
    pub folded_repeats: usize,
    pub pattern_elided: usize,
    pub leaf_elided: usize,
}

impl CompactionStats {
    pub fn of(root: &Node) -> Self {
        let mut stats = CompactionStats::default();
        stats.accumulate(root);
        stats
    }

    fn accumulate(&mut self, node: &Node) {
        self.visible_nodes += 1;
        self.folded_repeats += node.subsequent_repeated;
        self.pattern_elided += node.collapsed_pattern_children;
        self.leaf_elided += node.collapsed_leaf_children;
        for child in &node.children {
            self.accumulate(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn call(name: &str, children: &[&str]) -> Node {
        Node::new(name).with_children(children.iter().map(|c| Node::new(c)).collect())
    }

    #[test]
    fn disabled_passes_leave_tree_untouched() {
        let root = Node::new("root").with_children(vec![
            Node::new("a"),
            Node::new("a"),
            Node::new("a"),
        ]);
        let options = CollapseOptions {
            repeats: false,
            patterns: false,
            leaves: false,
            named: Vec::new(),
        };
        assert_eq!(compact(root.clone(), &options), root);
    }

    #[test]
    fn passes_run_in_order() {
        // The second CallA is not adjacent to the first, so only the pattern
        // pass can elide it. Once bare, it is the first leaf named CallA
        // and survives the leaf pass, while the repeated Log leaves do not.
        let root = Node::new("trace").with_children(vec![
            call("CallA", &["Read", "Write"]),
            Node::new("Log"),
            call("CallA", &["Read", "Write"]),
            Node::new("Flush"),
            Node::new("Log"),
        ]);
        let compacted = compact(root, &CollapseOptions::default());
        let names: Vec<&str> = compacted.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["CallA", "Log", "CallA", "Flush"]);
        assert_eq!(compacted.collapsed_leaf_children, 1);
        assert_eq!(compacted.children[0].children.len(), 2);
        assert!(compacted.children[2].children.is_empty());
        assert_eq!(compacted.children[2].collapsed_pattern_children, 2);
    }

    #[test]
    fn named_override_applies_last() {
        let root = Node::new("root").with_children(vec![call("node_modules", &["a", "b", "c"])]);
        let options = CollapseOptions {
            named: vec!["node_modules".to_string()],
            ..CollapseOptions::default()
        };
        let compacted = compact(root, &options);
        let modules = &compacted.children[0];
        assert!(modules.children.is_empty());
        assert_eq!(modules.collapsed_pattern_children, 3);
    }

    #[test]
    fn stats_sum_counters() {
        let root = Node::new("root").with_children(vec![
            Node::new("a"),
            Node::new("a"),
            Node::new("a"),
            call("b", &["x"]),
        ]);
        let compacted = compact(root, &CollapseOptions::default());
        let stats = CompactionStats::of(&compacted);
        assert_eq!(stats.visible_nodes, 4);
        assert_eq!(stats.folded_repeats, 2);
        assert_eq!(stats.pattern_elided, 0);
        assert_eq!(stats.leaf_elided, 0);
    }
}
