use crate::node::Node;
use log;
use std::collections::HashSet;

/// Strips the children of every node whose name is in `names`, whatever the
/// other passes decided.
pub fn collapse_named(root: Node, names: &[String]) -> Node {
    let blocked: HashSet<&str> = names.iter().map(String::as_str).collect();
    collapse_blocked(root, &blocked)
}

fn collapse_blocked(mut node: Node, blocked: &HashSet<&str>) -> Node {
    if blocked.contains(node.name.as_str()) {
        if !node.children.is_empty() {
            log::trace!(
                "Collapsing named node '{}' ({} children)",
                node.name,
                node.children.len()
            );
            node.collapsed_pattern_children += node.children.len();
            node.children.clear();
        }
        return node;
    }
    let children = std::mem::take(&mut node.children);
    node.children = children
        .into_iter()
        .map(|child| collapse_blocked(child, blocked))
        .collect();
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn collapses_matching_names_at_any_depth() {
        let root = Node::directory("repo").with_children(vec![
            Node::directory("target").with_children(vec![Node::new("a"), Node::new("b")]),
            Node::directory("src").with_children(vec![
                Node::directory("target").with_children(vec![Node::new("c")]),
                Node::new("main.rs"),
            ]),
        ]);
        let out = collapse_named(root, &["target".to_string()]);
        assert_eq!(out.children[0].collapsed_pattern_children, 2);
        assert!(out.children[0].children.is_empty());
        let nested = &out.children[1].children[0];
        assert_eq!(nested.collapsed_pattern_children, 1);
        assert_eq!(out.children[1].children.len(), 2);
    }

    #[test]
    fn adds_to_existing_counter() {
        let mut node = Node::new("vendor").with_children(vec![Node::new("x")]);
        node.collapsed_pattern_children = 4;
        let out = collapse_named(node, &["vendor".to_string()]);
        assert_eq!(out.collapsed_pattern_children, 5);
    }

    #[test]
    fn match_is_exact() {
        let root = Node::new("root").with_children(vec![
            Node::new("targets").with_children(vec![Node::new("x")]),
        ]);
        let out = collapse_named(root.clone(), &["target".to_string()]);
        assert_eq!(out, root);
    }
}
