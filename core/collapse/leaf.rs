use crate::node::Node;
use log;
use std::collections::HashSet;

/// Bottom-up removal of duplicate childless siblings. The first leaf with a
/// given name stays; the parent counts the rest. Nodes emptied by earlier
/// passes count as leaves here.
pub fn collapse_leaves(mut node: Node) -> Node {
    let children = std::mem::take(&mut node.children);
    let mut seen_leaves: HashSet<String> = HashSet::new();
    let mut kept = Vec::with_capacity(children.len());
    let mut removed = 0;

    for child in children.into_iter().map(collapse_leaves) {
        if child.is_leaf() && !seen_leaves.insert(child.name.clone()) {
            log::trace!("Dropping duplicate leaf '{}' under '{}'", child.name, node.name);
            removed += 1;
            continue;
        }
        kept.push(child);
    }

    node.children = kept;
    node.collapsed_leaf_children += removed;
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(node: &Node) -> Vec<&str> {
        node.children.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn keeps_first_of_non_adjacent_duplicates() {
        let root = Node::new("root").with_children(
            ["LeafA", "LeafB", "LeafA", "LeafC", "LeafA"]
                .iter()
                .map(|n| Node::new(n))
                .collect(),
        );
        let out = collapse_leaves(root);
        assert_eq!(names(&out), vec!["LeafA", "LeafB", "LeafC"]);
        assert_eq!(out.collapsed_leaf_children, 2);
    }

    #[test]
    fn non_leaves_are_never_removed() {
        let branch = || Node::new("dir").with_children(vec![Node::new("x")]);
        let root = Node::new("root").with_children(vec![branch(), Node::new("dir"), branch()]);
        let out = collapse_leaves(root);
        assert_eq!(names(&out), vec!["dir", "dir", "dir"]);
        assert_eq!(out.collapsed_leaf_children, 0);
    }

    #[test]
    fn emptied_nodes_count_as_leaves() {
        let mut emptied = Node::new("CallA");
        emptied.collapsed_pattern_children = 3;
        let root = Node::new("root").with_children(vec![
            Node::new("CallA"),
            Node::new("other"),
            emptied,
        ]);
        let out = collapse_leaves(root);
        assert_eq!(names(&out), vec!["CallA", "other"]);
        assert_eq!(out.collapsed_leaf_children, 1);
    }

    #[test]
    fn counts_land_on_each_parent() {
        let root = Node::new("root").with_children(vec![
            Node::new("a").with_children(vec![Node::new("x"), Node::new("x")]),
            Node::new("b").with_children(vec![Node::new("x"), Node::new("y"), Node::new("y")]),
        ]);
        let out = collapse_leaves(root);
        assert_eq!(out.collapsed_leaf_children, 0);
        assert_eq!(out.children[0].collapsed_leaf_children, 1);
        assert_eq!(names(&out.children[1]), vec!["x", "y"]);
        assert_eq!(out.children[1].collapsed_leaf_children, 1);
    }
}
