use crate::node::Node;
use log;

fn segment_matches(node: &Node, segment: &str) -> bool {
    node.name == segment || (node.has_order_index && node.raw_name() == segment)
}

/// Every root-to-node path, root included, whose trailing segments equal
/// `query`. Paths come back in raw-name form, in pre-order.
pub fn find_paths(root: &Node, query: &[&str]) -> Vec<Vec<String>> {
    let mut found = Vec::new();
    if query.is_empty() {
        return found;
    }
    let mut trail: Vec<&Node> = Vec::new();
    walk(root, query, &mut trail, &mut found);
    log::debug!("Path lookup {:?} matched {} path(s)", query, found.len());
    found
}

fn walk<'a>(
    node: &'a Node,
    query: &[&str],
    trail: &mut Vec<&'a Node>,
    found: &mut Vec<Vec<String>>,
) {
    trail.push(node);
    if trail.len() >= query.len() {
        let tail = &trail[trail.len() - query.len()..];
        if tail
            .iter()
            .zip(query)
            .all(|(node, segment)| segment_matches(node, segment))
        {
            found.push(trail.iter().map(|n| n.raw_name()).collect());
        }
    }
    for child in &node.children {
        walk(child, query, trail, found);
    }
    trail.pop();
}

/// Splits `a/b/c` (or `a\b\c`) into non-empty segments.
pub fn split_query(path: &str) -> Vec<&str> {
    path.split(['/', '\\']).filter(|s| !s.is_empty()).collect()
}
