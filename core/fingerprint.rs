//! Structural signatures for subtrees.
//!
//! A signature is a BLAKE3 digest over a node's name followed by the
//! signatures of its children, in order. Equal signatures mean equal names
//! and equal descendant shapes.

use crate::node::Node;
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; 32]);

impl Signature {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form keeps trace logs readable.
        write!(f, "Signature({}…)", &self.to_string()[..12])
    }
}

pub fn fingerprint(node: &Node) -> Signature {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(node.name.len() as u64).to_le_bytes());
    hasher.update(node.name.as_bytes());
    for child in &node.children {
        hasher.update(fingerprint(child).as_bytes());
    }
    Signature(*hasher.finalize().as_bytes())
}

/// Signatures of each node in a sibling list, in order.
pub fn fingerprint_siblings(nodes: &[Node]) -> Vec<Signature> {
    nodes.iter().map(fingerprint).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(name: &str, children: Vec<Node>) -> Node {
        Node::new(name).with_children(children)
    }

    #[test]
    fn signature_is_deterministic() {
        let a = tree("a", vec![Node::new("x"), Node::new("y")]);
        assert_eq!(fingerprint(&a), fingerprint(&a));
        assert_eq!(fingerprint(&a), fingerprint(&a.clone()));
    }

    #[test]
    fn child_order_matters() {
        let xy = tree("a", vec![Node::new("x"), Node::new("y")]);
        let yx = tree("a", vec![Node::new("y"), Node::new("x")]);
        assert_ne!(fingerprint(&xy), fingerprint(&yx));
    }

    #[test]
    fn deep_descendant_names_matter() {
        let one = tree("a", vec![tree("b", vec![Node::new("c")])]);
        let two = tree("a", vec![tree("b", vec![Node::new("d")])]);
        assert_ne!(fingerprint(&one), fingerprint(&two));
    }

    #[test]
    fn name_boundaries_are_unambiguous() {
        let joined = Node::new("ab");
        let split = tree("a", vec![Node::new("b")]);
        assert_ne!(fingerprint(&joined), fingerprint(&split));
    }

    #[test]
    fn counters_and_flags_are_ignored() {
        let plain = tree("a", vec![Node::new("x")]);
        let mut annotated = Node::directory("a").with_children(vec![Node::new("x")]);
        annotated.subsequent_repeated = 4;
        annotated.collapsed_leaf_children = 2;
        assert_eq!(fingerprint(&plain), fingerprint(&annotated));
    }

    #[test]
    fn displays_as_hex() {
        let text = fingerprint(&Node::new("a")).to_string();
        assert_eq!(text.len(), 64);
        assert!(text.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
