use crate::node::Node;

pub const BRANCH: &str = "├── ";
pub const LAST_BRANCH: &str = "└── ";
pub const PIPE_INDENT: &str = "│   ";
pub const SPACE_INDENT: &str = "    ";

/// `[<index>_]name[ (K times)][ (...N collapsed|omitted)]`
pub fn node_label(node: &Node) -> String {
    let mut label = node.raw_name();
    if node.subsequent_repeated > 0 {
        label.push_str(&format!(" ({} times)", node.subsequent_repeated + 1));
    }
    let elided = node.elided_children();
    if elided > 0 {
        let word = if node.children.is_empty() {
            "collapsed"
        } else {
            "omitted"
        };
        label.push_str(&format!(" (...{} {})", elided, word));
    }
    label
}

/// Box-drawing rendering, one line per node, each ending in a newline.
pub fn print_tree(root: &Node) -> String {
    let mut out = String::new();
    out.push_str(&node_label(root));
    out.push('\n');
    print_children(&root.children, "", &mut out);
    out
}

fn print_children(children: &[Node], prefix: &str, out: &mut String) {
    let last = children.len().saturating_sub(1);
    for (i, child) in children.iter().enumerate() {
        let is_last = i == last;
        out.push_str(prefix);
        out.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        out.push_str(&node_label(child));
        out.push('\n');
        if !child.children.is_empty() {
            let nested = format!("{}{}", prefix, if is_last { SPACE_INDENT } else { PIPE_INDENT });
            print_children(&child.children, &nested, out);
        }
    }
}

/// Single-line `name[child, child]` rendering for diagnostics.
pub fn print_compact(node: &Node) -> String {
    let mut out = node_label(node);
    if !node.children.is_empty() {
        let parts: Vec<String> = node.children.iter().map(print_compact).collect();
        out.push('[');
        out.push_str(&parts.join(", "));
        out.push(']');
    }
    out
}
