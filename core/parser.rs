//! Reads box-drawing tree text back into a [`Node`] tree.
//!
//! Only structure is recovered: names, depths and ordering. Annotation
//! suffixes such as `(3 times)` stay part of the parsed name.

use crate::error::{AppError, Result};
use crate::node::Node;
use crate::printer::{BRANCH, LAST_BRANCH, PIPE_INDENT, SPACE_INDENT};
use log;
use std::iter::Peekable;
use std::vec::IntoIter;

#[derive(Debug)]
struct TreeLine {
    number: usize,
    depth: usize,
    node: Node,
}

/// Depth of a child line and the name that follows its connector.
fn split_line(line: &str, number: usize) -> Result<(usize, &str)> {
    let mut rest = line;
    let mut groups = 0;
    loop {
        if let Some(name) = rest
            .strip_prefix(BRANCH)
            .or_else(|| rest.strip_prefix(LAST_BRANCH))
        {
            if name.trim().is_empty() {
                return Err(AppError::TreeParse {
                    line: number,
                    reason: "connector is not followed by a name".to_string(),
                });
            }
            return Ok((groups + 1, name));
        }
        if let Some(next) = rest
            .strip_prefix(PIPE_INDENT)
            .or_else(|| rest.strip_prefix(SPACE_INDENT))
        {
            groups += 1;
            rest = next;
            continue;
        }
        let column = line.chars().count() - rest.chars().count();
        return Err(AppError::TreeParse {
            line: number,
            reason: format!(
                "indentation at column {} is not a multiple of 4 ending in a connector",
                column
            ),
        });
    }
}

fn scan_lines(text: &str) -> Result<(Node, Vec<TreeLine>)> {
    let mut numbered = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, root_line) = numbered.next().ok_or(AppError::EmptyTree)?;
    let root = Node::new(root_line.trim());

    let mut lines = Vec::new();
    let mut previous_depth = 0;
    for (number, line) in numbered {
        let (depth, name) = split_line(line, number)?;
        if lines.is_empty() && depth != 1 {
            return Err(AppError::TreeParse {
                line: number,
                reason: format!("first child must be at depth 1, found depth {}", depth),
            });
        }
        if depth > previous_depth + 1 {
            return Err(AppError::TreeParse {
                line: number,
                reason: format!(
                    "depth jumps from {} to {}; only one level deeper is allowed",
                    previous_depth, depth
                ),
            });
        }
        previous_depth = depth;
        lines.push(TreeLine {
            number,
            depth,
            node: Node::new(name),
        });
    }
    Ok((root, lines))
}

/// Consumes the run of lines at `depth`, attaching deeper lines as children.
fn build_level(lines: &mut Peekable<IntoIter<TreeLine>>, depth: usize) -> Result<Vec<Node>> {
    let mut siblings = Vec::new();
    while let Some(next) = lines.peek() {
        if next.depth < depth {
            break;
        }
        if next.depth > depth {
            return Err(AppError::TreeParse {
                line: next.number,
                reason: format!("expected depth {}, found depth {}", depth, next.depth),
            });
        }
        let Some(line) = lines.next() else { break };
        let mut node = line.node;
        node.children = build_level(lines, depth + 1)?;
        siblings.push(node);
    }
    Ok(siblings)
}

pub fn parse_tree(text: &str) -> Result<Node> {
    let (mut root, lines) = scan_lines(text)?;
    log::debug!("Parsing tree '{}' with {} child lines", root.name, lines.len());
    let mut iter = lines.into_iter().peekable();
    root.children = build_level(&mut iter, 1)?;
    Ok(root)
}
