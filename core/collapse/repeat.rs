//! Folding of the best contiguous repeating run in each sibling list.

use crate::fingerprint::{Signature, fingerprint_siblings};
use crate::node::Node;
use log;

/// A block of `length` siblings starting at `start`, occurring `count`
/// times back to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub start: usize,
    pub length: usize,
    pub count: usize,
}

impl Run {
    // Ranking: most repeats, then longest block, then latest start.
    fn rank(&self) -> (usize, usize, usize) {
        (self.count, self.length, self.start)
    }
}

fn blocks_equal(sigs: &[Signature], a: usize, b: usize, length: usize) -> bool {
    sigs[a..a + length] == sigs[b..b + length]
}

/// Finds the single best run of two or more consecutive, non-overlapping
/// copies of a block. Worst case is cubic in the list length.
pub fn find_best_run(sigs: &[Signature]) -> Option<Run> {
    let n = sigs.len();
    let mut best: Option<Run> = None;
    for start in 0..n {
        for length in 1..=(n - start) / 2 {
            let mut count = 1;
            while start + (count + 1) * length <= n
                && blocks_equal(sigs, start, start + count * length, length)
            {
                count += 1;
            }
            if count < 2 {
                continue;
            }
            let candidate = Run {
                start,
                length,
                count,
            };
            if best.is_none_or(|b| candidate.rank() > b.rank()) {
                best = Some(candidate);
            }
        }
    }
    best
}

/// Bottom-up: children are processed before their parent's sibling list is
/// scanned, so nested repeats fold first.
pub fn collapse_repeats(mut node: Node) -> Node {
    let children = std::mem::take(&mut node.children);
    node.children = children.into_iter().map(collapse_repeats).collect();

    let sigs = fingerprint_siblings(&node.children);
    if let Some(run) = find_best_run(&sigs) {
        log::trace!(
            "Folding run under '{}': start={}, length={}, count={}",
            node.name,
            run.start,
            run.length,
            run.count
        );
        for kept in &mut node.children[run.start..run.start + run.length] {
            kept.subsequent_repeated = run.count - 1;
        }
        node.children
            .drain(run.start + run.length..run.start + run.count * run.length);
    }
    node
}
