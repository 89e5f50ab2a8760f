//! Outline builder: reconstructs a tree from a sparse, indented grid.

use std::cmp::Ordering;

use tracing::{debug, instrument};

use crate::domain::outline::OutlineNode;
use crate::domain::row::locate_payload;

/// Open path from the root to the most recently inserted node.
///
/// Nodes stay on the path while they can still receive children and are
/// appended to their parent when popped, so sibling order follows row order.
#[derive(Debug)]
struct BuildContext {
    path: Vec<OutlineNode>,
    previous_depth: usize,
}

impl BuildContext {
    fn new(root: OutlineNode) -> Self {
        Self {
            path: vec![root],
            previous_depth: 0,
        }
    }

    fn place(&mut self, depth: usize, node: OutlineNode) {
        match depth.cmp(&self.previous_depth) {
            Ordering::Greater => {}
            Ordering::Equal => self.close_to(self.path.len().saturating_sub(1)),
            Ordering::Less => self.close_to(depth),
        }
        debug!(
            depth,
            previous_depth = self.previous_depth,
            parent_depth = self.path.len() - 1,
            topic = %node.topic,
            "place"
        );
        self.path.push(node);
        self.previous_depth = depth;
    }

    /// Pop open nodes until `len` remain; the root is never popped.
    fn close_to(&mut self, len: usize) {
        let len = len.max(1);
        while self.path.len() > len {
            let Some(node) = self.path.pop() else { break };
            match self.path.last_mut() {
                Some(parent) => parent.children.push(node),
                None => {
                    self.path.push(node);
                    break;
                }
            }
        }
    }

    fn finish(mut self) -> Option<OutlineNode> {
        self.close_to(1);
        self.path.pop()
    }
}

/// Build an outline tree from grid rows.
///
/// The first row's payload becomes the root content. Each following row is
/// placed by comparing its depth with the previous row's depth. Blank rows are
/// skipped. Returns `None` when the grid holds no payload at all.
#[instrument(level = "debug", skip(rows), fields(rows = rows.len()))]
pub fn build_outline<R, S>(rows: &[R]) -> Option<OutlineNode>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let (first, rest) = rows.split_first()?;
    if rows.iter().all(|row| locate_payload(row.as_ref()).is_none()) {
        debug!("grid holds no payload");
        return None;
    }

    let root_content = locate_payload(first.as_ref())
        .map(|payload| payload.text)
        .unwrap_or_default();
    let mut context = BuildContext::new(OutlineNode::new("", root_content));

    for row in rest {
        let Some(payload) = locate_payload(row.as_ref()) else {
            continue;
        };
        context.place(payload.depth, OutlineNode::from_payload(payload.text));
    }

    context.finish()
}
