use std::fmt;

use termtree::Tree;
use tracing::instrument;

use crate::domain::row::split_payload;

/// Node of a reconstructed outline.
///
/// Children are owned exclusively by their parent and kept in source row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineNode {
    /// Label used as serialization key, may be empty
    pub topic: String,
    /// Body carried verbatim into the output
    pub content: String,
    /// Child nodes in insertion order
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn new(topic: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            content: content.into(),
            children: Vec::new(),
        }
    }

    /// Node from a cell payload, split at the first line break.
    pub fn from_payload(payload: &str) -> Self {
        let (topic, content) = split_payload(payload);
        Self::new(topic, content)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of levels in the subtree, a single node has height 1.
    #[instrument(level = "trace", skip(self))]
    pub fn height(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(OutlineNode::height)
            .max()
            .unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Leaf nodes in depth-first order.
    pub fn leaves(&self) -> Vec<&OutlineNode> {
        self.iter().filter(|node| node.is_leaf()).collect()
    }

    /// Pre-order traversal, children left to right.
    pub fn iter(&self) -> OutlineIter<'_> {
        OutlineIter { stack: vec![self] }
    }

    /// Display label: the topic, or the content for topic-less nodes.
    pub fn label(&self) -> &str {
        if self.topic.is_empty() {
            &self.content
        } else {
            &self.topic
        }
    }

    pub fn to_tree(&self) -> Tree<String> {
        let leaves: Vec<_> = self.children.iter().map(OutlineNode::to_tree).collect();
        Tree::new(self.label().to_string()).with_leaves(leaves)
    }
}

impl fmt::Display for OutlineNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree())
    }
}

pub struct OutlineIter<'a> {
    stack: Vec<&'a OutlineNode>,
}

impl<'a> Iterator for OutlineIter<'a> {
    type Item = &'a OutlineNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reverse push keeps left-to-right order
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
