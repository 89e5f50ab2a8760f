//! Outline to menu-choice serialization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::outline::OutlineNode;

/// Keyed sub-choices in child order.
pub type Choices = IndexMap<String, Choice>;

/// One menu entry: its content and, for internal nodes, its sub-choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Choices>,
}

impl Choice {
    pub fn leaf(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            choices: None,
        }
    }
}

/// Serialize an outline into nested choices keyed by lower-cased topic.
///
/// Leaves carry no `choices` field. Sibling keys that collide get the
/// smallest free `_N` suffix, so every child yields exactly one entry.
#[instrument(level = "debug", skip(node), fields(topic = %node.topic))]
pub fn serialize_outline(node: &OutlineNode) -> Choice {
    if node.is_leaf() {
        return Choice::leaf(node.content.clone());
    }

    let mut choices = Choices::with_capacity(node.children.len());
    for child in &node.children {
        let key = unique_key(&choices, &child.topic.to_lowercase());
        choices.insert(key, serialize_outline(child));
    }

    Choice {
        content: node.content.clone(),
        choices: Some(choices),
    }
}

/// `base` if unused, otherwise `base_N` with the smallest unused N >= 1.
pub fn unique_key(choices: &Choices, base: &str) -> String {
    if !choices.contains_key(base) {
        return base.to_string();
    }
    let mut counter = 1usize;
    loop {
        let candidate = format!("{}_{}", base, counter);
        if !choices.contains_key(&candidate) {
            debug!(base, key = %candidate, "renamed colliding key");
            return candidate;
        }
        counter += 1;
    }
}
