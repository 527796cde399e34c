// ── Category domain types ──

use serde::{Deserialize, Serialize};

use super::entity_id::CategoryId;

/// One row of the flat category listing (`id`, `name`, `parent_id`).
///
/// The hierarchy is reassembled by [`CategoryTree`](crate::CategoryTree).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
}

impl CategoryNode {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
        }
    }

    /// Attach this node under `parent`.
    pub fn under(mut self, parent: impl Into<CategoryId>) -> Self {
        self.parent_id = Some(parent.into());
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A node of the hierarchical category picker.
///
/// `value` is the node's own name; the picker reports the chosen chain of
/// values, which joined with `/` form a category path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryOption>,
}
