// ── Category hierarchy ──
//
// Hosts live under slash-delimited category paths. The tree is built once
// per listing and never mutated; a changed category source means a new
// tree.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::CoreError;
use crate::model::{CategoryId, CategoryNode, CategoryOption};

/// Separator between category path segments.
pub const PATH_SEPARATOR: char = '/';

/// How a category query is compared against a host's category path.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PathMatch {
    /// Segment-wise containment: `a/b` contains `a/b/c` but not `a/bc`.
    #[default]
    Segment,
    /// Raw string prefix. `a/b` also matches `a/bc`.
    StringPrefix,
}

impl PathMatch {
    pub fn matches(self, host_path: &str, query_path: &str) -> bool {
        match self {
            Self::Segment => prefix_match(host_path, query_path),
            Self::StringPrefix => host_path.starts_with(query_path),
        }
    }
}

/// True iff `host_path` equals `query_path` or lies underneath it.
///
/// Comparison is per segment; empty segments (leading, trailing or doubled
/// separators) are ignored. An empty query matches every path.
pub fn prefix_match(host_path: &str, query_path: &str) -> bool {
    let mut host = segments(host_path);
    segments(query_path).all(|query| host.next() == Some(query))
}

/// Non-empty segments of a category path.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(PATH_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}

/// Canonical form of a path: trimmed segments joined by the separator.
pub fn normalize_path(path: &str) -> String {
    segments(path).collect::<Vec<_>>().join("/")
}

#[derive(Debug, Clone)]
struct TreeEntry {
    node: CategoryNode,
    children: Vec<CategoryId>,
    path: String,
}

/// The category hierarchy, indexed by id and by full path.
#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    entries: HashMap<CategoryId, TreeEntry>,
    by_path: HashMap<String, CategoryId>,
    /// Listing order, used for deterministic iteration.
    order: Vec<CategoryId>,
    roots: Vec<CategoryId>,
}

impl CategoryTree {
    /// Assemble a tree from flat `(id, name, parent_id)` rows.
    ///
    /// Children keep the order in which they appear in `nodes`. Rejects
    /// duplicate ids, unknown parents, cycles, unusable names and two
    /// nodes resolving to the same path.
    pub fn from_nodes(nodes: impl IntoIterator<Item = CategoryNode>) -> Result<Self, CoreError> {
        let mut tree = Self::default();

        for node in nodes {
            if node.name.trim().is_empty() || node.name.contains(PATH_SEPARATOR) {
                return Err(invalid(format!(
                    "category {} has unusable name '{}'",
                    node.id, node.name
                )));
            }
            if tree.entries.contains_key(&node.id) {
                return Err(invalid(format!("duplicate category id {}", node.id)));
            }
            tree.order.push(node.id);
            tree.entries.insert(
                node.id,
                TreeEntry {
                    node,
                    children: Vec::new(),
                    path: String::new(),
                },
            );
        }

        for id in tree.order.clone() {
            let parent = tree.entries.get(&id).and_then(|e| e.node.parent_id);
            match parent {
                None => tree.roots.push(id),
                Some(parent_id) => {
                    let Some(parent) = tree.entries.get_mut(&parent_id) else {
                        return Err(invalid(format!(
                            "category {id} references unknown parent {parent_id}"
                        )));
                    };
                    parent.children.push(id);
                }
            }
        }

        for id in tree.order.clone() {
            let path = tree.walk_ancestors(id)?;
            if let Some(existing) = tree.by_path.insert(path.clone(), id) {
                return Err(invalid(format!(
                    "categories {existing} and {id} share the path '{path}'"
                )));
            }
            if let Some(entry) = tree.entries.get_mut(&id) {
                entry.path = path;
            }
        }

        tracing::debug!(categories = tree.len(), roots = tree.roots.len(), "built category tree");
        Ok(tree)
    }

    /// Derive a tree from host category paths, creating one node per
    /// distinct path prefix. Ids are assigned from 1 in first-seen order.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = Self::default();
        let mut next_id = 1_u64;

        for path in paths {
            let mut parent: Option<CategoryId> = None;
            let mut prefix = String::new();
            for segment in segments(path.as_ref()) {
                if !prefix.is_empty() {
                    prefix.push(PATH_SEPARATOR);
                }
                prefix.push_str(segment);

                if let Some(&existing) = tree.by_path.get(&prefix) {
                    parent = Some(existing);
                    continue;
                }

                let id = CategoryId(next_id);
                next_id += 1;
                let node = CategoryNode {
                    id,
                    name: segment.to_owned(),
                    parent_id: parent,
                };
                match parent.and_then(|p| tree.entries.get_mut(&p)) {
                    Some(parent_entry) => parent_entry.children.push(id),
                    None => tree.roots.push(id),
                }
                tree.order.push(id);
                tree.by_path.insert(prefix.clone(), id);
                tree.entries.insert(
                    id,
                    TreeEntry {
                        node,
                        children: Vec::new(),
                        path: prefix.clone(),
                    },
                );
                parent = Some(id);
            }
        }

        tree
    }

    /// Resolve a node's full path, root first.
    pub fn full_path(&self, id: CategoryId) -> Result<&str, CoreError> {
        self.entries
            .get(&id)
            .map(|entry| entry.path.as_str())
            .ok_or(CoreError::CategoryNotFound { id })
    }

    /// Look up the node sitting exactly at `path`.
    pub fn find_by_path(&self, path: &str) -> Option<CategoryId> {
        self.by_path.get(&normalize_path(path)).copied()
    }

    pub fn get(&self, id: CategoryId) -> Option<&CategoryNode> {
        self.entries.get(&id).map(|entry| &entry.node)
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn roots(&self) -> &[CategoryId] {
        &self.roots
    }

    /// Ordered children of `id`; empty for leaves and unknown ids.
    pub fn children(&self, id: CategoryId) -> &[CategoryId] {
        self.entries
            .get(&id)
            .map(|entry| entry.children.as_slice())
            .unwrap_or_default()
    }

    /// `(id, full path)` pairs in listing order.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, &str)> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|e| (*id, e.path.as_str())))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Picker forest restricted to categories that hold hosts.
    ///
    /// A node survives when its own path is in `populated` or any of its
    /// children survives.
    pub fn options(&self, populated: &HashSet<String>) -> Vec<CategoryOption> {
        self.roots
            .iter()
            .filter_map(|id| self.option_for(*id, populated))
            .collect()
    }

    /// Sorted full paths of the categories that hold at least one host.
    pub fn zones(&self, populated: &HashSet<String>) -> Vec<String> {
        let mut zones: Vec<String> = self
            .iter()
            .filter(|(_, path)| populated.contains(*path))
            .map(|(_, path)| path.to_owned())
            .collect();
        zones.sort();
        zones
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn option_for(&self, id: CategoryId, populated: &HashSet<String>) -> Option<CategoryOption> {
        let entry = self.entries.get(&id)?;
        let children: Vec<CategoryOption> = entry
            .children
            .iter()
            .filter_map(|child| self.option_for(*child, populated))
            .collect();

        if children.is_empty() && !populated.contains(&entry.path) {
            return None;
        }

        Some(CategoryOption {
            value: entry.node.name.clone(),
            label: entry.node.name.clone(),
            children,
        })
    }

    /// Build the path of `id` by walking parents. More steps than there
    /// are nodes means the parent chain loops.
    fn walk_ancestors(&self, id: CategoryId) -> Result<String, CoreError> {
        let mut names = Vec::new();
        let mut cursor = Some(id);

        while let Some(current) = cursor {
            if names.len() > self.entries.len() {
                return Err(invalid(format!("category {id} is its own ancestor")));
            }
            let entry = self
                .entries
                .get(&current)
                .ok_or(CoreError::CategoryNotFound { id: current })?;
            names.push(entry.node.name.trim());
            cursor = entry.node.parent_id;
        }

        names.reverse();
        Ok(names.join("/"))
    }
}

fn invalid(reason: String) -> CoreError {
    tracing::warn!(%reason, "rejected category listing");
    CoreError::InvalidTree { reason }
}
