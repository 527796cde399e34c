// ── Role category permissions ──
//
// A role sees exactly the categories it has been granted. Grants are
// explicit per node: granting `prod` says nothing about `prod/web`.
// Edits never touch the receiver; they hand back a new set that the
// presentation layer submits to the permission store.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{CategoryId, PermissionUpdate, RoleId};
use crate::tree::CategoryTree;

/// The set of category ids granted to one role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CategoryId>", into = "Vec<CategoryId>")]
pub struct PermissionSet {
    granted: HashSet<CategoryId>,
}

/// The difference between two permission sets, both sides ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionChange {
    pub added: Vec<CategoryId>,
    pub removed: Vec<CategoryId>,
}

impl PermissionChange {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// One row of the transfer widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEntry {
    pub id: CategoryId,
    pub full_path: String,
}

/// Both lists of the transfer widget: categories still available and
/// categories already granted, each sorted by full path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferView {
    pub available: Vec<TransferEntry>,
    pub granted: Vec<TransferEntry>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = CategoryId>) -> Self {
        Self {
            granted: ids.into_iter().collect(),
        }
    }

    pub fn is_granted(&self, id: CategoryId) -> bool {
        self.granted.contains(&id)
    }

    /// Apply a transfer edit, returning the new set.
    ///
    /// Removals are applied after additions, so an id present in both
    /// lists ends up revoked.
    pub fn with_change(&self, added: &[CategoryId], removed: &[CategoryId]) -> Self {
        let mut granted = self.granted.clone();
        granted.extend(added.iter().copied());
        for id in removed {
            granted.remove(id);
        }
        let next = Self { granted };
        tracing::debug!(
            added = added.len(),
            removed = removed.len(),
            granted = next.len(),
            "applied permission edit"
        );
        next
    }

    /// Replace the grants with the transfer widget's full target list.
    pub fn with_targets(&self, targets: impl IntoIterator<Item = CategoryId>) -> Self {
        let next = Self::from_ids(targets);
        let change = self.diff(&next);
        tracing::debug!(?change, "replaced permission targets");
        next
    }

    /// What has to be granted and revoked to turn `self` into `next`.
    pub fn diff(&self, next: &Self) -> PermissionChange {
        let mut added: Vec<CategoryId> = next.granted.difference(&self.granted).copied().collect();
        let mut removed: Vec<CategoryId> =
            self.granted.difference(&next.granted).copied().collect();
        added.sort_unstable();
        removed.sort_unstable();
        PermissionChange { added, removed }
    }

    /// Granted ids in ascending order.
    pub fn to_id_list(&self) -> Vec<CategoryId> {
        let mut ids: Vec<CategoryId> = self.granted.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn to_update(&self, role: RoleId) -> PermissionUpdate {
        PermissionUpdate {
            id: role,
            category_perms: self.to_id_list(),
        }
    }

    /// Split the tree's categories into the two transfer lists.
    ///
    /// `query` narrows both lists by a case-insensitive substring match on
    /// the full path. Granted ids the tree does not know are left out of
    /// the view but stay in the set.
    pub fn transfer_view(&self, tree: &CategoryTree, query: &str) -> TransferView {
        let needle = query.trim().to_lowercase();
        let mut view = TransferView::default();

        for (id, path) in tree.iter() {
            if !needle.is_empty() && !path.to_lowercase().contains(&needle) {
                continue;
            }
            let entry = TransferEntry {
                id,
                full_path: path.to_owned(),
            };
            if self.is_granted(id) {
                view.granted.push(entry);
            } else {
                view.available.push(entry);
            }
        }

        view.available.sort_by(|a, b| a.full_path.cmp(&b.full_path));
        view.granted.sort_by(|a, b| a.full_path.cmp(&b.full_path));
        view
    }

    pub fn len(&self) -> usize {
        self.granted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }

    /// Granted ids in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = CategoryId> {
        self.granted.iter().copied()
    }
}

impl FromIterator<CategoryId> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = CategoryId>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}

impl From<Vec<CategoryId>> for PermissionSet {
    fn from(ids: Vec<CategoryId>) -> Self {
        Self::from_ids(ids)
    }
}

impl From<PermissionSet> for Vec<CategoryId> {
    fn from(set: PermissionSet) -> Self {
        set.to_id_list()
    }
}
