// ── Authorized host universe ──
//
// Combines a listing's hosts with the category tree and the caller's
// access scope. Everything downstream (filtering, selection) only ever
// sees hosts that made it into the catalog.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use crate::error::CoreError;
use crate::model::{CategoryOption, Host, HostId, HostListing};
use crate::permission::PermissionSet;
use crate::tree::{self, CategoryTree};

/// Which hosts the current user may see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AccessScope {
    /// Administrators see every host.
    #[default]
    Unrestricted,
    /// A role sees hosts whose category node is granted. Grants do not
    /// cascade to child categories.
    Role(PermissionSet),
}

impl AccessScope {
    /// Scope implied by a listing: role-scoped when it carries `perms`.
    pub fn from_listing(listing: &HostListing) -> Self {
        listing
            .perms
            .as_ref()
            .map_or(Self::Unrestricted, |perms| {
                Self::Role(PermissionSet::from_ids(perms.iter().copied()))
            })
    }

    pub fn permits(&self, tree: &CategoryTree, host: &Host) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Role(perms) => tree
                .find_by_path(&host.category)
                .is_some_and(|id| perms.is_granted(id)),
        }
    }
}

/// The hosts a session may display and select.
#[derive(Debug, Clone, Default)]
pub struct HostCatalog {
    /// Authorized hosts in listing order.
    hosts: Vec<Arc<Host>>,
    by_id: HashMap<HostId, Arc<Host>>,
    tree: CategoryTree,
    scope: AccessScope,
    hidden: usize,
}

impl HostCatalog {
    /// Narrow `hosts` to what `scope` permits. Repeated ids keep their
    /// first record.
    pub fn new(hosts: impl IntoIterator<Item = Host>, tree: CategoryTree, scope: AccessScope) -> Self {
        let mut catalog = Self {
            tree,
            scope,
            ..Self::default()
        };

        for host in hosts {
            if catalog.by_id.contains_key(&host.id) {
                tracing::warn!(host = %host.id, "duplicate host id in listing, keeping the first");
                continue;
            }
            if !catalog.scope.permits(&catalog.tree, &host) {
                catalog.hidden += 1;
                continue;
            }
            let host = Arc::new(host);
            catalog.by_id.insert(host.id, Arc::clone(&host));
            catalog.hosts.push(host);
        }

        catalog
    }

    /// Build the tree from the listing (or from host paths when the
    /// listing has no category rows) and narrow the hosts.
    pub fn from_listing(listing: HostListing, scope: AccessScope) -> Result<Self, CoreError> {
        let tree = if listing.categories.is_empty() {
            CategoryTree::from_paths(listing.hosts.iter().map(|h| h.category.as_str()))
        } else {
            CategoryTree::from_nodes(listing.categories)?
        };
        Ok(Self::new(listing.hosts, tree, scope))
    }

    pub fn hosts(&self) -> &[Arc<Host>] {
        &self.hosts
    }

    pub fn get(&self, id: HostId) -> Option<&Arc<Host>> {
        self.by_id.get(&id)
    }

    pub fn contains(&self, id: HostId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn tree(&self) -> &CategoryTree {
        &self.tree
    }

    pub fn scope(&self) -> &AccessScope {
        &self.scope
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Number of listed hosts the scope filtered out.
    pub fn hidden_count(&self) -> usize {
        self.hidden
    }

    /// Distinct tags carried by at least one authorized host, sorted.
    pub fn tags(&self) -> Vec<String> {
        self.hosts
            .iter()
            .flat_map(|host| host.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Normalized category paths that hold at least one authorized host.
    pub fn populated_paths(&self) -> HashSet<String> {
        self.hosts
            .iter()
            .map(|host| tree::normalize_path(&host.category))
            .filter(|path| !path.is_empty())
            .collect()
    }

    /// Picker options covering the categories of authorized hosts.
    pub fn category_options(&self) -> Vec<CategoryOption> {
        self.tree.options(&self.populated_paths())
    }

    /// Sorted category paths of authorized hosts.
    pub fn zones(&self) -> Vec<String> {
        self.tree.zones(&self.populated_paths())
    }
}
