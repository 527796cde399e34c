// ── Stable host selection ──
//
// The bulk-selection control only ever reports rows that are currently
// visible. The tracker merges those reports into a selection that
// outlives filter changes: a host filtered out of view stays selected
// until something explicitly unchecks it.
//
// Every transition consumes the tracker and returns the next state, so
// the logic is testable without any rendering context.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::model::{Host, HostId};

/// The filter-independent set of chosen hosts.
///
/// Hosts are kept in the order they were first selected. Equality ignores
/// that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    selected: IndexMap<HostId, Arc<Host>>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row click: select `host` if it is not selected, otherwise deselect
    /// it. Touches exactly one host, visible or not.
    pub fn toggle_one(mut self, host: Arc<Host>) -> Self {
        if self.selected.shift_remove(&host.id).is_none() {
            self.selected.insert(host.id, host);
        }
        self
    }

    /// Merge the bulk control's checked rows for the current view.
    ///
    /// Replaces, does not toggle: every selected host whose id is in
    /// `visible` is dropped, then every host in `newly_checked` is added.
    /// Hosts outside `visible` are left untouched.
    pub fn reconcile_bulk<I>(mut self, visible: &HashSet<HostId>, newly_checked: I) -> Self
    where
        I: IntoIterator<Item = Arc<Host>>,
    {
        let before = self.selected.len();
        self.selected.retain(|id, _| !visible.contains(id));
        let kept = self.selected.len();

        for host in newly_checked {
            if !visible.contains(&host.id) {
                tracing::debug!(host = %host.id, "bulk check reported a host outside the view");
            }
            self.selected.insert(host.id, host);
        }

        tracing::debug!(
            before,
            kept,
            after = self.selected.len(),
            visible = visible.len(),
            "reconciled bulk selection"
        );
        self
    }

    /// Ids the bulk control should render as checked: `selected ∩ visible`.
    pub fn checked_keys_for_view(&self, visible: &HashSet<HostId>) -> BTreeSet<HostId> {
        self.selected
            .keys()
            .filter(|id| visible.contains(id))
            .copied()
            .collect()
    }

    /// The full selection, regardless of what is currently visible.
    pub fn snapshot(&self) -> Vec<Arc<Host>> {
        self.selected.values().cloned().collect()
    }

    /// Swap stored records for newer versions after a refresh.
    ///
    /// Hosts `lookup` no longer knows left the authorized universe and are
    /// deselected.
    pub fn refreshed(mut self, lookup: impl Fn(HostId) -> Option<Arc<Host>>) -> Self {
        let before = self.selected.len();
        self.selected = self
            .selected
            .into_iter()
            .filter_map(|(id, _)| lookup(id).map(|fresh| (id, fresh)))
            .collect();
        let dropped = before - self.selected.len();
        if dropped > 0 {
            tracing::debug!(dropped, "deselected hosts missing from refresh");
        }
        self
    }

    pub fn clear(mut self) -> Self {
        self.selected.clear();
        self
    }

    pub fn contains(&self, id: HostId) -> bool {
        self.selected.contains_key(&id)
    }

    pub fn get(&self, id: HostId) -> Option<&Arc<Host>> {
        self.selected.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = HostId> {
        self.selected.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
