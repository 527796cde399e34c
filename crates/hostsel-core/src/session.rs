// ── Selector session ──
//
// One interactive host-picking session: the authorized catalog, the
// criteria currently applied, and the selection built up so far. The
// presentation layer owns exactly one of these per open picker and drops
// it on confirm or cancel.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::filter::{FilterCriteria, FilterEngine};
use crate::model::{Host, HostId, HostListing};
use crate::selection::SelectionTracker;
use crate::store::{AccessScope, HostCatalog, RefreshGate, RefreshTicket};

#[derive(Debug, Clone, Default)]
pub struct SelectorSession {
    engine: FilterEngine,
    catalog: HostCatalog,
    criteria: FilterCriteria,
    selection: SelectionTracker,
    gate: RefreshGate,
}

impl SelectorSession {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            engine: FilterEngine::new(config),
            ..Self::default()
        }
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Request a new listing. Results for older tickets will be ignored.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.gate.begin()
    }

    /// Install the listing fetched for `ticket`.
    ///
    /// Returns `Ok(false)` without touching the session when a newer
    /// refresh was requested in the meantime. Selected hosts still in the
    /// new catalog keep their place with the fresh record; the rest are
    /// deselected.
    pub fn apply_listing(
        &mut self,
        ticket: RefreshTicket,
        listing: HostListing,
        scope: AccessScope,
    ) -> Result<bool, CoreError> {
        if !self.gate.is_current(ticket) {
            debug!(generation = ticket.generation(), "ignoring stale listing");
            return Ok(false);
        }

        let catalog = HostCatalog::from_listing(listing, scope).inspect_err(|e| {
            warn!(generation = ticket.generation(), error = %e, "listing rejected");
        })?;

        self.gate.accept(ticket);
        info!(
            generation = ticket.generation(),
            hosts = catalog.len(),
            hidden = catalog.hidden_count(),
            "listing installed"
        );

        self.catalog = catalog;
        let catalog = &self.catalog;
        self.selection = std::mem::take(&mut self.selection)
            .refreshed(|id| catalog.get(id).map(Arc::clone));
        Ok(true)
    }

    pub fn catalog(&self) -> &HostCatalog {
        &self.catalog
    }

    // ── Filtering ────────────────────────────────────────────────────

    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> Result<(), CoreError> {
        self.criteria = criteria.validated()?;
        debug!(criteria = ?self.criteria, "criteria applied");
        Ok(())
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Rows currently on screen, in listing order.
    pub fn visible_hosts(&self) -> Vec<Arc<Host>> {
        self.engine.apply(self.catalog.hosts(), &self.criteria)
    }

    pub fn visible_ids(&self) -> HashSet<HostId> {
        self.visible_hosts().iter().map(|host| host.id).collect()
    }

    /// Rows the bulk control should render as checked.
    pub fn checked_keys(&self) -> BTreeSet<HostId> {
        self.selection.checked_keys_for_view(&self.visible_ids())
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Row click on `id`.
    pub fn toggle(&mut self, id: HostId) -> Result<(), CoreError> {
        let host = self
            .catalog
            .get(id)
            .map(Arc::clone)
            .ok_or(CoreError::HostNotFound { id })?;
        self.selection = std::mem::take(&mut self.selection).toggle_one(host);
        Ok(())
    }

    /// The bulk control now reports `checked` for the current view.
    pub fn bulk_change(
        &mut self,
        checked: impl IntoIterator<Item = HostId>,
    ) -> Result<(), CoreError> {
        let hosts = checked
            .into_iter()
            .map(|id| {
                self.catalog
                    .get(id)
                    .map(Arc::clone)
                    .ok_or(CoreError::HostNotFound { id })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let visible = self.visible_ids();
        self.selection = std::mem::take(&mut self.selection).reconcile_bulk(&visible, hosts);
        Ok(())
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    /// Finish the session and hand back every selected host.
    pub fn confirm(self) -> Vec<Arc<Host>> {
        let hosts = self.selection.snapshot();
        info!(selected = hosts.len(), "selection confirmed");
        hosts
    }

    /// Abandon the session. Nothing is returned and the selection is lost.
    pub fn cancel(self) {
        debug!(discarded = self.selection.len(), "selection cancelled");
    }
}
