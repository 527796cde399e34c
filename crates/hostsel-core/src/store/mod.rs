// ── Session data store ──
//
// The authorized host catalog and the refresh bookkeeping that decides
// which fetched listing may replace it.

mod catalog;
mod refresh;

pub use catalog::{AccessScope, HostCatalog};
pub use refresh::{RefreshGate, RefreshTicket};
