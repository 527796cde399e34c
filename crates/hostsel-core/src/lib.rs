//! Host visibility, filtering and selection engine.
//!
//! The crate turns a host listing into the set of hosts a user ends up
//! picking:
//!
//! - **[`CategoryTree`]**: The category hierarchy, with slash-joined full
//!   paths, validation of cycles and duplicates, and the pruned picker
//!   options shown to the user.
//!
//! - **[`PermissionSet`]**: Category ids granted to a role. Edits produce a
//!   new set; [`PermissionSet::to_update`] builds the payload the permission
//!   store accepts.
//!
//! - **[`FilterEngine`]**: Pure, order-preserving filtering by category
//!   prefix, name substring and required tags.
//!
//! - **[`SelectionTracker`]**: A selection that survives filter changes:
//!   bulk updates only replace the currently visible slice.
//!
//! - **[`SelectorSession`]**: The per-picker state object tying the above
//!   together, including supersession of in-flight listing refreshes.
//!
//! No I/O happens here. Fetching listings and submitting permission
//! updates belong to the caller.

pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod permission;
pub mod selection;
pub mod session;
pub mod store;
pub mod tree;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::EngineConfig;
pub use error::CoreError;
pub use filter::{FilterCriteria, FilterEngine, HostPredicate};
pub use permission::{PermissionChange, PermissionSet, TransferEntry, TransferView};
pub use selection::SelectionTracker;
pub use session::SelectorSession;
pub use store::{AccessScope, HostCatalog, RefreshGate, RefreshTicket};
pub use tree::{CategoryTree, PathMatch};

pub use model::{
    CategoryId, CategoryNode, CategoryOption, Host, HostId, HostListing, PermissionUpdate, RoleId,
};
