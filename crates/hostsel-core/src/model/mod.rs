// ── Domain model ──
//
// Canonical types shared by every engine component and by the CLI.

pub mod category;
pub mod entity_id;
pub mod host;
pub mod listing;

// ── Re-exports ──────────────────────────────────────────────────────

pub use category::{CategoryNode, CategoryOption};
pub use entity_id::{CategoryId, HostId, RoleId};
pub use host::Host;
pub use listing::{HostListing, PermissionUpdate};
