// ── Wire payloads exchanged with external collaborators ──
//
// The engine never fetches or submits anything itself. These types are
// the shapes the presentation layer hands in (listings) and sends out
// (permission updates).

use serde::{Deserialize, Serialize};

use super::category::CategoryNode;
use super::entity_id::{CategoryId, RoleId};
use super::host::Host;
use crate::error::CoreError;

/// A complete host-listing response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostListing {
    pub hosts: Vec<Host>,
    /// Flat category rows. When empty, the tree is derived from host paths.
    #[serde(default)]
    pub categories: Vec<CategoryNode>,
    /// Granted category ids, present when the listing is scoped to a role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perms: Option<Vec<CategoryId>>,
}

impl HostListing {
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Payload accepted by the permission store for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionUpdate {
    pub id: RoleId,
    /// Granted category ids, ascending.
    pub category_perms: Vec<CategoryId>,
}
