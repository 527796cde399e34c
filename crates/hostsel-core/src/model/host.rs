// ── Host domain type ──

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::entity_id::HostId;

/// A managed host as delivered by the host-listing source.
///
/// The engine only ever reads hosts; records are shared behind `Arc`
/// between the catalog, filtered views and the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub id: HostId,
    /// Slash-delimited category path (e.g. `"region/group"`). Empty when
    /// the host was never assigned a category.
    #[serde(default)]
    pub category: String,
    /// Display name.
    pub name: String,
    /// Connection address (hostname or IP).
    pub hostname: String,
    pub port: u16,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Host {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// `hostname:port`, the way connection columns render it.
    pub fn address(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }
}
