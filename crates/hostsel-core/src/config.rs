// ── Engine tuning ──
//
// Options that change how the engine evaluates filters. They never touch
// disk; `hostsel-config` reads the file and hands an `EngineConfig` in.

use serde::{Deserialize, Serialize};

use crate::tree::PathMatch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How category queries compare against host paths.
    #[serde(default)]
    pub path_match: PathMatch,
}
