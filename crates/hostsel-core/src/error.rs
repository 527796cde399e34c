// ── Core error types ──
//
// The engine is pure in-memory logic, so the taxonomy is narrow. None of
// these are I/O failures -- fetching listings and submitting permission
// updates belong to the presentation layer.

use thiserror::Error;

use crate::model::{CategoryId, HostId};

/// Unified error type for the core crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    // ── Lookup errors ────────────────────────────────────────────────
    #[error("Category not found: {id}")]
    CategoryNotFound { id: CategoryId },

    #[error("Host not found: {id}")]
    HostNotFound { id: HostId },

    // ── Input errors ─────────────────────────────────────────────────
    #[error("Invalid category tree: {reason}")]
    InvalidTree { reason: String },

    #[error("Invalid filter {field}: {reason}")]
    InvalidCriteria { field: String, reason: String },

    #[error("Deserialization error: {message}")]
    Deserialization { message: String },
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Deserialization {
            message: err.to_string(),
        }
    }
}
