//! Shared helpers for command handlers.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use tabled::Tabled;

use hostsel_core::{CoreError, FilterCriteria, Host, HostCatalog, HostListing};

use crate::cli::{FilterArgs, SourceArgs};
use crate::config::Settings;
use crate::error::CliError;

// ── Host rows ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct HostRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

impl From<&Arc<Host>> for HostRow {
    fn from(h: &Arc<Host>) -> Self {
        Self {
            id: h.id.to_string(),
            name: h.name.clone(),
            address: h.address(),
            category: h.category.clone(),
            tags: h.tags.iter().cloned().collect::<Vec<_>>().join(", "),
        }
    }
}

// ── Input ───────────────────────────────────────────────────────────

/// Read a file, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Read and parse a JSON host listing.
pub fn read_listing(path: &Path) -> Result<HostListing, CliError> {
    let raw = read_input(path)?;
    let listing = HostListing::from_json(&raw).map_err(|e| listing_error(path, e))?;
    tracing::debug!(
        path = %path.display(),
        hosts = listing.hosts.len(),
        categories = listing.categories.len(),
        "listing read"
    );
    Ok(listing)
}

/// The authorized catalog for `source`.
pub fn load_catalog(settings: &Settings, source: &SourceArgs) -> Result<HostCatalog, CliError> {
    let path = settings.listing_path(source.listing.as_deref())?;
    let listing = read_listing(&path)?;
    let scope = settings.scope(source.role_perms.as_deref(), &listing);
    HostCatalog::from_listing(listing, scope).map_err(|e| listing_error(&path, e))
}

/// Attach the listing path to tree and parse failures.
pub fn listing_error(path: &Path, err: CoreError) -> CliError {
    match err {
        CoreError::InvalidTree { reason } | CoreError::Deserialization { message: reason } => {
            CliError::InvalidListing {
                path: path.display().to_string(),
                reason,
            }
        }
        other => other.into(),
    }
}

// ── Criteria ────────────────────────────────────────────────────────

pub fn criteria_from(args: &FilterArgs) -> Result<FilterCriteria, CliError> {
    let mut criteria = FilterCriteria::new().with_tags(args.tags.iter().cloned());
    if let Some(ref category) = args.category {
        criteria = criteria.with_category(category.clone());
    }
    if let Some(ref name) = args.name {
        criteria = criteria.with_name(name.clone());
    }
    Ok(criteria.validated()?)
}
