//! Role permission editing.
//!
//! Applies one transfer edit to a role's grants and prints either the
//! update payload for the permission store or the transfer view.

use std::fmt::Write;

use hostsel_core::{
    AccessScope, CategoryId, CategoryTree, HostCatalog, PermissionChange, PermissionSet,
    PermissionUpdate, TransferEntry, TransferView,
};

use crate::cli::PermsArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::util;

pub fn handle(args: &PermsArgs, settings: &Settings) -> Result<(), CliError> {
    let path = settings.listing_path(args.listing.as_deref())?;
    let mut listing = util::read_listing(&path)?;
    let current_ids = args
        .current
        .clone()
        .or_else(|| listing.perms.take())
        .unwrap_or_default();

    let catalog = HostCatalog::from_listing(listing, AccessScope::Unrestricted)
        .map_err(|e| util::listing_error(&path, e))?;
    let tree = catalog.tree();

    let requested = args.set.iter().flatten().chain(&args.grant);
    ensure_known(tree, requested)?;

    let current = PermissionSet::from_ids(current_ids);
    let next = match args.set {
        Some(ref targets) => current.with_targets(targets.iter().copied()),
        None => current.with_change(&args.grant, &args.revoke),
    };

    let change = current.diff(&next);
    output::note(&describe_change(&change, settings.color), settings.quiet);

    let out = if let Some(ref query) = args.search {
        let view = next.transfer_view(tree, query);
        output::render_single(
            settings.output,
            &view,
            |v| render_view(v, settings.color),
            |v| paths(&v.granted).join("\n"),
        )?
    } else {
        let update = next.to_update(args.role);
        output::render_single(
            settings.output,
            &update,
            |u| render_update(u, tree, settings.color),
            |u| join_ids(&u.category_perms, "\n"),
        )?
    };

    output::print_output(&out, settings.quiet);
    Ok(())
}

/// Grants may only name categories that exist.
fn ensure_known<'a>(
    tree: &CategoryTree,
    ids: impl IntoIterator<Item = &'a CategoryId>,
) -> Result<(), CliError> {
    for id in ids {
        tree.full_path(*id)?;
    }
    Ok(())
}

// ── Rendering ───────────────────────────────────────────────────────

fn describe_change(change: &PermissionChange, color: bool) -> String {
    if change.is_empty() {
        return "no change".into();
    }
    let mut parts = Vec::new();
    if !change.added.is_empty() {
        parts.push(output::added(
            &format!("+{}", join_ids(&change.added, ",")),
            color,
        ));
    }
    if !change.removed.is_empty() {
        parts.push(output::removed(
            &format!("-{}", join_ids(&change.removed, ",")),
            color,
        ));
    }
    parts.join(" ")
}

fn render_update(update: &PermissionUpdate, tree: &CategoryTree, color: bool) -> String {
    let mut out = output::heading(&format!("Role {}", update.id), color);
    if update.category_perms.is_empty() {
        out.push_str("\n  (no categories)");
    }
    for id in &update.category_perms {
        let path = tree.full_path(*id).unwrap_or("?");
        let id = output::dim(&format!("{:>4}", id.get()), color);
        let _ = write!(out, "\n  {id} {path}");
    }
    out
}

fn render_view(view: &TransferView, color: bool) -> String {
    let mut out = String::new();
    for (title, entries) in [("Available", &view.available), ("Granted", &view.granted)] {
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(&output::heading(title, color));
        for entry in entries {
            let _ = write!(
                out,
                "\n  {} {}",
                output::dim(&format!("{:>4}", entry.id.get()), color),
                entry.full_path
            );
        }
    }
    out
}

fn paths(entries: &[TransferEntry]) -> Vec<String> {
    entries.iter().map(|e| e.full_path.clone()).collect()
}

fn join_ids(ids: &[CategoryId], sep: &str) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}
