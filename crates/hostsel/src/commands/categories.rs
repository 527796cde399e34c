//! Category handlers: flat listing, populated zones, picker tree.

use std::collections::HashMap;
use std::fmt::Write;

use serde::Serialize;
use tabled::Tabled;

use hostsel_core::{CategoryId, CategoryOption, HostCatalog, tree};

use crate::cli::CategoriesArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Rows ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct CategoryEntry {
    id: CategoryId,
    path: String,
    hosts: usize,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Hosts")]
    hosts: String,
}

impl From<&CategoryEntry> for CategoryRow {
    fn from(c: &CategoryEntry) -> Self {
        Self {
            id: c.id.to_string(),
            path: c.path.clone(),
            hosts: c.hosts.to_string(),
        }
    }
}

#[derive(Tabled)]
struct ZoneRow {
    #[tabled(rename = "Zone")]
    zone: String,
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: &CategoriesArgs, settings: &Settings) -> Result<(), CliError> {
    let catalog = util::load_catalog(settings, &args.source)?;

    let out = if args.zones {
        let zones = catalog.zones();
        output::render_list(
            settings.output,
            &zones,
            |z| ZoneRow { zone: z.clone() },
            String::clone,
        )?
    } else if args.tree {
        let options = catalog.category_options();
        output::render_single(
            settings.output,
            &options,
            |o| render_tree(o, settings.color),
            |o| option_paths(o).join("\n"),
        )?
    } else {
        let entries = entries(&catalog);
        output::render_list(
            settings.output,
            &entries,
            |c| CategoryRow::from(c),
            |c| c.path.clone(),
        )?
    };

    output::print_output(&out, settings.quiet);
    Ok(())
}

/// Every category in listing order with its authorized host count.
fn entries(catalog: &HostCatalog) -> Vec<CategoryEntry> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for host in catalog.hosts() {
        *counts.entry(tree::normalize_path(&host.category)).or_default() += 1;
    }

    catalog
        .tree()
        .iter()
        .map(|(id, path)| CategoryEntry {
            id,
            path: path.to_owned(),
            hosts: counts.get(path).copied().unwrap_or_default(),
        })
        .collect()
}

// ── Tree rendering ──────────────────────────────────────────────────

fn render_tree(options: &[CategoryOption], color: bool) -> String {
    let mut out = String::new();
    for option in options {
        write_option(&mut out, option, 0, color);
    }
    out.trim_end().to_owned()
}

fn write_option(out: &mut String, option: &CategoryOption, depth: usize, color: bool) {
    let label = if depth == 0 {
        output::heading(&option.label, color)
    } else {
        option.label.clone()
    };
    let _ = writeln!(out, "{}{label}", "  ".repeat(depth));
    for child in &option.children {
        write_option(out, child, depth + 1, color);
    }
}

/// Full path of every node in the forest, depth-first.
fn option_paths(options: &[CategoryOption]) -> Vec<String> {
    fn walk(option: &CategoryOption, prefix: &str, acc: &mut Vec<String>) {
        let path = if prefix.is_empty() {
            option.value.clone()
        } else {
            format!("{prefix}/{}", option.value)
        };
        for child in &option.children {
            walk(child, &path, acc);
        }
        acc.push(path);
    }

    let mut acc = Vec::new();
    for option in options {
        walk(option, "", &mut acc);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(value: &str, children: Vec<CategoryOption>) -> CategoryOption {
        CategoryOption {
            value: value.into(),
            label: value.into(),
            children,
        }
    }

    #[test]
    fn tree_indents_children() {
        let forest = vec![option("prod", vec![option("web", vec![]), option("db", vec![])])];
        assert_eq!(render_tree(&forest, false), "prod\n  web\n  db");
    }

    #[test]
    fn paths_cover_every_node() {
        let forest = vec![option("prod", vec![option("web", vec![])]), option("lab", vec![])];
        assert_eq!(option_paths(&forest), vec!["prod/web", "prod", "lab"]);
    }
}
