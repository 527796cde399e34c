//! CLI configuration: a thin wrapper around `hostsel_config` shared types.
//!
//! Re-exports the shared types and resolves the settings a command runs
//! with, letting `GlobalOpts` flags override profile and config defaults.

use std::path::{Path, PathBuf};

use clap::ValueEnum;

use hostsel_core::{AccessScope, CategoryId, EngineConfig, HostListing, PermissionSet};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

// ── Re-exports from shared crate ────────────────────────────────────

pub use hostsel_config::{Config, Profile, config_path, load_config, save_config};

// ── Resolved settings ───────────────────────────────────────────────

/// Everything a command handler needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Settings {
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub engine: EngineConfig,
    pub profile_name: String,
    pub profile: Profile,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Combine flags, profile and config defaults. An explicitly requested
/// profile must exist; the default one may be absent.
pub fn resolve(global: &GlobalOpts, config: &Config) -> Result<Settings, CliError> {
    let profile_name = active_profile_name(global, config);
    let profile = match config.profile(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(config),
            });
        }
        None => Profile::default(),
    };

    let output = match global.output {
        Some(format) => format,
        None => parse_setting::<OutputFormat>("defaults.output", &config.defaults.output)?,
    };
    let color = match global.color {
        Some(mode) => mode,
        None => parse_setting::<ColorMode>("defaults.color", &config.defaults.color)?,
    };

    let mut engine = hostsel_config::engine_config(&config.defaults);
    if let Some(mode) = global.path_match {
        engine.path_match = mode;
    }

    tracing::debug!(
        profile = %profile_name,
        ?output,
        path_match = %engine.path_match,
        "settings resolved"
    );

    Ok(Settings {
        output,
        color: output::should_color(color),
        quiet: global.quiet,
        engine,
        profile_name,
        profile,
    })
}

pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort_unstable();
    names.join(", ")
}

fn parse_setting<T: ValueEnum>(field: &str, raw: &str) -> Result<T, CliError> {
    T::from_str(raw, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}

// ── Listing source ──────────────────────────────────────────────────

impl Settings {
    /// `--listing` wins over the profile's `listing`.
    pub fn listing_path(&self, flag: Option<&Path>) -> Result<PathBuf, CliError> {
        flag.map(Path::to_path_buf)
            .or_else(|| self.profile.listing.clone())
            .ok_or_else(|| CliError::NoListing {
                profile: self.profile_name.clone(),
            })
    }

    /// Scope precedence: `--role-perms`, then the profile, then the
    /// listing's own `perms`.
    pub fn scope(&self, flag: Option<&[CategoryId]>, listing: &HostListing) -> AccessScope {
        if let Some(ids) = flag {
            return AccessScope::Role(PermissionSet::from_ids(ids.iter().copied()));
        }
        self.profile
            .access_scope()
            .unwrap_or_else(|| AccessScope::from_listing(listing))
    }
}
