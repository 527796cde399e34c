//! Shared configuration for the hostsel selector.
//!
//! TOML profiles naming a host listing and the role scope to apply to it,
//! plus translation to `hostsel_core::EngineConfig`. The CLI layers its
//! `GlobalOpts` overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hostsel_core::{AccessScope, CategoryId, EngineConfig, PathMatch, PermissionSet};

/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "HOSTSEL_CONFIG";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named listing profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, profile) in &self.profiles {
            if profile.superuser && profile.role_perms.is_some() {
                return Err(ConfigError::Validation {
                    field: format!("profiles.{name}"),
                    reason: "superuser and role_perms are mutually exclusive".into(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// `segment` or `string-prefix`.
    #[serde(default)]
    pub path_match: PathMatch,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            path_match: PathMatch::default(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// A named host-listing profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// JSON host listing to read.
    pub listing: Option<PathBuf>,

    /// Category ids granted to the role browsing this profile.
    pub role_perms: Option<Vec<CategoryId>>,

    /// Ignore any role scope and show every host.
    #[serde(default)]
    pub superuser: bool,
}

impl Profile {
    /// Scope forced by the profile, if any. `None` defers to the listing.
    pub fn access_scope(&self) -> Option<AccessScope> {
        if self.superuser {
            return Some(AccessScope::Unrestricted);
        }
        self.role_perms
            .as_ref()
            .map(|ids| AccessScope::Role(PermissionSet::from_ids(ids.iter().copied())))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path: `HOSTSEL_CONFIG`, then platform
/// conventions.
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "hostsel", "hostsel").map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("hostsel");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` + `HOSTSEL_*` environment variables.
///
/// Nested keys use a double underscore: `HOSTSEL_DEFAULTS__OUTPUT=json`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HOSTSEL_").ignore(&["config"]).split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

/// Load config, returning a default if the file is missing or broken.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Engine translation ──────────────────────────────────────────────

pub fn engine_config(defaults: &Defaults) -> EngineConfig {
    EngineConfig {
        path_match: defaults.path_match,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.default_profile.as_deref(), Some("default"));
        assert_eq!(config.defaults.output, "table");
        assert_eq!(config.defaults.path_match, PathMatch::Segment);
    }

    #[test]
    fn reads_profiles_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "ops"

[defaults]
output = "json"
path_match = "string-prefix"

[profiles.ops]
listing = "/srv/hosts.json"
role_perms = [3, 1]
"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.defaults.output, "json");
        assert_eq!(
            engine_config(&config.defaults).path_match,
            PathMatch::StringPrefix
        );

        let ops = config.profile("ops").unwrap();
        assert_eq!(ops.listing.as_deref(), Some(Path::new("/srv/hosts.json")));
        let Some(AccessScope::Role(perms)) = ops.access_scope() else {
            panic!("expected a role scope");
        };
        assert_eq!(perms.to_id_list(), vec![CategoryId(1), CategoryId(3)]);
    }

    #[test]
    fn superuser_with_role_perms_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[profiles.x]\nsuperuser = true\nrole_perms = [1]\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn profile_without_scope_defers_to_listing() {
        assert!(Profile::default().access_scope().is_none());
        let admin = Profile {
            superuser: true,
            ..Profile::default()
        };
        assert_eq!(admin.access_scope(), Some(AccessScope::Unrestricted));
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.profiles.insert(
            "lab".into(),
            Profile {
                listing: Some("lab.json".into()),
                ..Profile::default()
            },
        );
        save_config_to(&config, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(
            loaded.profile("lab").unwrap().listing.as_deref(),
            Some(Path::new("lab.json"))
        );
    }
}
