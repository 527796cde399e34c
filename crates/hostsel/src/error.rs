//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use hostsel_config::ConfigError;
use hostsel_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(hostsel::not_found),
        help("Run: hostsel {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Listing ──────────────────────────────────────────────────────

    #[error("No host listing given")]
    #[diagnostic(
        code(hostsel::no_listing),
        help(
            "Pass --listing <FILE>, or set `listing` in profile '{profile}'.\n\
             Run: hostsel config show"
        )
    )]
    NoListing { profile: String },

    #[error("Host listing {path} is unusable: {reason}")]
    #[diagnostic(
        code(hostsel::invalid_listing),
        help("The listing must be a JSON object with `hosts` and optional `categories` / `perms`.")
    )]
    InvalidListing { path: String, reason: String },

    #[error("Selection script is unusable: {reason}")]
    #[diagnostic(
        code(hostsel::invalid_script),
        help(
            "Expected a JSON array of events, e.g.\n\
             [{{\"filter\": {{\"category\": \"prod\"}}}}, {{\"bulk\": [1, 2]}}, {{\"toggle\": 7}}]"
        )
    )]
    InvalidScript { reason: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(hostsel::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(hostsel::profile_not_found),
        help("Available profiles: {available}\nRun: hostsel config profiles")
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(hostsel::config))]
    Config(Box<figment::Error>),

    #[error("Failed to write config: {0}")]
    #[diagnostic(code(hostsel::config_write))]
    ConfigWrite(#[from] toml::ser::Error),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(hostsel::render))]
    Render(String),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. }
            | Self::NoListing { .. }
            | Self::ProfileNotFound { .. }
            | Self::InvalidScript { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CategoryNotFound { id } => CliError::NotFound {
                resource_type: "category".into(),
                identifier: id.to_string(),
                list_command: "categories".into(),
            },

            CoreError::HostNotFound { id } => CliError::NotFound {
                resource_type: "host".into(),
                identifier: id.to_string(),
                list_command: "hosts".into(),
            },

            CoreError::InvalidCriteria { field, reason } => CliError::Validation { field, reason },

            CoreError::InvalidTree { reason } => CliError::InvalidListing {
                path: "(categories)".into(),
                reason,
            },

            CoreError::Deserialization { message } => CliError::InvalidListing {
                path: "(input)".into(),
                reason: message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Serialization(e) => CliError::ConfigWrite(e),
            ConfigError::Figment(e) => CliError::Config(e),
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}
