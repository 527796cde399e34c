//! Clap derive structures for the `hostsel` CLI.
//!
//! Defines the command tree, global flags, and shared argument groups.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use hostsel_core::{CategoryId, PathMatch, RoleId};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hostsel -- scope, filter and pick hosts from a host listing
#[derive(Debug, Parser)]
#[command(
    name = "hostsel",
    version,
    about = "Filter, scope and select hosts from a host listing",
    long_about = "Reads a JSON host listing, narrows it to the categories a role\n\
        may access, filters it by category, name and tags, and replays\n\
        selection sessions against it.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "HOSTSEL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "HOSTSEL_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Category matching: `segment` or `string-prefix`
    #[arg(long, value_name = "MODE", global = true)]
    pub path_match: Option<PathMatch>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the hosts visible after scoping and filtering
    #[command(alias = "ls")]
    Hosts(HostsArgs),

    /// List categories, populated zones, or the picker tree
    #[command(alias = "cat")]
    Categories(CategoriesArgs),

    /// List tags used by visible hosts
    Tags(TagsArgs),

    /// Edit a role's category permissions
    Perms(PermsArgs),

    /// Replay a scripted selection session
    Select(SelectArgs),

    /// Inspect CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Where hosts come from and which of them the caller may see.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// JSON host listing (overrides the profile's `listing`)
    #[arg(long, short = 'L', value_name = "FILE")]
    pub listing: Option<PathBuf>,

    /// Restrict to hosts under these granted category ids
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    pub role_perms: Option<Vec<CategoryId>>,
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Category path prefix (e.g. "prod/web")
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Case-insensitive name substring
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Required tag (repeatable; all must match)
    #[arg(long = "tag", short = 't', value_name = "TAG")]
    pub tags: Vec<String>,
}

// ── Command Arguments ────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct HostsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only category paths that hold a visible host
    #[arg(long, conflicts_with = "tree")]
    pub zones: bool,

    /// Render the pruned picker tree
    #[arg(long)]
    pub tree: bool,
}

#[derive(Debug, Args)]
pub struct TagsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args)]
pub struct PermsArgs {
    /// JSON listing providing the category tree
    #[arg(long, short = 'L', value_name = "FILE")]
    pub listing: Option<PathBuf>,

    /// Role whose permissions are edited
    #[arg(long)]
    pub role: RoleId,

    /// Currently granted ids [default: the listing's `perms`]
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    pub current: Option<Vec<CategoryId>>,

    /// Ids to grant
    #[arg(long, value_delimiter = ',', value_name = "IDS", conflicts_with = "set")]
    pub grant: Vec<CategoryId>,

    /// Ids to revoke (applied after grants)
    #[arg(long, value_delimiter = ',', value_name = "IDS", conflicts_with = "set")]
    pub revoke: Vec<CategoryId>,

    /// Replace the grant list outright
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    pub set: Option<Vec<CategoryId>>,

    /// Print the transfer view narrowed by this path search instead
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Debug, Args)]
pub struct SelectArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// JSON array of events (`filter`, `toggle`, `bulk`, `cancel`); `-` reads stdin
    #[arg(long, short = 's', value_name = "FILE")]
    pub script: PathBuf,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display current resolved configuration
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
