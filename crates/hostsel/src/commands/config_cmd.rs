//! Config subcommand handlers.

use serde::Serialize;
use tabled::Tabled;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

// ── Rows ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ProfileEntry {
    name: String,
    default: bool,
    listing: Option<String>,
    scope: String,
}

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Profile")]
    name: String,
    #[tabled(rename = "Default")]
    default: String,
    #[tabled(rename = "Listing")]
    listing: String,
    #[tabled(rename = "Scope")]
    scope: String,
}

impl From<&ProfileEntry> for ProfileRow {
    fn from(p: &ProfileEntry) -> Self {
        Self {
            name: p.name.clone(),
            default: if p.default { "*".into() } else { String::new() },
            listing: p.listing.clone().unwrap_or_else(|| "-".into()),
            scope: p.scope.clone(),
        }
    }
}

fn profile_entries(cfg: &Config) -> Vec<ProfileEntry> {
    let default = cfg.default_profile.as_deref().unwrap_or("default");
    let mut entries: Vec<ProfileEntry> = cfg
        .profiles
        .iter()
        .map(|(name, p)| ProfileEntry {
            name: name.clone(),
            default: name == default,
            listing: p.listing.as_ref().map(|l| l.display().to_string()),
            scope: if p.superuser {
                "all hosts".into()
            } else if let Some(ref ids) = p.role_perms {
                format!("{} categories", ids.len())
            } else {
                "from listing".into()
            },
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.output.unwrap_or(OutputFormat::Table);

    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = output::render_single(
                format,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("# {e}")),
                |c| config::active_profile_name(global, c),
            )?;
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            if cfg.profiles.is_empty() {
                output::note(
                    &format!(
                        "No profiles configured. Add [profiles.<name>] to {}",
                        config::config_path().display()
                    ),
                    global.quiet,
                );
                return Ok(());
            }
            let entries = profile_entries(&cfg);
            let out = output::render_list(
                format,
                &entries,
                |p| ProfileRow::from(p),
                |p| p.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Use { ref name } => {
            let mut cfg = config::load_config()?;

            if !cfg.profiles.contains_key(name) {
                return Err(CliError::ProfileNotFound {
                    name: name.clone(),
                    available: config::available_profiles(&cfg),
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            output::note(&format!("Default profile set to '{name}'"), global.quiet);
            Ok(())
        }
    }
}
