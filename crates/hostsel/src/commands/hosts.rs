//! Host listing handler.

use hostsel_core::FilterEngine;

use crate::cli::HostsArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::util::{self, HostRow};

pub fn handle(args: &HostsArgs, settings: &Settings) -> Result<(), CliError> {
    let catalog = util::load_catalog(settings, &args.source)?;
    let criteria = util::criteria_from(&args.filter)?;

    let hosts = FilterEngine::new(&settings.engine).apply(catalog.hosts(), &criteria);
    tracing::info!(
        shown = hosts.len(),
        authorized = catalog.len(),
        hidden = catalog.hidden_count(),
        "hosts filtered"
    );

    let out = output::render_list(
        settings.output,
        &hosts,
        |h| HostRow::from(h),
        |h| h.id.to_string(),
    )?;
    output::print_output(&out, settings.quiet);
    Ok(())
}
