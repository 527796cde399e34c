//! Tag listing handler.

use tabled::Tabled;

use crate::cli::TagsArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "Tag")]
    tag: String,
}

pub fn handle(args: &TagsArgs, settings: &Settings) -> Result<(), CliError> {
    let catalog = util::load_catalog(settings, &args.source)?;
    let tags = catalog.tags();

    let out = output::render_list(
        settings.output,
        &tags,
        |t| TagRow { tag: t.clone() },
        String::clone,
    )?;
    output::print_output(&out, settings.quiet);
    Ok(())
}
