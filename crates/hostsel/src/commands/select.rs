//! Scripted selection sessions.
//!
//! Replays the events an interactive picker would emit (criteria changes,
//! row clicks, bulk-checkbox updates) through a `SelectorSession` and
//! prints the confirmed selection.

use serde::Deserialize;

use hostsel_core::{FilterCriteria, HostId, SelectorSession};

use crate::cli::SelectArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::util::{self, HostRow};

/// One picker event.
///
/// ```json
/// [{"filter": {"category": "prod"}}, {"bulk": [1, 2]}, {"toggle": 7}, "cancel"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Replace the applied criteria.
    Filter(FilterCriteria),
    /// Row click.
    Toggle(HostId),
    /// The bulk checkbox column now reports exactly these rows as checked.
    Bulk(Vec<HostId>),
    /// Close the picker without confirming.
    Cancel,
}

pub fn parse_script(raw: &str) -> Result<Vec<ScriptEvent>, CliError> {
    serde_json::from_str(raw).map_err(|e| CliError::InvalidScript {
        reason: e.to_string(),
    })
}

pub fn handle(args: &SelectArgs, settings: &Settings) -> Result<(), CliError> {
    let script = parse_script(&util::read_input(&args.script)?)?;

    let path = settings.listing_path(args.source.listing.as_deref())?;
    let listing = util::read_listing(&path)?;
    let scope = settings.scope(args.source.role_perms.as_deref(), &listing);

    let mut session = SelectorSession::new(&settings.engine);
    let ticket = session.begin_refresh();
    session
        .apply_listing(ticket, listing, scope)
        .map_err(|e| util::listing_error(&path, e))?;

    let Some(session) = replay(session, script)? else {
        output::note("selection cancelled", settings.quiet);
        return Ok(());
    };

    let selected = session.confirm();
    output::note(&format!("{} hosts selected", selected.len()), settings.quiet);

    let out = output::render_list(
        settings.output,
        &selected,
        |h| HostRow::from(h),
        |h| h.id.to_string(),
    )?;
    output::print_output(&out, settings.quiet);
    Ok(())
}

/// Feed `events` to the session. `None` when the script cancels.
pub fn replay(
    mut session: SelectorSession,
    events: Vec<ScriptEvent>,
) -> Result<Option<SelectorSession>, CliError> {
    for (step, event) in events.into_iter().enumerate() {
        tracing::debug!(step, ?event, "replaying event");
        match event {
            ScriptEvent::Filter(criteria) => session.set_criteria(criteria)?,
            ScriptEvent::Toggle(id) => session.toggle(id)?,
            ScriptEvent::Bulk(ids) => session.bulk_change(ids)?,
            ScriptEvent::Cancel => {
                session.cancel();
                return Ok(None);
            }
        }
        tracing::debug!(
            step,
            visible = session.visible_ids().len(),
            selected = session.selected_count(),
            "event applied"
        );
    }
    Ok(Some(session))
}
