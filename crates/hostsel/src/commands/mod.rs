//! Command dispatch: bridges CLI args -> core engine -> output formatting.

pub mod categories;
pub mod config_cmd;
pub mod hosts;
pub mod perms;
pub mod select;
pub mod tags;
pub mod util;

use crate::cli::Command;
use crate::config::Settings;
use crate::error::CliError;

/// Dispatch a listing-bound command to the appropriate handler.
pub fn dispatch(cmd: &Command, settings: &Settings) -> Result<(), CliError> {
    match cmd {
        Command::Hosts(args) => hosts::handle(args, settings),
        Command::Categories(args) => categories::handle(args, settings),
        Command::Tags(args) => tags::handle(args, settings),
        Command::Perms(args) => perms::handle(args, settings),
        Command::Select(args) => select::handle(args, settings),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
