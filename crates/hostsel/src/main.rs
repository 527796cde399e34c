mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(&cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands never need a listing
        Command::Config(ref args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(ref args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "hostsel", &mut std::io::stdout());
            Ok(())
        }

        // Everything else reads a listing under the resolved settings
        ref cmd => {
            let cfg = config::load_config()?;
            let settings = config::resolve(&cli.global, &cfg)?;

            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &settings)
        }
    }
}
