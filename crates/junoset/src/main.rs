mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, ColorMode, OutputFormat};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let matches = Cli::command().get_matches();
    let mut cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    init_tracing(cli.global.verbose);
    apply_config_defaults(&mut cli, &matches);

    if let Err(err) = run(cli).await {
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
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Whether a global flag was given on the command line or through env,
/// at any level of the subcommand chain.
fn explicitly_set(matches: &ArgMatches, id: &str) -> bool {
    matches!(
        matches.value_source(id),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    ) || matches
        .subcommand()
        .is_some_and(|(_, sub)| explicitly_set(sub, id))
}

/// Fill `--output` and `--color` from the config file's `[defaults]`
/// when neither was given explicitly.
fn apply_config_defaults(cli: &mut Cli, matches: &ArgMatches) {
    let cfg = config::load_config_or_default();

    if !explicitly_set(matches, "output") {
        match OutputFormat::from_str(&cfg.defaults.output, true) {
            Ok(format) => cli.global.output = format,
            Err(_) => tracing::warn!(value = %cfg.defaults.output, "ignoring unknown default output"),
        }
    }
    if !explicitly_set(matches, "color") {
        match ColorMode::from_str(&cfg.defaults.color, true) {
            Ok(mode) => cli.global.color = mode,
            Err(_) => tracing::warn!(value = %cfg.defaults.color, "ignoring unknown default color"),
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    tracing::debug!(command = ?cli.command, "dispatching command");
    commands::dispatch(cli.command, &cli.global).await
}
