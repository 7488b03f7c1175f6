//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod catalog;
pub mod config_cmd;
pub mod device;
pub mod model;
pub mod parse;
pub mod util;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a command to the appropriate handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Render(args) => model::render(&args, global),
        Command::Check(args) => model::check(&args, global),
        Command::Plan(args) => model::plan(&args, global),
        Command::Parse(args) => parse::handle(&args, global),
        Command::Fields => {
            catalog::fields(global);
            Ok(())
        }
        Command::Paths => {
            catalog::paths(global);
            Ok(())
        }
        Command::Read => device::read(global).await,
        Command::Apply(args) => device::apply(&args, global).await,
        Command::Config(args) => config_cmd::handle(&args, global),
        Command::Completions(args) => {
            completions(args.shell);
            Ok(())
        }
    }
}

fn completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;

    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "junoset", &mut std::io::stdout());
}
