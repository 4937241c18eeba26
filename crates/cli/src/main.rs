use std::process::ExitCode;

use clap::Parser;

mod commands;
mod printer;

use commands::Command;
use darion_runtime::logging;

#[derive(Debug, Parser)]
#[command(
    name = "darion",
    version,
    about = "Sort files into categories and relay requests to your services",
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

fn main() -> ExitCode {
    logging::init().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Sort(args) => commands::sort::run(args),
        Command::Inspect(args) => commands::inspect::run(args),
        Command::Ask(args) => commands::ask::run(args),
        Command::History(args) => commands::history::run(args),
    }
}
