use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Args;
use darion_fs::{InspectOptions, inspect};
use darion_runtime::AgentConfig;

use crate::commands::OutputOptions;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Files to inspect
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub output: OutputOptions,
}

pub fn run(args: InspectArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: InspectArgs) -> Result<ExitCode> {
    let opts = InspectOptions::from(&AgentConfig::from_env());
    let mut printer = args.output.make_printer();
    let mut failed = 0usize;

    for path in &args.paths {
        match inspect(path, &opts) {
            Ok(rec) => printer.record(&rec)?,
            Err(e) => {
                failed += 1;
                printer.inspect_failure(&e)?;
            }
        }
    }

    Ok(if failed > 0 {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}
