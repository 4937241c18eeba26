use std::{path::PathBuf, process::ExitCode, time::Instant};

use anyhow::Result;
use clap::Args;
use darion_engine::{SortCriterion, SortError, SortReport, SortRequest, SortResult, Sorter};
use darion_runtime::{
    AgentConfig,
    history::{HistoryStore, SortEvent},
};
use log::error;

use crate::commands::OutputOptions;

#[derive(Debug, Args)]
pub struct SortArgs {
    /// Directory to take files from
    pub source: PathBuf,

    /// Directory that receives one subdirectory per bucket
    pub dest: PathBuf,

    /// Bucketing criterion: date, type, size or name
    #[arg(long, value_name = "CRITERION")]
    pub by: Option<String>,

    /// Descend into subdirectories even when DARION_RECURSIVE is off
    #[arg(long, conflicts_with = "no_recursive")]
    pub recursive: bool,

    /// Only sort files directly inside SOURCE
    #[arg(long)]
    pub no_recursive: bool,

    /// Print the planned moves without touching anything
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub output: OutputOptions,
}

impl SortArgs {
    /// Command-line flags win over the configured default.
    fn recursion(&self, default: bool) -> bool {
        if self.recursive {
            true
        } else if self.no_recursive {
            false
        } else {
            default
        }
    }
}

pub fn run(args: SortArgs) -> ExitCode {
    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[error] {e:#}");
            ExitCode::from(2)
        }
    }
}

fn execute(args: SortArgs) -> Result<ExitCode> {
    let config = AgentConfig::from_env();
    let criterion = args
        .by
        .clone()
        .unwrap_or_else(|| config.default_criterion.clone());
    let recursive = args.recursion(config.default_recursive);

    let started = Instant::now();
    let outcome = criterion.parse::<SortCriterion>().and_then(|by| {
        let req = SortRequest::new(&args.source, &args.dest, by, recursive).dry_run(args.dry_run);
        Sorter::new(&config).sort(&req)
    });
    let elapsed = started.elapsed().as_millis().min(u32::MAX as u128) as u32;

    if !args.dry_run
        && let Some(store) = HistoryStore::new(&config)
    {
        store.log_sort(history_event(&args, criterion, recursive, elapsed, &outcome));
    }

    let mut printer = args.output.make_printer();
    match outcome {
        Ok(report) => {
            printer.sort_report(&report)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("[sort] {e}");
            let code = failure_code(&e);
            let result = SortResult::from(Err(e));
            printer.sort_failure(&result.message)?;
            Ok(ExitCode::from(code))
        }
    }
}

/// A rejected request is a usage error; a run that failed part way is not.
fn failure_code(err: &SortError) -> u8 {
    if err.is_validation() { 2 } else { 1 }
}

fn history_event(
    args: &SortArgs,
    criterion: String,
    recursive: bool,
    elapsed_ms: u32,
    outcome: &Result<SortReport, SortError>,
) -> SortEvent {
    let event = SortEvent::new(
        args.source.clone(),
        args.dest.clone(),
        criterion,
        recursive,
        elapsed_ms,
    );

    match outcome {
        Ok(report) => event.succeeded(report.statistics.total_files, report.statistics.total_size),
        Err(_) => event,
    }
}

#[cfg(test)]
#[path = "sort_tests.rs"]
mod tests;
