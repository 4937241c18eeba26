use std::process::ExitCode;

use chrono::Local;
use clap::Args;
use darion_runtime::{AgentConfig, history::HistoryStore};
use log::{error, info};

use crate::printer::human_size;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Number of entries to display
    #[arg(long, short = 'n', default_value = "20")]
    pub limit: usize,

    /// Clear all history
    #[arg(long)]
    pub clear: bool,
}

pub fn run(args: HistoryArgs) -> ExitCode {
    let Some(store) = HistoryStore::new(&AgentConfig::from_env()) else {
        info!("[history] history is currently disabled");
        println!("History is disabled.");
        return ExitCode::SUCCESS;
    };

    if args.clear {
        return match store.clear() {
            Ok(()) => {
                println!("History cleared");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("[history] failed to clear {}: {e}", store.path().display());
                eprintln!("[error] Failed to clear history: {e}");
                ExitCode::from(1)
            }
        };
    }

    let sorts = store.recent_sorts(args.limit);
    if sorts.is_empty() {
        println!("No history yet.");
        return ExitCode::SUCCESS;
    }

    println!(
        "{:<20}  {:<4}  {:<5}  {:>6}  {:>10}  {:>8}  RUN",
        "TIMESTAMP", "OK", "BY", "FILES", "SIZE", "TIME"
    );
    println!("{}", "-".repeat(96));

    for sort in &sorts {
        let ts = sort
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        let ok = if sort.success { "yes" } else { "no" };
        let recursion = if sort.recursive { "" } else { " (top level)" };

        println!(
            "{:<20}  {:<4}  {:<5}  {:>6}  {:>10}  {:>6}ms  {} -> {}{}",
            ts,
            ok,
            sort.criterion,
            sort.files,
            human_size(sort.bytes),
            sort.duration_ms,
            sort.source.display(),
            sort.dest.display(),
            recursion
        );
    }

    let total = store.count();
    if total > args.limit {
        println!(
            "\n({} more entries, use --limit to show more)",
            total - args.limit
        );
    }

    ExitCode::SUCCESS
}
