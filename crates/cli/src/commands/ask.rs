use std::process::ExitCode;

use clap::Args;
use darion_agent::Assistant;
use darion_runtime::{AgentConfig, history::HistoryStore};

#[derive(Debug, Args)]
pub struct AskArgs {
    /// Request in plain words; quote paths that contain spaces
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

pub fn run(args: AskArgs) -> ExitCode {
    let config = AgentConfig::from_env();
    let history = HistoryStore::new(&config);

    let mut assistant = Assistant::new(config);
    if let Some(store) = history {
        assistant = assistant.with_history(store);
    }

    println!("{}", assistant.process_query(&join_words(&args.query)));
    ExitCode::SUCCESS
}

/// Rebuild the request text, re-quoting words the shell had unquoted so
/// paths with spaces survive tokenization.
fn join_words(words: &[String]) -> String {
    words
        .iter()
        .map(|w| {
            if w.contains(char::is_whitespace) {
                format!("\"{w}\"")
            } else {
                w.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "ask_tests.rs"]
mod tests;
