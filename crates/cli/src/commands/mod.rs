pub mod ask;
pub mod history;
pub mod inspect;
pub mod sort;

use std::io::{Stderr, Stdout};

use clap::{Args, Subcommand};

use crate::printer::{ColorChoice, HumanPrinter, JsonPrinter, Printer};

pub use ask::AskArgs;
pub use history::HistoryArgs;
pub use inspect::InspectArgs;
pub use sort::SortArgs;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Move every file under SOURCE into DEST/<bucket>/.
    ///
    /// Example:
    ///   darion sort ~/Downloads ~/Sorted
    ///   darion sort --by date --dry-run ~/Pictures ~/Pictures/by-month
    Sort(SortArgs),

    /// Show the detected content type and category of files.
    Inspect(InspectArgs),

    /// Send a free-text request to the assistant.
    ///
    /// Example:
    ///   darion ask sort files from ~/Desktop to ~/Archive by type
    Ask(AskArgs),

    /// Show past sort runs.
    History(HistoryArgs),
}

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output results as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// When to use colors: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: String,
}

impl OutputOptions {
    pub fn make_printer(&self) -> Box<dyn Printer> {
        let color = match self.color.as_str() {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        };

        if self.json {
            Box::new(JsonPrinter::<Stdout>::stdout())
        } else {
            Box::new(HumanPrinter::<Stdout, Stderr>::stdout(color))
        }
    }
}
