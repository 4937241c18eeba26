use std::io::{self, Write};

use chrono::{DateTime, Local};
use darion_engine::{Relocation, SortReport};
use darion_fs::{FileRecord, InspectError};

/// Color handling strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Automatically detect TTY and enable colors if appropriate.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Output sink for sort runs and inspections.
///
/// Results go to the primary writer; human-facing diagnostics go to the
/// secondary one.
pub trait Printer {
    fn relocation(&mut self, rel: &Relocation, dry_run: bool) -> io::Result<()>;

    /// Message line followed by the per-category breakdown.
    fn sort_summary(&mut self, report: &SortReport) -> io::Result<()>;

    fn sort_failure(&mut self, message: &str) -> io::Result<()>;

    fn record(&mut self, rec: &FileRecord) -> io::Result<()>;

    fn inspect_failure(&mut self, err: &InspectError) -> io::Result<()>;

    fn sort_report(&mut self, report: &SortReport) -> io::Result<()> {
        for rel in &report.relocations {
            self.relocation(rel, report.dry_run)?;
        }
        self.sort_summary(report)
    }
}

/// Human-readable printer with optional color support.
pub struct HumanPrinter<W: Write, E: Write> {
    out: W,
    err: E,
    use_color: bool,
}

impl<W: Write, E: Write> HumanPrinter<W, E> {
    /// `Auto` means no color here: a generic writer cannot be probed for a
    /// terminal.
    pub fn new(out: W, err: E, color: ColorChoice) -> Self {
        Self {
            out,
            err,
            use_color: color == ColorChoice::Always,
        }
    }

    #[inline]
    fn paint(&self, text: &str) -> String {
        if self.use_color {
            format!("\x1b[32m{}\x1b[0m", text)
        } else {
            text.to_owned()
        }
    }
}

impl HumanPrinter<io::Stdout, io::Stderr> {
    /// Create a printer that writes to stdout and stderr with TTY detection.
    pub fn stdout(color: ColorChoice) -> Self {
        use std::io::IsTerminal;

        let use_color = match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stdout().is_terminal(),
        };

        HumanPrinter {
            out: io::stdout(),
            err: io::stderr(),
            use_color,
        }
    }
}

impl<W: Write, E: Write> Printer for HumanPrinter<W, E> {
    fn relocation(&mut self, rel: &Relocation, dry_run: bool) -> io::Result<()> {
        let to = self.paint(&rel.to.display().to_string());
        let verb = if dry_run { "would move" } else { "moved" };
        writeln!(self.out, "{verb} {} -> {to}", rel.from.display())
    }

    fn sort_summary(&mut self, report: &SortReport) -> io::Result<()> {
        let stats = &report.statistics;

        if !report.relocations.is_empty() {
            writeln!(self.out)?;
        }
        writeln!(
            self.out,
            "{} ({})",
            report.message(),
            human_size(stats.total_size)
        )?;

        for (category, cs) in &stats.categories {
            writeln!(
                self.out,
                "  {:<14}{:>6}  {:>10}",
                category.as_str(),
                cs.count,
                human_size(cs.total_size)
            )?;
        }

        if let (Some(oldest), Some(newest)) = (stats.oldest_file, stats.newest_file) {
            writeln!(
                self.out,
                "  created between {} and {}",
                timestamp(&oldest),
                timestamp(&newest)
            )?;
        }

        Ok(())
    }

    fn sort_failure(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.err, "[sort] {message}")
    }

    fn record(&mut self, rec: &FileRecord) -> io::Result<()> {
        writeln!(
            self.out,
            "{:<14}{:<40}{:>10}  {}",
            rec.category.as_str(),
            rec.content_type,
            human_size(rec.size),
            self.paint(&rec.path.display().to_string())
        )
    }

    fn inspect_failure(&mut self, err: &InspectError) -> io::Result<()> {
        writeln!(self.err, "[inspect] {err}")
    }
}

/// NDJSON printer; everything, failures included, goes to the primary
/// writer so a consumer sees a single stream.
pub struct JsonPrinter<W: Write> {
    out: W,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl JsonPrinter<io::Stdout> {
    pub fn stdout() -> Self {
        JsonPrinter { out: io::stdout() }
    }
}

impl<W: Write> Printer for JsonPrinter<W> {
    fn relocation(&mut self, rel: &Relocation, dry_run: bool) -> io::Result<()> {
        let obj = serde_json::json!({
            "type": "relocation",
            "from": rel.from,
            "to": rel.to,
            "bucket": rel.bucket,
            "dry_run": dry_run,
        });
        writeln!(self.out, "{}", obj)
    }

    fn sort_summary(&mut self, report: &SortReport) -> io::Result<()> {
        let obj = serde_json::json!({
            "type": "summary",
            "success": true,
            "message": report.message(),
            "criterion": report.criterion.as_str(),
            "dry_run": report.dry_run,
            "statistics": report.statistics,
        });
        writeln!(self.out, "{}", obj)
    }

    fn sort_failure(&mut self, message: &str) -> io::Result<()> {
        let obj = serde_json::json!({
            "type": "summary",
            "success": false,
            "message": message,
        });
        writeln!(self.out, "{}", obj)
    }

    fn record(&mut self, rec: &FileRecord) -> io::Result<()> {
        let line = serde_json::to_string(rec).map_err(io::Error::other)?;
        writeln!(self.out, "{}", line)
    }

    fn inspect_failure(&mut self, err: &InspectError) -> io::Result<()> {
        let obj = serde_json::json!({
            "type": "error",
            "path": err.path(),
            "message": err.to_string(),
        });
        writeln!(self.out, "{}", obj)
    }
}

const SIZE_UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];

/// Binary-prefixed size with one decimal, plain bytes below 1 KiB.
pub fn human_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < SIZE_UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", SIZE_UNITS[unit])
    }
}

pub fn timestamp(ts: &DateTime<Local>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;
