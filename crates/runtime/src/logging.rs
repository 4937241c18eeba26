use std::{io::Write, sync::OnceLock};
#[cfg(test)]
use std::sync::Mutex;

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::config::PROGRAM_LOG_LEVEL;

enum LogTarget {
    Stderr,
    #[cfg(test)]
    Buffer(Mutex<Vec<String>>),
}

pub struct Logger {
    level: Level,
    target: LogTarget,
}

impl Logger {
    fn format(record: &Record<'_>) -> String {
        format!(
            "{} {:<5} [{}] {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let msg = Self::format(record);
        match &self.target {
            LogTarget::Stderr => {
                // A closed stderr must never take the process down.
                let _ = writeln!(std::io::stderr().lock(), "{msg}");
            }
            #[cfg(test)]
            LogTarget::Buffer(lines) => {
                if let Ok(mut lines) = lines.lock() {
                    lines.push(msg);
                }
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn parse_level(raw: Option<&str>) -> Level {
    raw.and_then(|s| s.trim().parse::<LevelFilter>().ok())
        .and_then(|filter| filter.to_level())
        .unwrap_or(Level::Warn)
}

fn get_level_from_env() -> Level {
    parse_level(std::env::var(PROGRAM_LOG_LEVEL).ok().as_deref())
}

/// Install the stderr logger with the level taken from `DARION_LOG_LEVEL`.
pub fn init() -> Result<(), SetLoggerError> {
    init_with_level(get_level_from_env())
}

/// Install the stderr logger at a fixed level. Later calls are no-ops.
pub fn init_with_level(level: Level) -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<Logger> = OnceLock::new();

    // Only the first caller may register; set_max_level must agree with the
    // level stored in the logger that actually won get_or_init.
    let init_call = LOGGER.get().is_none();

    let logger = LOGGER.get_or_init(|| Logger {
        level,
        target: LogTarget::Stderr,
    });

    if init_call {
        log::set_logger(logger)?;
        log::set_max_level(logger.level.to_level_filter());
    }

    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
