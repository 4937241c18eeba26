use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{AgentConfig, state_dir};

pub const HISTORY_VERSION: u8 = 1;

pub const HISTORY_FILE_NAME: &str = "history.log";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub enum HistoryEvent {
    Sort(SortEvent),
}

/// One completed (or failed) sort run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SortEvent {
    /// Schema version
    pub version: u8,

    pub timestamp: DateTime<Utc>,

    pub source: PathBuf,
    pub dest: PathBuf,
    /// Criterion as requested, including unsupported ones.
    pub criterion: String,
    pub recursive: bool,

    pub success: bool,

    /// Files processed. Zero for failed runs.
    pub files: usize,
    /// Bytes processed. Zero for failed runs.
    pub bytes: u64,

    pub duration_ms: u32,
}

impl SortEvent {
    pub fn new(
        source: PathBuf,
        dest: PathBuf,
        criterion: String,
        recursive: bool,
        duration_ms: u32,
    ) -> Self {
        Self {
            version: HISTORY_VERSION,
            timestamp: Utc::now(),
            source,
            dest,
            criterion,
            recursive,
            success: false,
            files: 0,
            bytes: 0,
            duration_ms,
        }
    }

    pub fn succeeded(mut self, files: usize, bytes: u64) -> Self {
        self.success = true;
        self.files = files;
        self.bytes = bytes;
        self
    }
}

pub struct HistoryStore {
    path: PathBuf,
}

pub fn history_log_path() -> Option<PathBuf> {
    state_dir().map(|d| d.join(HISTORY_FILE_NAME))
}

impl HistoryStore {
    /// Open the default store, or `None` when history is disabled or no
    /// state directory can be determined.
    pub fn new(config: &AgentConfig) -> Option<Self> {
        if !config.history_enabled {
            return None;
        }

        let path = history_log_path()?;
        Some(Self { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Best-effort append; failures are only logged.
    pub fn log_sort(&self, event: SortEvent) {
        if let Err(e) = self.append_event(&HistoryEvent::Sort(event)) {
            debug!("Failed to log history event: {}", e);
        }
    }

    fn append_event(&self, event: &HistoryEvent) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut line = serde_json::to_string(event).map_err(io::Error::other)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // One JSON object per line, written with a single write_all on an O_APPEND handle.
        file.write_all(line.as_bytes())?;

        Ok(())
    }

    pub fn iter_events(&self) -> impl Iterator<Item = HistoryEvent> {
        self.read_events().into_iter().flatten()
    }

    fn read_events(&self) -> Option<Vec<HistoryEvent>> {
        let file = File::open(&self.path).ok()?;
        let reader = BufReader::new(file);
        let mut events = Vec::new();
        for line in reader.lines() {
            match line {
                Ok(line) => match serde_json::from_str(&line) {
                    Ok(ev) => events.push(ev),
                    Err(e) => debug!("Skipping malformed history line: {e}"),
                },
                Err(e) => {
                    debug!("Error reading history log: {e}");
                    break;
                }
            }
        }
        Some(events)
    }

    /// Most recent runs first.
    pub fn recent_sorts(&self, limit: usize) -> Vec<SortEvent> {
        let mut sorts: Vec<SortEvent> = self
            .iter_events()
            .map(|e| match e {
                HistoryEvent::Sort(s) => s,
            })
            .collect();

        sorts.reverse();
        sorts.truncate(limit);
        sorts
    }

    pub fn count(&self) -> usize {
        self.iter_events().count()
    }

    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
