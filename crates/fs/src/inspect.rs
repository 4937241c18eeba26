use std::{
    fs::{self, File},
    io::{self, Read},
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use chrono::{DateTime, Local};
use darion_runtime::{AgentConfig, DEFAULT_SNIFF_LEN};
use log::debug;
use thiserror::Error;

use crate::{
    category::categorize,
    record::FileRecord,
    sniff::{Sniffed, sniff},
};

pub const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("failed to read metadata for {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("not a regular file: {}", .path.display())]
    NotAFile { path: PathBuf },
}

impl InspectError {
    pub fn path(&self) -> &Path {
        match self {
            InspectError::Metadata { path, .. } | InspectError::NotAFile { path } => path,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InspectOptions {
    /// How many leading bytes are handed to the sniffer.
    pub sniff_len: usize,
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            sniff_len: DEFAULT_SNIFF_LEN,
        }
    }
}

impl From<&AgentConfig> for InspectOptions {
    fn from(cfg: &AgentConfig) -> Self {
        Self {
            sniff_len: cfg.sniff_len,
        }
    }
}

/// Collect metadata for a single regular file.
///
/// Only reads: timestamps are taken from the metadata before the header is
/// opened, so the access time reported is the one prior to inspection.
pub fn inspect(path: &Path, opts: &InspectOptions) -> Result<FileRecord, InspectError> {
    let metadata = fs::metadata(path).map_err(|source| InspectError::Metadata {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_file() {
        return Err(InspectError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let modified = metadata.modified().ok();
    // Not every filesystem records a birth time.
    let created = metadata.created().ok().or(modified);
    let accessed = metadata.accessed().ok();

    let content_type = resolve_content_type(path, opts.sniff_len);
    let category = categorize(&content_type);

    Ok(FileRecord {
        name,
        path: path.to_path_buf(),
        size: metadata.len(),
        created: to_local(created),
        modified: to_local(modified),
        accessed: to_local(accessed),
        content_type,
        category,
    })
}

/// Signature match, else extension guess, else `text/plain` for text-like
/// content, else `application/octet-stream`.
pub fn resolve_content_type(path: &Path, sniff_len: usize) -> String {
    let sniffed = match read_header(path, sniff_len) {
        Ok(header) => sniff(&header),
        Err(e) => {
            debug!("[inspect] cannot read header of {:?}: {e}", path);
            None
        }
    };

    if let Some(Sniffed::Signature(mime)) = sniffed {
        return mime.to_owned();
    }

    mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_owned())
        .or_else(|| sniffed.map(|s| s.mime().to_owned()))
        .unwrap_or_else(|| OCTET_STREAM.to_owned())
}

fn read_header(path: &Path, len: usize) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut buf = Vec::with_capacity(len);
    file.take(len as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

fn to_local(t: Option<SystemTime>) -> DateTime<Local> {
    DateTime::<Local>::from(t.unwrap_or(UNIX_EPOCH))
}

#[cfg(test)]
#[path = "inspect_tests.rs"]
mod tests;
