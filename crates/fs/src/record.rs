use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::category::Category;

/// Metadata snapshot of one regular file, taken before anything moves it.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    /// File name
    pub name: String,
    /// Path as discovered during traversal
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Birth time, or the modification time where the platform has none
    pub created: DateTime<Local>,
    pub modified: DateTime<Local>,
    /// Last access time (may be coarse under relatime/noatime mounts)
    pub accessed: DateTime<Local>,
    /// Sniffed or guessed MIME type, e.g. 'image/png'
    pub content_type: String,
    pub category: Category,
}
