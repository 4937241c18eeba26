use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use darion_fs::{Category, FileRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub count: usize,
    pub total_size: u64,
}

/// Aggregate view of the files a sort run processed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortStatistics {
    pub total_files: usize,
    pub total_size: u64,
    pub categories: BTreeMap<Category, CategoryStats>,
    /// Earliest creation time; `None` when no files were processed.
    pub oldest_file: Option<DateTime<Local>>,
    pub newest_file: Option<DateTime<Local>>,
}

impl SortStatistics {
    pub fn from_records(records: &[FileRecord]) -> Self {
        let mut stats = SortStatistics::default();

        for rec in records {
            stats.total_files += 1;
            stats.total_size += rec.size;

            let entry = stats.categories.entry(rec.category).or_default();
            entry.count += 1;
            entry.total_size += rec.size;
        }

        stats.oldest_file = records.iter().map(|r| r.created).min();
        stats.newest_file = records.iter().map(|r| r.created).max();
        stats
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
