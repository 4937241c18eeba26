use std::{fmt, str::FromStr};

use darion_fs::FileRecord;
use serde::{Deserialize, Serialize};

use crate::error::SortError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortCriterion {
    /// `YYYY-MM` of the creation time
    Date,
    /// Content category
    Type,
    /// Size bucket
    Size,
    /// Uppercased first letter, `#` otherwise
    Name,
}

/// Accepted criterion names. Matching is exact and case-sensitive.
pub const CRITERIA: &[(&str, SortCriterion)] = &[
    ("date", SortCriterion::Date),
    ("type", SortCriterion::Type),
    ("size", SortCriterion::Size),
    ("name", SortCriterion::Name),
];

impl SortCriterion {
    pub fn as_str(self) -> &'static str {
        CRITERIA
            .iter()
            .find(|(_, c)| *c == self)
            .map(|(name, _)| *name)
            .unwrap_or("type")
    }

    /// Name of the destination subdirectory for `rec`.
    pub fn bucket(self, rec: &FileRecord) -> String {
        match self {
            SortCriterion::Date => rec.created.format("%Y-%m").to_string(),
            SortCriterion::Type => rec.category.as_str().to_owned(),
            SortCriterion::Size => SizeBucket::for_size(rec.size).as_str().to_owned(),
            SortCriterion::Name => name_bucket(&rec.name),
        }
    }
}

impl FromStr for SortCriterion {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CRITERIA
            .iter()
            .find(|(name, _)| *name == s)
            .map(|(_, c)| *c)
            .ok_or_else(|| SortError::UnsupportedCriterion {
                criterion: s.to_owned(),
            })
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeBucket {
    Tiny,
    Small,
    Medium,
    Large,
    Huge,
}

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

/// Half-open `[min, max)` byte ranges; `None` is unbounded above.
pub const SIZE_BUCKETS: &[(SizeBucket, u64, Option<u64>)] = &[
    (SizeBucket::Tiny, 0, Some(100 * KIB)),
    (SizeBucket::Small, 100 * KIB, Some(MIB)),
    (SizeBucket::Medium, MIB, Some(100 * MIB)),
    (SizeBucket::Large, 100 * MIB, Some(GIB)),
    (SizeBucket::Huge, GIB, None),
];

impl SizeBucket {
    pub fn for_size(size: u64) -> SizeBucket {
        SIZE_BUCKETS
            .iter()
            .find(|(_, min, max)| size >= *min && max.is_none_or(|max| size < max))
            .map(|(bucket, _, _)| *bucket)
            .unwrap_or(SizeBucket::Huge)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SizeBucket::Tiny => "tiny",
            SizeBucket::Small => "small",
            SizeBucket::Medium => "medium",
            SizeBucket::Large => "large",
            SizeBucket::Huge => "huge",
        }
    }
}

impl fmt::Display for SizeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn name_bucket(name: &str) -> String {
    match name.chars().next() {
        Some(c) if c.is_alphabetic() => c.to_uppercase().collect(),
        _ => "#".to_owned(),
    }
}

#[cfg(test)]
#[path = "criterion_tests.rs"]
mod tests;
