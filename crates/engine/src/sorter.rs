use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use darion_fs::{FileRecord, InspectOptions, WalkOptions, scan};
use darion_runtime::AgentConfig;
use log::{error, info, warn};
use serde::Serialize;

use crate::{
    criterion::SortCriterion,
    error::SortError,
    relocate::{occupied, relocate, unique_target},
    stats::SortStatistics,
};

#[derive(Debug, Clone)]
pub struct SortRequest {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub criterion: SortCriterion,
    pub recursive: bool,
    /// Plan target paths without creating directories or moving anything.
    pub dry_run: bool,
}

impl SortRequest {
    pub fn new(
        source: impl Into<PathBuf>,
        dest: impl Into<PathBuf>,
        criterion: SortCriterion,
        recursive: bool,
    ) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            criterion,
            recursive,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relocation {
    pub from: PathBuf,
    pub to: PathBuf,
    pub bucket: String,
}

#[derive(Debug, Clone)]
pub struct SortReport {
    pub criterion: SortCriterion,
    pub statistics: SortStatistics,
    /// In processing order. Planned rather than performed on a dry run.
    pub relocations: Vec<Relocation>,
    pub dry_run: bool,
}

impl SortReport {
    pub fn message(&self) -> String {
        if self.dry_run {
            format!(
                "Would sort {} files by {}",
                self.statistics.total_files, self.criterion
            )
        } else {
            format!(
                "Successfully sorted {} files by {}",
                self.statistics.total_files, self.criterion
            )
        }
    }
}

/// Outcome handed to callers that only need success, a message and, on
/// success, the statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortResult {
    pub success: bool,
    pub message: String,
    pub statistics: Option<SortStatistics>,
}

impl From<Result<SortReport, SortError>> for SortResult {
    fn from(outcome: Result<SortReport, SortError>) -> Self {
        match outcome {
            Ok(report) => SortResult {
                success: true,
                message: report.message(),
                statistics: Some(report.statistics),
            },
            Err(e) => SortResult {
                success: false,
                message: format!("Error sorting files: {e}"),
                statistics: None,
            },
        }
    }
}

pub struct Sorter {
    inspect: InspectOptions,
}

impl Sorter {
    pub fn new(config: &AgentConfig) -> Self {
        Self {
            inspect: InspectOptions::from(config),
        }
    }

    /// Traverse, bucket and move in one pass.
    ///
    /// A failed move aborts the run; files moved before it stay where they
    /// were put.
    pub fn sort(&self, req: &SortRequest) -> Result<SortReport, SortError> {
        if !req.dry_run {
            fs::create_dir_all(&req.dest).map_err(|source| SortError::CreateDir {
                path: req.dest.clone(),
                source,
            })?;
        }

        let walk = WalkOptions {
            recursive: req.recursive,
            exclude: Some(req.dest.clone()),
        };
        let records = scan(&req.source, &walk, &self.inspect).map_err(|source| {
            SortError::Traverse {
                path: req.source.clone(),
                source,
            }
        })?;

        info!(
            "[sort] {} files in {:?} by {} (recursive={}, dry_run={})",
            records.len(),
            req.source,
            req.criterion,
            req.recursive,
            req.dry_run
        );

        let relocations = if req.dry_run {
            plan(&records, &req.dest, req.criterion)
        } else {
            apply(&records, &req.dest, req.criterion)?
        };

        Ok(SortReport {
            criterion: req.criterion,
            statistics: SortStatistics::from_records(&records),
            relocations,
            dry_run: req.dry_run,
        })
    }
}

fn apply(
    records: &[FileRecord],
    dest: &Path,
    criterion: SortCriterion,
) -> Result<Vec<Relocation>, SortError> {
    let mut moves = Vec::with_capacity(records.len());

    for rec in records {
        let bucket = criterion.bucket(rec);
        let to = match relocate(&rec.path, &dest.join(&bucket)) {
            Ok(to) => to,
            Err(e) => {
                warn!("[sort] aborting after {} moves: {e}", moves.len());
                return Err(e);
            }
        };
        moves.push(Relocation {
            from: rec.path.clone(),
            to,
            bucket,
        });
    }

    Ok(moves)
}

fn plan(records: &[FileRecord], dest: &Path, criterion: SortCriterion) -> Vec<Relocation> {
    let mut claimed: HashSet<PathBuf> = HashSet::new();
    let mut moves = Vec::with_capacity(records.len());

    for rec in records {
        let bucket = criterion.bucket(rec);
        let Some(file_name) = rec.path.file_name() else {
            continue;
        };

        let to = unique_target(&dest.join(&bucket), file_name, |p| {
            claimed.contains(p) || occupied(p)
        });
        claimed.insert(to.clone());

        moves.push(Relocation {
            from: rec.path.clone(),
            to,
            bucket,
        });
    }

    moves
}

/// String-level entry point: validates `criterion` before touching the
/// filesystem and folds every error into an unsuccessful [`SortResult`].
pub fn sort_files(
    source: &Path,
    dest: &Path,
    criterion: &str,
    recursive: bool,
    config: &AgentConfig,
) -> SortResult {
    let outcome = criterion.parse::<SortCriterion>().and_then(|criterion| {
        Sorter::new(config).sort(&SortRequest::new(source, dest, criterion, recursive))
    });

    if let Err(e) = &outcome {
        error!("Error sorting files: {e}");
    }

    SortResult::from(outcome)
}

#[cfg(test)]
#[path = "sorter_tests.rs"]
mod tests;
