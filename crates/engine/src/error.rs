use std::{io, path::PathBuf};

use thiserror::Error;

/// Supported criteria as shown to users, in table order.
pub const SUPPORTED_CRITERIA: &str = "date, type, size, name";

#[derive(Debug, Error)]
pub enum SortError {
    #[error("Unsupported sorting criteria '{criterion}'. Supported: {supported}", supported = SUPPORTED_CRITERIA)]
    UnsupportedCriterion { criterion: String },

    #[error("cannot create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read source directory {}: {source}", .path.display())]
    Traverse {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot move {} to {}: {source}", .from.display(), .to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SortError {
    /// Validation failures happen before anything on disk is touched.
    pub fn is_validation(&self) -> bool {
        matches!(self, SortError::UnsupportedCriterion { .. })
    }
}
