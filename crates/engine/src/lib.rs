mod criterion;
mod error;
mod relocate;
mod sorter;
mod stats;

pub use criterion::{CRITERIA, SIZE_BUCKETS, SizeBucket, SortCriterion, name_bucket};
pub use error::{SUPPORTED_CRITERIA, SortError};
pub use relocate::{disambiguated_name, move_file, relocate, unique_target};
pub use sorter::{Relocation, SortReport, SortRequest, SortResult, Sorter, sort_files};
pub use stats::{CategoryStats, SortStatistics};
