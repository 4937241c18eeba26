mod category;
mod inspect;
mod record;
mod sniff;
mod walker;

pub use category::{CATEGORY_RULES, Category, categorize};
pub use inspect::{InspectError, InspectOptions, OCTET_STREAM, inspect, resolve_content_type};
pub use record::FileRecord;
pub use sniff::{Sniffed, sniff};
pub use walker::{WalkOptions, collect_files, scan};
