use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse bucket derived from a file's content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Image,
    Document,
    Spreadsheet,
    Presentation,
    Archive,
    Text,
    Video,
    Audio,
    Other,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Image => "image",
            Category::Document => "document",
            Category::Spreadsheet => "spreadsheet",
            Category::Presentation => "presentation",
            Category::Archive => "archive",
            Category::Text => "text",
            Category::Video => "video",
            Category::Audio => "audio",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content-type prefixes per category. Evaluated top to bottom, first hit wins.
///
/// The OOXML prefix under `Document` also covers the spreadsheet and
/// presentation variants, so those never reach their own rows. Reordering
/// this table changes how `.xlsx`/`.pptx` files are bucketed.
pub const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (Category::Image, &["image/"]),
    (
        Category::Document,
        &[
            "application/pdf",
            "application/msword",
            "application/vnd.openxmlformats-officedocument",
        ],
    ),
    (
        Category::Spreadsheet,
        &[
            "application/vnd.ms-excel",
            "application/vnd.openxmlformats-officedocument.spreadsheetml",
        ],
    ),
    (
        Category::Presentation,
        &[
            "application/vnd.ms-powerpoint",
            "application/vnd.openxmlformats-officedocument.presentationml",
        ],
    ),
    (
        Category::Archive,
        &[
            "application/zip",
            "application/x-rar-compressed",
            "application/x-tar",
        ],
    ),
    (Category::Text, &["text/"]),
    (Category::Video, &["video/"]),
    (Category::Audio, &["audio/"]),
];

pub fn categorize(content_type: &str) -> Category {
    CATEGORY_RULES
        .iter()
        .find(|(_, prefixes)| prefixes.iter().any(|p| content_type.starts_with(p)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

#[cfg(test)]
#[path = "category_tests.rs"]
mod tests;
