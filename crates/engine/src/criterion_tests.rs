use super::*;

use chrono::{Local, TimeZone};
use darion_fs::{Category, categorize};
use std::path::PathBuf;

fn record(name: &str, size: u64, content_type: &str) -> FileRecord {
    let created = Local.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
    FileRecord {
        name: name.to_owned(),
        path: PathBuf::from("/src").join(name),
        size,
        created,
        modified: created,
        accessed: created,
        content_type: content_type.to_owned(),
        category: categorize(content_type),
    }
}

#[test]
fn parse_accepts_exactly_the_supported_names() {
    for (name, criterion) in CRITERIA {
        assert_eq!(name.parse::<SortCriterion>().unwrap(), *criterion);
        assert_eq!(criterion.as_str(), *name);
        assert_eq!(criterion.to_string(), *name);
    }

    for bad in ["alphabetical", "Type", " size", ""] {
        let err = bad.parse::<SortCriterion>().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains(&format!("'{bad}'")));
    }
}

#[test]
fn supported_list_matches_table() {
    let joined: Vec<&str> = CRITERIA.iter().map(|(n, _)| *n).collect();
    assert_eq!(joined.join(", "), crate::SUPPORTED_CRITERIA);
}

#[test]
fn size_buckets_are_half_open() {
    let cases: &[(u64, SizeBucket)] = &[
        (0, SizeBucket::Tiny),
        (100 * KIB - 1, SizeBucket::Tiny),
        (102_400, SizeBucket::Small),
        (MIB - 1, SizeBucket::Small),
        (MIB, SizeBucket::Medium),
        (100 * MIB - 1, SizeBucket::Medium),
        (100 * MIB, SizeBucket::Large),
        (GIB - 1, SizeBucket::Large),
        (GIB, SizeBucket::Huge),
        (u64::MAX, SizeBucket::Huge),
    ];

    for (size, expected) in cases {
        assert_eq!(SizeBucket::for_size(*size), *expected, "size {size}");
    }
}

#[test]
fn size_bucket_table_is_contiguous() {
    for pair in SIZE_BUCKETS.windows(2) {
        let (_, _, upper) = pair[0];
        let (_, lower, _) = pair[1];
        assert_eq!(upper, Some(lower));
    }
    assert_eq!(SIZE_BUCKETS.first().map(|b| b.1), Some(0));
    assert_eq!(SIZE_BUCKETS.last().map(|b| b.2), Some(None));
}

#[test]
fn name_bucket_cases() {
    let cases: &[(&str, &str)] = &[
        ("report.txt", "R"),
        ("Zebra.png", "Z"),
        ("élan.doc", "É"),
        ("straße", "S"),
        ("2024-budget.xlsx", "#"),
        ("_draft.md", "#"),
        (".env", "#"),
        ("", "#"),
    ];

    for (name, expected) in cases {
        assert_eq!(name_bucket(name), *expected, "name_bucket({name:?})");
    }
}

#[test]
fn bucket_per_criterion() {
    let rec = record("minutes.txt", 150 * KIB, "text/plain");

    assert_eq!(SortCriterion::Date.bucket(&rec), "2024-03");
    assert_eq!(SortCriterion::Type.bucket(&rec), "text");
    assert_eq!(SortCriterion::Size.bucket(&rec), "small");
    assert_eq!(SortCriterion::Name.bucket(&rec), "M");

    let other = record("9lives.bin", 10, "application/octet-stream");
    assert_eq!(other.category, Category::Other);
    assert_eq!(SortCriterion::Type.bucket(&other), "other");
    assert_eq!(SortCriterion::Name.bucket(&other), "#");
}
