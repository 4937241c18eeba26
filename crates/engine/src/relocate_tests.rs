use super::*;

use std::{
    collections::HashSet,
    fs::{read_to_string, write},
};

#[test]
fn disambiguated_name_cases() {
    let cases: &[(&str, u64, &str)] = &[
        ("report.txt", 1, "report_1.txt"),
        ("report.txt", 12, "report_12.txt"),
        ("archive.tar.gz", 1, "archive.tar_1.gz"),
        ("Makefile", 2, "Makefile_2"),
        (".env", 1, ".env_1"),
        ("trailing.", 1, "trailing_1."),
    ];

    for (name, n, expected) in cases {
        assert_eq!(
            disambiguated_name(OsStr::new(name), *n),
            OsString::from(expected),
            "disambiguated_name({name:?}, {n})"
        );
    }
}

#[test]
fn unique_target_counts_up_monotonically() {
    let dir = Path::new("/dest/text");
    let taken: HashSet<PathBuf> = ["report.txt", "report_1.txt", "report_2.txt"]
        .iter()
        .map(|n| dir.join(n))
        .collect();

    let target = unique_target(dir, OsStr::new("report.txt"), |p| taken.contains(p));
    assert_eq!(target, dir.join("report_3.txt"));

    let free = unique_target(dir, OsStr::new("fresh.txt"), |p| taken.contains(p));
    assert_eq!(free, dir.join("fresh.txt"));
}

#[test]
fn relocate_creates_bucket_and_moves() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let src = tmp.path().join("report.txt");
    write(&src, b"q1").expect("write src");

    let bucket = tmp.path().join("out").join("text");
    let moved = relocate(&src, &bucket).expect("relocate");

    assert_eq!(moved, bucket.join("report.txt"));
    assert!(!src.exists());
    assert_eq!(read_to_string(&moved).unwrap(), "q1");
}

#[test]
fn relocate_never_overwrites() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let bucket = tmp.path().join("text");
    let a = tmp.path().join("a");
    let b = tmp.path().join("b");
    std::fs::create_dir_all(&a).unwrap();
    std::fs::create_dir_all(&b).unwrap();
    write(a.join("report.txt"), b"first").unwrap();
    write(b.join("report.txt"), b"second").unwrap();

    let first = relocate(&a.join("report.txt"), &bucket).expect("first move");
    let second = relocate(&b.join("report.txt"), &bucket).expect("second move");

    assert_eq!(first, bucket.join("report.txt"));
    assert_eq!(second, bucket.join("report_1.txt"));
    assert_eq!(read_to_string(&first).unwrap(), "first");
    assert_eq!(read_to_string(&second).unwrap(), "second");
}

#[cfg(unix)]
#[test]
fn dangling_symlink_counts_as_occupied() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let link = tmp.path().join("ghost.txt");
    std::os::unix::fs::symlink(tmp.path().join("missing"), &link).unwrap();

    assert!(!link.exists());
    assert!(occupied(&link));
}

#[test]
fn relocate_missing_source_reports_move_error() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let src = tmp.path().join("vanished.txt");

    let err = relocate(&src, &tmp.path().join("text")).unwrap_err();
    assert!(matches!(err, SortError::Move { .. }));
    assert!(err.to_string().contains("vanished.txt"));
}

#[test]
fn relocate_into_a_file_path_fails_to_create_bucket() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let blocker = tmp.path().join("text");
    write(&blocker, b"not a dir").unwrap();
    let src = tmp.path().join("a.txt");
    write(&src, b"a").unwrap();

    let err = relocate(&src, &blocker).unwrap_err();
    assert!(matches!(err, SortError::CreateDir { .. }));
    assert!(src.exists(), "source must stay when the bucket cannot be made");
}
