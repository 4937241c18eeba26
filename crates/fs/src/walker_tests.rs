use super::*;

use std::fs::{create_dir, create_dir_all, write};

fn rel(root: &Path, paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
        .collect()
}

/// root/
///   b.txt
///   a.txt
///   sub/
///     c.txt
///     deeper/
///       d.txt
///   another/
///     e.txt
fn sample_tree() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path();

    write(root.join("b.txt"), b"b").expect("write b.txt");
    write(root.join("a.txt"), b"a").expect("write a.txt");
    create_dir_all(root.join("sub").join("deeper")).expect("create sub/deeper");
    write(root.join("sub").join("c.txt"), b"c").expect("write c.txt");
    write(root.join("sub").join("deeper").join("d.txt"), b"d").expect("write d.txt");
    create_dir(root.join("another")).expect("create another");
    write(root.join("another").join("e.txt"), b"e").expect("write e.txt");

    tmp
}

#[test]
fn non_recursive_lists_only_top_level_files() {
    let tmp = sample_tree();
    let root = tmp.path();

    let files = collect_files(root, &WalkOptions::default()).expect("collect_files");

    assert_eq!(
        rel(root, &files),
        vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]
    );
}

#[test]
fn recursive_walk_is_depth_first_in_name_order() {
    let tmp = sample_tree();
    let root = tmp.path();

    let opts = WalkOptions {
        recursive: true,
        exclude: None,
    };
    let files = collect_files(root, &opts).expect("collect_files");

    assert_eq!(
        rel(root, &files),
        vec![
            PathBuf::from("a.txt"),
            PathBuf::from("b.txt"),
            PathBuf::from("another/e.txt"),
            PathBuf::from("sub/c.txt"),
            PathBuf::from("sub/deeper/d.txt"),
        ]
    );
}

#[test]
fn excluded_subtree_is_skipped() {
    let tmp = sample_tree();
    let root = tmp.path();

    let opts = WalkOptions {
        recursive: true,
        exclude: Some(root.join("sub")),
    };
    let files = collect_files(root, &opts).expect("collect_files");

    assert_eq!(
        rel(root, &files),
        vec![
            PathBuf::from("a.txt"),
            PathBuf::from("b.txt"),
            PathBuf::from("another/e.txt"),
        ]
    );
}

#[test]
fn missing_exclude_target_is_ignored() {
    let tmp = sample_tree();
    let root = tmp.path();

    let opts = WalkOptions {
        recursive: true,
        exclude: Some(root.join("does-not-exist")),
    };
    assert_eq!(collect_files(root, &opts).expect("collect_files").len(), 5);
}

#[test]
fn empty_directory_yields_nothing() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let opts = WalkOptions {
        recursive: true,
        exclude: None,
    };
    assert!(collect_files(tmp.path(), &opts).expect("collect_files").is_empty());
}

#[test]
fn unreadable_root_is_an_error() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let missing = tmp.path().join("nope");

    assert!(collect_files(&missing, &WalkOptions::default()).is_err());
}

#[cfg(unix)]
#[test]
fn symlinks_are_not_followed_or_listed() {
    use std::os::unix::fs::symlink;

    let tmp = tempfile::tempdir().expect("create temp dir");
    let root = tmp.path().join("root");
    let outside = tmp.path().join("outside");
    create_dir(&root).expect("create root");
    create_dir(&outside).expect("create outside");
    write(outside.join("x.txt"), b"x").expect("write x.txt");
    write(root.join("real.txt"), b"r").expect("write real.txt");

    symlink(&outside, root.join("linked-dir")).expect("symlink dir");
    symlink(outside.join("x.txt"), root.join("linked.txt")).expect("symlink file");

    let opts = WalkOptions {
        recursive: true,
        exclude: None,
    };
    let files = collect_files(&root, &opts).expect("collect_files");

    assert_eq!(rel(&root, &files), vec![PathBuf::from("real.txt")]);
}

#[test]
fn scan_inspects_every_listed_file() {
    let tmp = sample_tree();
    let root = tmp.path();

    let opts = WalkOptions {
        recursive: true,
        exclude: None,
    };
    let records = scan(root, &opts, &InspectOptions::default()).expect("scan");

    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["a.txt", "b.txt", "e.txt", "c.txt", "d.txt"]);
    assert!(records.iter().all(|r| r.size == 1));
    assert!(records.iter().all(|r| r.content_type == "text/plain"));
}
