use super::*;

use chrono::TimeZone;
use darion_engine::{SortCriterion, SortStatistics};
use darion_fs::Category;
use std::path::PathBuf;

fn record(name: &str, size: u64) -> FileRecord {
    let ts = Local
        .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("unambiguous local time");
    FileRecord {
        name: name.to_owned(),
        path: PathBuf::from("/in").join(name),
        size,
        created: ts,
        modified: ts,
        accessed: ts,
        content_type: "text/plain".to_owned(),
        category: Category::Text,
    }
}

fn report(dry_run: bool) -> SortReport {
    let rec = record("notes.txt", 2048);
    SortReport {
        criterion: SortCriterion::Type,
        statistics: SortStatistics::from_records(std::slice::from_ref(&rec)),
        relocations: vec![Relocation {
            from: rec.path.clone(),
            to: PathBuf::from("/out/text/notes.txt"),
            bucket: "text".to_owned(),
        }],
        dry_run,
    }
}

fn human() -> HumanPrinter<Vec<u8>, Vec<u8>> {
    HumanPrinter::new(Vec::new(), Vec::new(), ColorChoice::Never)
}

fn text(buf: &[u8]) -> String {
    String::from_utf8(buf.to_vec()).expect("utf-8 output")
}

#[test]
fn human_size_units() {
    let cases: &[(u64, &str)] = &[
        (0, "0 B"),
        (1023, "1023 B"),
        (1024, "1.0 KiB"),
        (102_400, "100.0 KiB"),
        (1_572_864, "1.5 MiB"),
        (1 << 30, "1.0 GiB"),
    ];

    for (bytes, expected) in cases {
        assert_eq!(human_size(*bytes), *expected, "human_size({bytes})");
    }
}

#[test]
fn human_sort_report() {
    let mut p = human();
    p.sort_report(&report(false)).unwrap();

    let out = text(&p.out);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "moved /in/notes.txt -> /out/text/notes.txt");
    assert_eq!(lines[1], "");
    assert_eq!(lines[2], "Successfully sorted 1 files by type (2.0 KiB)");
    assert!(lines[3].starts_with("  text"));
    assert!(lines[3].ends_with("1     2.0 KiB"), "{:?}", lines[3]);
    assert_eq!(
        lines[4],
        "  created between 2024-03-01 12:00:00 and 2024-03-01 12:00:00"
    );
    assert!(p.err.is_empty());
}

#[test]
fn human_dry_run_and_color() {
    let mut p = HumanPrinter::new(Vec::new(), Vec::new(), ColorChoice::Always);
    p.sort_report(&report(true)).unwrap();

    let out = text(&p.out);
    assert!(out.starts_with("would move /in/notes.txt -> \x1b[32m/out/text/notes.txt\x1b[0m\n"));
    assert!(out.contains("Would sort 1 files by type"));
}

#[test]
fn human_empty_run_has_no_date_range() {
    let mut p = human();
    let empty = SortReport {
        criterion: SortCriterion::Name,
        statistics: SortStatistics::default(),
        relocations: Vec::new(),
        dry_run: false,
    };
    p.sort_report(&empty).unwrap();

    assert_eq!(text(&p.out), "Successfully sorted 0 files by name (0 B)\n");
}

#[test]
fn human_failures_go_to_stderr() {
    let mut p = human();
    p.sort_failure("Error sorting files: boom").unwrap();
    p.inspect_failure(&InspectError::NotAFile {
        path: PathBuf::from("/dev"),
    })
    .unwrap();

    assert!(p.out.is_empty());
    let err = text(&p.err);
    assert!(err.starts_with("[sort] Error sorting files: boom\n"));
    assert!(err.contains("[inspect] not a regular file: /dev"));
}

#[test]
fn human_record_row() {
    let mut p = human();
    p.record(&record("a.txt", 5)).unwrap();

    let out = text(&p.out);
    assert!(out.starts_with("text"));
    assert!(out.contains("text/plain"));
    assert!(out.trim_end().ends_with("5 B  /in/a.txt"));
}

#[test]
fn json_stream_is_one_object_per_line() {
    let mut p = JsonPrinter::new(Vec::new());
    p.sort_report(&report(true)).unwrap();
    p.sort_failure("nope").unwrap();
    p.record(&record("a.txt", 5)).unwrap();

    let out = text(&p.out);
    let values: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid json line"))
        .collect();
    assert_eq!(values.len(), 4);

    assert_eq!(values[0]["type"], "relocation");
    assert_eq!(values[0]["bucket"], "text");
    assert_eq!(values[0]["dry_run"], true);

    assert_eq!(values[1]["type"], "summary");
    assert_eq!(values[1]["success"], true);
    assert_eq!(values[1]["criterion"], "type");
    assert_eq!(values[1]["statistics"]["total_files"], 1);
    assert_eq!(values[1]["statistics"]["categories"]["text"]["total_size"], 2048);

    assert_eq!(values[2]["success"], false);
    assert_eq!(values[2]["message"], "nope");

    assert_eq!(values[3]["name"], "a.txt");
    assert_eq!(values[3]["category"], "text");
    assert_eq!(values[3]["content_type"], "text/plain");
}
