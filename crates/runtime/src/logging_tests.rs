use super::*;
use log::{Level, Metadata, Record};
use serial_test::serial;

fn buffered(level: Level) -> Logger {
    Logger {
        level,
        target: LogTarget::Buffer(Mutex::new(Vec::new())),
    }
}

fn lines(logger: &Logger) -> Vec<String> {
    match &logger.target {
        LogTarget::Buffer(lines) => lines.lock().unwrap().clone(),
        LogTarget::Stderr => Vec::new(),
    }
}

#[test]
fn parse_level_cases() {
    let cases: &[(Option<&str>, Level)] = &[
        (None, Level::Warn),
        (Some("debug"), Level::Debug),
        (Some("DEBUG"), Level::Debug),
        (Some(" info "), Level::Info),
        (Some("warn"), Level::Warn),
        (Some("error"), Level::Error),
        (Some("TRACE"), Level::Trace),
        (Some("garbage"), Level::Warn),
        (Some("off"), Level::Warn),
    ];

    for (value, expected) in cases {
        assert_eq!(parse_level(*value), *expected, "level for {value:?}");
    }
}

#[test]
#[serial]
fn get_level_from_env_reads_program_variable() {
    unsafe { std::env::set_var(PROGRAM_LOG_LEVEL, "debug") };
    assert_eq!(get_level_from_env(), Level::Debug);

    unsafe { std::env::remove_var(PROGRAM_LOG_LEVEL) };
    assert_eq!(get_level_from_env(), Level::Warn);
}

#[test]
fn enabled_respects_level_threshold() {
    let levels = [
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    for logger_level in levels {
        let logger = buffered(logger_level);

        for record_level in levels {
            let meta = Metadata::builder()
                .level(record_level)
                .target("test_target")
                .build();

            assert_eq!(
                logger.enabled(&meta),
                record_level <= logger_level,
                "logger level {logger_level:?}, record level {record_level:?}"
            );
        }
    }
}

#[test]
fn records_below_threshold_are_dropped() {
    let logger = buffered(Level::Info);

    for (lvl, msg) in [
        (Level::Debug, "hidden"),
        (Level::Info, "sorted 3 files"),
        (Level::Error, "move failed"),
    ] {
        let args = format_args!("{msg}");
        let record = Record::builder()
            .level(lvl)
            .target("darion_engine::sorter")
            .args(args)
            .build();
        logger.log(&record);
    }
    logger.flush();

    let out = lines(&logger);
    assert_eq!(out.len(), 2);
    assert!(out[0].contains("INFO"));
    assert!(out[0].contains("[darion_engine::sorter] sorted 3 files"));
    assert!(out[1].contains("ERROR"));
    assert!(!out.iter().any(|l| l.contains("hidden")));
}

#[test]
fn stderr_logger_does_not_panic() {
    let logger = Logger {
        level: Level::Info,
        target: LogTarget::Stderr,
    };

    let args = format_args!("hello");
    let record = Record::builder()
        .level(Level::Info)
        .target("t")
        .args(args)
        .build();
    logger.log(&record);
    logger.flush();
}
