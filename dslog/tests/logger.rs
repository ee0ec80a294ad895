use std::{
    path::PathBuf,
    sync::{
        Arc, LazyLock,
        atomic::{AtomicBool, Ordering},
    },
    thread,
};

use dslog::{LogMemory, Logger, Seq, Severity, log_here, logger_config, strip_color};
use regex::Regex;
use uuid::Uuid;

fn temp_log() -> PathBuf {
    std::env::temp_dir().join(format!("dslog_{}.log", Uuid::new_v4()))
}

fn captured(level: Severity) -> (Logger, LogMemory) {
    let memory = LogMemory::default();
    let logger = logger_config()
        .with_level(level)
        .with_console(memory.clone())
        .build();
    (logger, memory)
}

fn plain_lines(memory: &LogMemory) -> Vec<String> {
    memory.lines().iter().map(|line| strip_color(line)).collect()
}

#[test]
fn test_omitted_level_uses_configured_level() {
    let path = temp_log();
    let (logger, memory) = captured(Severity::Warning);
    logger.set_file_path(&path);
    logger.enable_file_sink();
    logger.log_msg("hello");
    assert_eq!(plain_lines(&memory), ["[WARNING]: hello"]);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[WARNING]: hello\n");
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_explicit_level_wins() {
    let (logger, memory) = captured(Severity::Warning);
    logger.log("boom", Some(Severity::Error), Some(10), Some("main"));
    assert_eq!(plain_lines(&memory), ["[ERROR] Line 10, main: boom"]);
}

#[test]
fn test_set_level_applies_to_later_calls() {
    let (logger, memory) = captured(Severity::Info);
    logger.log_msg("before");
    logger.set_level(Severity::Debug);
    logger.log_msg("after");
    assert_eq!(plain_lines(&memory), ["[INFO]: before", "[DEBUG]: after"]);
}

#[test]
fn test_file_line_is_stripped_console_line() {
    let path = temp_log();
    let (logger, memory) = captured(Severity::Info);
    logger.set_file_path(&path);
    logger.set_file_sink(true);
    logger.set_timer(true);
    logger.log("payload", Some(Severity::Latency), Some(3), Some("worker"));
    let console = memory.lines();
    let file = std::fs::read_to_string(&path).unwrap();
    assert_eq!(file, format!("{}\n", strip_color(&console[0])));
    assert!(!file.contains('\x1b'));
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_concurrent_calls_write_every_line_once() {
    const N: usize = 64;
    let path = temp_log();
    let memory = LogMemory::default();
    let logger = Arc::new(
        logger_config()
            .with_log_file(&path)
            .with_timer(true)
            .with_console(memory.clone())
            .build(),
    );
    let messages: Vec<String> = (0..N)
        .map(|i| format!("message-{i}-{}", Uuid::new_v4()))
        .collect();
    let handles: Vec<_> = messages
        .iter()
        .cloned()
        .map(|message| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || logger.log(message, Some(Severity::Info), None, None))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), N);
    for message in &messages {
        assert_eq!(lines.iter().filter(|line| line.contains(message.as_str())).count(), 1);
    }
    // both sinks see the calls in lock order
    let console: Vec<String> = plain_lines(&memory);
    assert_eq!(console, lines);
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_mutators_racing_log_calls() {
    const WRITERS: usize = 8;
    const PER_WRITER: usize = 200;
    static LINE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r"^(\[\d+\.\d{3}(ns|μs|ms|s)\])?\[(DEBUG|INFO|LATENCY|WARNING|ERROR|TESTING)\]: writer-\d+-\d+$",
        )
        .unwrap()
    });
    let paths = [temp_log(), temp_log()];
    let memory = LogMemory::default();
    let logger = logger_config()
        .with_log_file(&paths[0])
        .with_console(memory.clone())
        .build();
    let done = AtomicBool::new(false);

    thread::scope(|scope| {
        scope.spawn(|| {
            let mut round = 0usize;
            while !done.load(Ordering::Relaxed) {
                logger.set_level(Severity::ALL[round % Severity::ALL.len()]);
                logger.set_timer(round % 2 == 0);
                logger.set_file_path(&paths[round % 2]);
                round += 1;
                thread::yield_now();
            }
        });
        let writers: Vec<_> = (0..WRITERS)
            .map(|w| {
                let logger = &logger;
                scope.spawn(move || {
                    for i in 0..PER_WRITER {
                        logger.log_msg(format!("writer-{w}-{i}"));
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }
        done.store(true, Ordering::Relaxed);
    });

    let console = plain_lines(&memory);
    assert_eq!(console.len(), WRITERS * PER_WRITER);
    for line in &console {
        assert!(LINE_SHAPE.is_match(line), "{line:?}");
    }
    let file_lines: usize = paths
        .iter()
        .map(|path| {
            std::fs::read_to_string(path)
                .map(|content| content.lines().count())
                .unwrap_or(0)
        })
        .sum();
    assert_eq!(file_lines, WRITERS * PER_WRITER);
    for path in &paths {
        std::fs::remove_file(path).ok();
    }
}

#[test]
fn test_unwritable_file_reports_one_error() {
    let path = std::env::temp_dir()
        .join(format!("dslog_missing_{}", Uuid::new_v4()))
        .join("log.txt");
    let (logger, memory) = captured(Severity::Info);
    logger.set_file_path(&path);
    logger.enable_file_sink();
    logger.log_msg("still printed");

    let lines = plain_lines(&memory);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "[INFO]: still printed");
    assert_eq!(lines.iter().filter(|line| line.starts_with("[ERROR]")).count(), 1);
    assert!(lines[1].contains("dslog::Logger::write_file: Unable to open log file"));
    assert!(!path.exists());
}

#[test]
fn test_sequence_message() {
    let (logger, memory) = captured(Severity::Info);
    logger.log_msg(Seq(&[1, 2, 3]));
    assert!(plain_lines(&memory)[0].contains("[1, 2, 3]"));
}

#[test]
fn test_timer_prefix() {
    static PREFIXED: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^\[\d+\.\d{3}(ns|μs|ms|s)\]\[INFO\]: timed$").unwrap());
    let (logger, memory) = captured(Severity::Info);
    logger.enable_timer();
    logger.log_msg("timed");
    logger.disable_timer();
    logger.log_msg("untimed");
    let lines = plain_lines(&memory);
    assert!(PREFIXED.is_match(&lines[0]), "{:?}", lines[0]);
    assert_eq!(lines[1], "[INFO]: untimed");
}

#[test]
fn test_disabled_logger_is_silent() {
    let path = temp_log();
    let (logger, memory) = captured(Severity::Info);
    logger.set_file_path(&path);
    logger.enable_file_sink();
    logger.disable();
    logger.log("nothing", Some(Severity::Error), Some(1), Some("main"));
    assert!(memory.lines().is_empty());
    assert!(!path.exists());
    logger.enable();
    logger.log_msg("something");
    assert_eq!(memory.lines().len(), 1);
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_log_here_fills_line_and_module() {
    let (logger, memory) = captured(Severity::Info);
    let line = line!() + 1;
    log_here!(logger, Severity::Debug, "here");
    log_here!(logger, "there");
    let lines = plain_lines(&memory);
    assert_eq!(lines[0], format!("[DEBUG] Line {line}, logger: here"));
    assert_eq!(lines[1], format!("[INFO] Line {}, logger: there", line + 1));
}
