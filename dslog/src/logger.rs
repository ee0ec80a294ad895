use std::{
    fmt::Display,
    path::{Path, PathBuf},
    sync::{
        Mutex, MutexGuard, PoisonError, RwLock,
        atomic::{AtomicBool, Ordering},
    },
    time::Instant,
};

use dslog_core::{
    AtomicSeverity, Elapsed, LogStdout, LogWriter, Severity, append_line, render, start_instant,
    strip_color,
};

pub(crate) type Console = Box<dyn LogWriter + Send>;

/// Logger writing to a console writer and, optionally, to a log file.
///
/// Configuration fields can be changed from any thread at any time; a change is seen
/// by the log calls that start after it. Console and file writes of one call happen
/// under a single lock, so lines of concurrent calls never interleave and appear in
/// the same order on both sinks.
pub struct Logger {
    console: Mutex<Console>,
    file_path: RwLock<PathBuf>,
    level: AtomicSeverity,
    file_sink: AtomicBool,
    timer: AtomicBool,
    enabled: AtomicBool,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Severity::Info)
    }
}

impl Logger {
    /// Logger printing to stdout with `level` as the default tag, file sink and timer off.
    pub fn new(level: Severity) -> Self {
        Self::from_parts(Box::new(LogStdout), level, "log.txt".into(), false, false, true)
    }

    pub(crate) fn from_parts(
        console: Console,
        level: Severity,
        file_path: PathBuf,
        file_sink: bool,
        timer: bool,
        enabled: bool,
    ) -> Self {
        // pin the elapsed-time baseline no later than the first logger
        start_instant();
        Self {
            console: Mutex::new(console),
            file_path: RwLock::new(file_path),
            level: AtomicSeverity::new(level),
            file_sink: AtomicBool::new(file_sink),
            timer: AtomicBool::new(timer),
            enabled: AtomicBool::new(enabled),
        }
    }

    /// Logs `message`.
    ///
    /// Without an explicit `level` the line is tagged with the configured [`Logger::level`].
    /// Never fails: a log file that cannot be written is reported on the console.
    pub fn log<M: Display>(
        &self,
        message: M,
        level: Option<Severity>,
        line: Option<u32>,
        call_site: Option<&str>,
    ) {
        if !self.is_enabled() {
            return;
        }
        let message = message.to_string();
        let level = level.unwrap_or_else(|| self.level());
        let rendered = render(&message, Some(level), line, call_site);

        let mut console = self.lock_console();
        let output = if self.is_timer_enabled() {
            let elapsed = Elapsed::between(start_instant(), Instant::now());
            format!("{}{rendered}", elapsed.colored())
        } else {
            rendered
        };
        console.regular(&output);
        if self.is_file_sink_enabled() {
            self.write_file(&mut console, &strip_color(&output));
        }
    }

    /// Logs `message` tagged with the configured level.
    pub fn log_msg<M: Display>(&self, message: M) {
        self.log(message, None, None, None);
    }

    pub fn log_at<M: Display>(&self, message: M, level: Severity) {
        self.log(message, Some(level), None, None);
    }

    fn write_file(&self, console: &mut Console, line: &str) {
        let path = self.file_path();
        if let Err(err) = append_line(&path, line) {
            let report = render(
                &format!("Unable to open log file {}: {err}", path.display()),
                Some(Severity::Error),
                Some(line!()),
                Some("dslog::Logger::write_file"),
            );
            console.regular(&report);
        }
    }

    fn lock_console(&self) -> MutexGuard<'_, Console> {
        self.console.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn flush(&self) {
        self.lock_console().flush();
    }

    pub fn level(&self) -> Severity {
        self.level.load()
    }

    pub fn set_level(&self, level: Severity) {
        self.level.store(level);
    }

    pub fn file_path(&self) -> PathBuf {
        self.file_path
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_file_path<P: AsRef<Path>>(&self, path: P) {
        *self
            .file_path
            .write()
            .unwrap_or_else(PoisonError::into_inner) = path.as_ref().to_path_buf();
    }

    pub fn is_file_sink_enabled(&self) -> bool {
        self.file_sink.load(Ordering::Relaxed)
    }

    pub fn set_file_sink(&self, enabled: bool) {
        self.file_sink.store(enabled, Ordering::Relaxed);
    }

    pub fn enable_file_sink(&self) {
        self.set_file_sink(true);
    }

    pub fn disable_file_sink(&self) {
        self.set_file_sink(false);
    }

    pub fn is_timer_enabled(&self) -> bool {
        self.timer.load(Ordering::Relaxed)
    }

    pub fn set_timer(&self, enabled: bool) {
        self.timer.store(enabled, Ordering::Relaxed);
    }

    pub fn enable_timer(&self) {
        self.set_timer(true);
    }

    pub fn disable_timer(&self) {
        self.set_timer(false);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Turns all output on or off.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn enable(&self) {
        self.set_enabled(true);
    }

    pub fn disable(&self) {
        self.set_enabled(false);
    }
}

#[test]
fn test_logger_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Logger>();
}

#[test]
fn test_default_configuration() {
    let logger = Logger::default();
    assert_eq!(logger.level(), Severity::Info);
    assert_eq!(logger.file_path(), PathBuf::from("log.txt"));
    assert!(!logger.is_file_sink_enabled());
    assert!(!logger.is_timer_enabled());
    assert!(logger.is_enabled());
}

#[test]
fn test_mutators() {
    let logger = Logger::new(Severity::Debug);
    logger.set_level(Severity::Error);
    logger.set_file_path("/tmp/elsewhere.log");
    logger.enable_file_sink();
    logger.enable_timer();
    logger.disable();
    assert_eq!(logger.level(), Severity::Error);
    assert_eq!(logger.file_path(), PathBuf::from("/tmp/elsewhere.log"));
    assert!(logger.is_file_sink_enabled());
    assert!(logger.is_timer_enabled());
    assert!(!logger.is_enabled());
    logger.disable_file_sink();
    logger.disable_timer();
    logger.enable();
    assert!(!logger.is_file_sink_enabled());
    assert!(!logger.is_timer_enabled());
    assert!(logger.is_enabled());
}
