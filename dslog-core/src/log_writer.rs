use std::{
    fs::File,
    io::Write,
    path::Path,
    sync::{Arc, Mutex, PoisonError},
};

/// A console-side destination for rendered lines.
pub trait LogWriter {
    fn regular(&mut self, line: &str);
    fn flush(&mut self);
}

/// Writes each line to standard output and flushes it.
#[derive(Default, Debug)]
pub struct LogStdout;

impl LogWriter for LogStdout {
    fn regular(&mut self, line: &str) {
        let mut stdout = std::io::stdout().lock();
        // stdout going away must not take the caller down with it
        writeln!(stdout, "{line}").ok();
        stdout.flush().ok();
    }

    fn flush(&mut self) {
        std::io::stdout().flush().ok();
    }
}

/// Keeps every line in memory. Clones share the same buffer.
#[derive(Default, Debug, Clone)]
pub struct LogMemory {
    lines: Arc<Mutex<Vec<String>>>,
}

impl LogMemory {
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl LogWriter for LogMemory {
    fn regular(&mut self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.into());
    }

    fn flush(&mut self) {}
}

/// Appends `line` and a newline to the file at `path`.
///
/// The file is created if needed, opened in append mode for this write only and
/// closed before returning.
pub fn append_line<P: AsRef<Path>>(path: P, line: &str) -> Result<(), std::io::Error> {
    let mut file = File::options().create(true).append(true).open(path)?;
    writeln!(file, "{line}")?;
    file.flush()
}

#[test]
fn test_append_line() {
    let path = std::env::temp_dir().join("dslog_test_append_line.log");
    std::fs::remove_file(&path).ok();
    append_line(&path, "Hello, world!").unwrap();
    append_line(&path, "rust is awesome !").unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "Hello, world!\nrust is awesome !\n"
    );
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_append_line_missing_directory() {
    let path = std::env::temp_dir()
        .join("dslog_no_such_dir")
        .join("nested")
        .join("log.txt");
    assert!(append_line(path, "lost").is_err());
}

#[test]
fn test_log_memory_shares_buffer() {
    let memory = LogMemory::default();
    let mut writer = memory.clone();
    writer.regular("first");
    writer.regular("second");
    assert_eq!(memory.lines(), ["first", "second"]);
    memory.clear();
    assert!(memory.lines().is_empty());
}
