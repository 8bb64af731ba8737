//! Per-run log: an optional file under the project's `logs/` folder plus a
//! line callback feeding the run panel.
//!
//! Output from external tools is also kept in a bounded tail so a failing
//! step can replay the last lines after its error.

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use super::types::{LineCallback, LogConfig, LogLevel, Marker};

#[derive(Default)]
struct Outputs {
    file: Option<BufWriter<File>>,
    callback: Option<LineCallback>,
}

impl Outputs {
    fn emit(&mut self, line: &str) {
        if let Some(file) = self.file.as_mut() {
            // Write errors are ignored; the callback still gets the line.
            let _ = writeln!(file, "{line}");
        }
        if let Some(callback) = &self.callback {
            callback(line);
        }
    }
}

/// Last `capacity` lines of tool output.
struct ToolTail {
    capacity: usize,
    lines: VecDeque<String>,
}

impl ToolTail {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            lines: VecDeque::with_capacity(capacity),
        }
    }

    fn push(&mut self, line: &str) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.to_string());
    }
}

/// Where one run's messages go.
pub struct LogSink {
    name: String,
    log_path: Option<PathBuf>,
    config: LogConfig,
    outputs: Mutex<Outputs>,
    tail: Mutex<ToolTail>,
}

impl LogSink {
    /// Start building a sink for the run called `name`.
    pub fn builder(name: impl Into<String>) -> LogSinkBuilder {
        LogSinkBuilder {
            name: name.into(),
            log_dir: None,
            config: LogConfig::default(),
            callback: None,
        }
    }

    /// No file; every line goes to `callback`.
    pub fn callback_only(config: LogConfig, callback: LineCallback) -> Self {
        Self::assemble(String::new(), None, config, Outputs {
            file: None,
            callback: Some(callback),
        })
    }

    /// Writes nowhere. The tail is still kept.
    pub fn discard() -> Self {
        Self::assemble(String::new(), None, LogConfig::default(), Outputs::default())
    }

    fn assemble(name: String, log_path: Option<PathBuf>, config: LogConfig, outputs: Outputs) -> Self {
        Self {
            name,
            log_path,
            tail: Mutex::new(ToolTail::new(config.error_tail)),
            config,
            outputs: Mutex::new(outputs),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        self.write(level, Marker::Plain, message);
    }

    pub fn debug(&self, message: &str) {
        self.write(LogLevel::Debug, Marker::Plain, message);
    }

    pub fn info(&self, message: &str) {
        self.write(LogLevel::Info, Marker::Plain, message);
    }

    pub fn warn(&self, message: &str) {
        self.write(LogLevel::Warn, Marker::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.write(LogLevel::Error, Marker::Error, message);
    }

    /// The command line of an external program about to start.
    pub fn command(&self, command: &str) {
        self.write(LogLevel::Info, Marker::Command, command);
    }

    /// Start of a pipeline step.
    pub fn phase(&self, name: &str) {
        self.write(LogLevel::Info, Marker::Phase, name);
    }

    /// A unit of work inside a step, such as one file.
    pub fn section(&self, name: &str) {
        self.write(LogLevel::Info, Marker::Section, name);
    }

    pub fn success(&self, message: &str) {
        self.write(LogLevel::Info, Marker::Success, message);
    }

    /// One line printed by the engine or a converter.
    ///
    /// Always recorded in the tail. Compact mode stops it there.
    pub fn output_line(&self, line: &str, is_stderr: bool) {
        self.tail.lock().push(line);
        if self.config.compact {
            return;
        }
        let marker = if is_stderr { Marker::Stderr } else { Marker::Plain };
        self.emit(&marker.apply(line));
    }

    /// Replay the tail under a `[header/tail]` line. Does nothing when empty.
    pub fn show_tail(&self, header: &str) {
        let lines = self.get_tail();
        if lines.is_empty() {
            return;
        }
        self.emit(&format!("[{header}/tail]"));
        for line in &lines {
            self.emit(line);
        }
    }

    pub fn clear_tail(&self) {
        self.tail.lock().lines.clear();
    }

    pub fn get_tail(&self) -> Vec<String> {
        self.tail.lock().lines.iter().cloned().collect()
    }

    pub fn flush(&self) {
        if let Some(file) = self.outputs.lock().file.as_mut() {
            let _ = file.flush();
        }
    }

    /// Flush and close the log file. Later lines only reach the callback.
    pub fn close(&self) {
        if let Some(mut file) = self.outputs.lock().file.take() {
            let _ = file.flush();
        }
    }

    fn write(&self, level: LogLevel, marker: Marker, message: &str) {
        if level >= self.config.level {
            self.emit(&marker.apply(message));
        }
    }

    fn emit(&self, text: &str) {
        let line = if self.config.show_timestamps {
            format!("[{}] {}", Local::now().format("%H:%M:%S"), text)
        } else {
            text.to_string()
        };
        self.outputs.lock().emit(&line);
    }
}

impl Drop for LogSink {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for LogSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogSink")
            .field("name", &self.name)
            .field("log_path", &self.log_path)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Returned by [`LogSink::builder`].
pub struct LogSinkBuilder {
    name: String,
    log_dir: Option<PathBuf>,
    config: LogConfig,
    callback: Option<LineCallback>,
}

impl LogSinkBuilder {
    /// Write `<name>.log` into `dir`, creating it if needed.
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    pub fn config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    pub fn callback(mut self, callback: LineCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    pub fn build(self) -> io::Result<LogSink> {
        let (log_path, file) = match &self.log_dir {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                let path = dir.join(format!("{}.log", file_stem(&self.name)));
                let file = BufWriter::new(File::create(&path)?);
                (Some(path), Some(file))
            }
            None => (None, None),
        };

        Ok(LogSink::assemble(self.name, log_path, self.config, Outputs {
            file,
            callback: self.callback,
        }))
    }
}

/// Run name with characters that are not allowed in file names replaced.
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn recorder(config: LogConfig) -> (LogSink, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let store = Arc::clone(&lines);
        let sink = LogSink::callback_only(
            config,
            Box::new(move |line: &str| store.lock().push(line.to_string())),
        );
        (sink, lines)
    }

    fn untimed() -> LogConfig {
        LogConfig {
            show_timestamps: false,
            ..LogConfig::default()
        }
    }

    #[test]
    fn file_is_named_after_the_run() {
        let dir = tempdir().unwrap();
        let sink = LogSink::builder("dda_pipeline")
            .log_dir(dir.path().join("logs"))
            .build()
            .unwrap();

        let path = sink.log_path().unwrap().to_path_buf();
        assert_eq!(path, dir.path().join("logs").join("dda_pipeline.log"));

        sink.phase("Run DDA pipeline");
        sink.close();
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("=== Run DDA pipeline ==="));
    }

    #[test]
    fn no_file_without_log_dir() {
        let sink = LogSink::builder("dda_pipeline").build().unwrap();
        assert!(sink.log_path().is_none());
        sink.info("goes nowhere");
    }

    #[test]
    fn lines_below_level_are_dropped() {
        let (sink, lines) = recorder(untimed());
        sink.debug("hidden");
        sink.info("shown");
        sink.warn("careful");
        sink.command("idconvert a.pepXML");

        assert_eq!(
            *lines.lock(),
            vec!["shown", "[WARNING] careful", "$ idconvert a.pepXML"]
        );
    }

    #[test]
    fn timestamps_prefix_lines() {
        let (sink, lines) = recorder(LogConfig::default());
        sink.info("hello");
        let line = lines.lock()[0].clone();
        assert!(line.starts_with('['));
        assert!(line.ends_with("] hello"));
    }

    #[test]
    fn compact_output_stays_in_tail() {
        let (sink, lines) = recorder(LogConfig {
            compact: true,
            ..untimed()
        });
        sink.output_line("Reading raw data", false);

        assert!(lines.lock().is_empty());
        assert_eq!(sink.get_tail(), vec!["Reading raw data".to_string()]);
    }

    #[test]
    fn tail_keeps_the_newest_lines() {
        let sink = LogSink::callback_only(
            LogConfig {
                error_tail: 3,
                ..untimed()
            },
            Box::new(|_: &str| {}),
        );
        for i in 0..6 {
            sink.output_line(&format!("line {i}"), false);
        }
        assert_eq!(sink.get_tail(), vec!["line 3", "line 4", "line 5"]);

        sink.clear_tail();
        assert!(sink.get_tail().is_empty());
    }

    #[test]
    fn zero_tail_keeps_nothing() {
        let sink = LogSink::callback_only(
            LogConfig {
                error_tail: 0,
                ..untimed()
            },
            Box::new(|_: &str| {}),
        );
        sink.output_line("dropped", false);
        assert!(sink.get_tail().is_empty());
    }

    #[test]
    fn show_tail_replays_under_header() {
        let (sink, lines) = recorder(untimed());
        sink.output_line("Traceback", true);
        sink.show_tail("engine output");

        assert_eq!(
            *lines.lock(),
            vec!["[stderr] Traceback", "[engine output/tail]", "Traceback"]
        );
    }

    #[test]
    fn file_stem_replaces_reserved_characters() {
        assert_eq!(file_stem("dda_pipeline"), "dda_pipeline");
        assert_eq!(file_stem("a/b:c"), "a_b_c");
    }
}
