//! Levels and per-run log options.

use serde::{Deserialize, Serialize};

use crate::config::LoggingSettings;

/// Severity, ordered from most to least verbose.
///
/// Stored lowercase in `pastaq_gui.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Options for one run's [`LogSink`](super::LogSink).
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    /// Tool output goes to the tail only, not to the file or the panel.
    pub compact: bool,
    /// Lines of tool output replayed when a step fails. Zero keeps none.
    pub error_tail: usize,
    pub show_timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig::from(&LoggingSettings::default())
    }
}

impl From<&LoggingSettings> for LogConfig {
    fn from(settings: &LoggingSettings) -> Self {
        Self {
            level: settings.level,
            compact: settings.compact,
            error_tail: settings.error_tail as usize,
            show_timestamps: settings.show_timestamps,
        }
    }
}

/// Receives every formatted line, in order.
pub type LineCallback = Box<dyn Fn(&str) + Send + Sync>;

/// How a pipeline line is decorated before it is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Marker {
    Plain,
    Command,
    Phase,
    Section,
    Success,
    Warning,
    Error,
    Stderr,
}

impl Marker {
    pub(crate) fn apply(self, text: &str) -> String {
        match self {
            Marker::Plain => text.to_string(),
            Marker::Command => format!("$ {text}"),
            Marker::Phase => format!("=== {text} ==="),
            Marker::Section => format!("--- {text} ---"),
            Marker::Success => format!("[SUCCESS] {text}"),
            Marker::Warning => format!("[WARNING] {text}"),
            Marker::Error => format!("[ERROR] {text}"),
            Marker::Stderr => format!("[stderr] {text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_decorate_lines() {
        assert_eq!(Marker::Command.apply("java -jar x"), "$ java -jar x");
        assert_eq!(Marker::Phase.apply("Convert"), "=== Convert ===");
        assert_eq!(Marker::Stderr.apply("Traceback"), "[stderr] Traceback");
        assert_eq!(Marker::Plain.apply("as is"), "as is");
    }

    #[test]
    fn levels_order_by_severity() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::Warn.as_directive(), "warn");
    }

    #[test]
    fn config_follows_settings() {
        let settings = LoggingSettings {
            compact: true,
            error_tail: 7,
            ..LoggingSettings::default()
        };
        let config = LogConfig::from(&settings);
        assert!(config.compact);
        assert_eq!(config.error_tail, 7);
        assert_eq!(config.level, LogLevel::Info);
    }
}
