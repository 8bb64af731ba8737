//! What `pastaq_gui.toml` holds.
//!
//! Every struct is `#[serde(default)]`, so a file missing a table or a key
//! still loads and the gap is filled from `Default`.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub tools: ToolSettings,
    pub logging: LoggingSettings,
    pub ui: UiSettings,
}

/// Tool locations and working folders.
///
/// Tool paths are written only after they pass confirmation, so an empty
/// string means the tool was never confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// MSFragger jar.
    pub search_engine_jar: String,
    /// idconvert executable.
    pub converter_exe: String,
    /// MSFragger `.params` file.
    pub search_params: String,
    pub last_directory: String,
    /// Application log folder, relative to the working directory unless absolute.
    pub logs_folder: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            search_engine_jar: String::new(),
            converter_exe: String::new(),
            search_params: String::new(),
            last_directory: String::new(),
            logs_folder: ".logs".to_string(),
        }
    }
}

/// Launchers for the external programs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub java: String,
    /// Passed to the search engine JVM as `-Xmx`.
    pub java_max_heap: String,
    /// Interpreter that can `import pastaq`.
    pub python: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        let python = if cfg!(windows) { "python" } else { "python3" };
        Self {
            java: "java".to_string(),
            java_max_heap: "32g".to_string(),
            python: python.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Used when `RUST_LOG` is unset.
    pub level: LogLevel,
    pub show_timestamps: bool,
    /// Engine and converter output stays out of the run panel.
    pub compact: bool,
    /// Output lines replayed after a failed step.
    pub error_tail: u32,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            show_timestamps: true,
            compact: false,
            error_tail: 20,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub dark_mode: bool,
}

/// A top-level table of the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Paths,
    Tools,
    Logging,
    Ui,
}

impl ConfigSection {
    /// File order.
    pub const ALL: [ConfigSection; 4] = [
        ConfigSection::Paths,
        ConfigSection::Tools,
        ConfigSection::Logging,
        ConfigSection::Ui,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Tools => "tools",
            ConfigSection::Logging => "logging",
            ConfigSection::Ui => "ui",
        }
    }

    pub(crate) fn header_comment(self) -> &'static str {
        match self {
            ConfigSection::Paths => "# Confirmed tool paths and working folders",
            ConfigSection::Tools => "# Programs used to launch the search engine and the pipeline",
            ConfigSection::Logging => "# Application and run logs",
            ConfigSection::Ui => "# Appearance",
        }
    }

    /// This section of `settings` as a standalone TOML snippet.
    pub(crate) fn to_toml(self, settings: &Settings) -> Result<String, toml::ser::Error> {
        match self {
            ConfigSection::Paths => toml::to_string(&settings.paths),
            ConfigSection::Tools => toml::to_string(&settings.tools),
            ConfigSection::Logging => toml::to_string(&settings.logging),
            ConfigSection::Ui => toml::to_string(&settings.ui),
        }
    }
}
