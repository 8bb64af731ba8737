//! Application settings stored in `pastaq_gui.toml`.
//!
//! The file has one table per [`ConfigSection`]. Missing keys load as
//! defaults and are written back, and single sections can be saved without
//! touching the others.
//!
//! ```no_run
//! use pqg_core::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new(".config/pastaq_gui.toml");
//! config.load_or_create().unwrap();
//!
//! config.settings_mut().ui.dark_mode = true;
//! config.update_section(ConfigSection::Ui).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ConfigSection, LoggingSettings, PathSettings, Settings, ToolSettings, UiSettings,
};
