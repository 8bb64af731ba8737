//! PASTAQ GUI - Main entry point
//!
//! Loads the configuration, sets up application logging and starts the
//! iced event loop.

use std::path::PathBuf;

use directories::ProjectDirs;
use iced::window;
use iced::Size;

use pqg_core::config::ConfigManager;
use pqg_core::logging::init_tracing_with_file;

mod app;
mod handlers;
mod pages;
mod theme;

use app::App;

/// Per-user config file, or `.config/pastaq_gui.toml` when no home
/// directory can be determined.
fn default_config_path() -> PathBuf {
    ProjectDirs::from("org", "pastaq", "pastaq-gui")
        .map(|dirs| dirs.config_dir().join("pastaq_gui.toml"))
        .unwrap_or_else(|| PathBuf::from(".config").join("pastaq_gui.toml"))
}

fn main() -> iced::Result {
    let config_path = default_config_path();
    let mut config_manager = ConfigManager::new(&config_path);

    if let Err(e) = config_manager.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }

    let logs_dir = config_manager.logs_folder();
    let _log_guard = init_tracing_with_file(config_manager.settings().logging.level, &logs_dir);

    tracing::info!("PASTAQ GUI starting");
    tracing::info!("Config: {}", config_path.display());
    tracing::info!("Core version: {}", pqg_core::version());

    iced::application(App::title, App::update, App::view)
        .theme(App::theme)
        .subscription(App::subscription)
        .window(window::Settings {
            size: Size::new(1100.0, 760.0),
            min_size: Some(Size::new(800.0, 560.0)),
            exit_on_close_request: false,
            ..Default::default()
        })
        .run_with(move || App::new(config_manager))
}
