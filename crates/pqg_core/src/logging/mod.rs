//! Application tracing and per-run logs.
//!
//! Application diagnostics go through `tracing` to stderr and a daily file.
//! A pipeline run writes through its own [`LogSink`], which is what the run
//! panel shows.
//!
//! ```no_run
//! use pqg_core::logging::{LogConfig, LogSink};
//!
//! let sink = LogSink::builder("dda_pipeline")
//!     .log_dir("/path/to/project/logs")
//!     .config(LogConfig::default())
//!     .build()
//!     .unwrap();
//!
//! sink.phase("Convert identifications");
//! sink.command("idconvert sample.pepXML --mzIdentML");
//! sink.success("Pipeline finished");
//! ```

mod log_sink;
mod types;

pub use log_sink::{LogSink, LogSinkBuilder};
pub use types::{LineCallback, LogConfig, LogLevel};

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn env_filter(default_level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level.as_directive()))
}

/// Install a stderr subscriber. `RUST_LOG` overrides `default_level`.
pub fn init_tracing(default_level: LogLevel) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter(default_level))
        .init();
}

/// Like [`init_tracing`], plus a daily `pastaq-gui.log` in `logs_dir`.
///
/// Keep the guard alive until exit or buffered lines are lost. When the
/// folder cannot be created only stderr is set up and `None` is returned.
pub fn init_tracing_with_file(default_level: LogLevel, logs_dir: &Path) -> Option<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(logs_dir) {
        eprintln!("Warning: cannot create logs folder {}: {}", logs_dir.display(), e);
        init_tracing(default_level);
        return None;
    }

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(logs_dir, "pastaq-gui.log"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .with(env_filter(default_level))
        .init();

    Some(guard)
}
