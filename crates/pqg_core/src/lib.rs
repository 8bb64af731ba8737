//! PASTAQ GUI Core - Backend logic for the PASTAQ DDA pipeline launcher
//!
//! This crate contains all project, parameter and pipeline logic with
//! zero UI dependencies.

pub mod config;
pub mod engine;
pub mod identification;
pub mod logging;
pub mod orchestrator;
pub mod parameters;
pub mod project;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
