//! Update logic, split by concern.
//!
//! Each module adds methods to [`crate::app::App`].

mod files;
mod helpers;
mod parameters;
mod paths;
mod project;
mod run;
mod window;

pub use helpers::{clean_file_url, display_name};
