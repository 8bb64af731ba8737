//! Error types for project files.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::parameters::ParameterError;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid project file '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Can't save project at the given directory")]
    CannotSave { dir: PathBuf },

    #[error("No project is open")]
    NoProjectOpen,

    #[error("No input file at position {0}")]
    NoSuchFile(usize),

    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

impl ProjectError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

pub type ProjectResult<T> = Result<T, ProjectError>;
