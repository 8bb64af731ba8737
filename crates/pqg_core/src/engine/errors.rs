//! Error types for the processing engine.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// The interpreter could not be started.
    #[error("Failed to start '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The engine raised an error or exited non-zero.
    #[error("DDA pipeline failed: {message}")]
    PipelineFailed {
        exit_code: Option<i32>,
        message: String,
    },

    /// The engine answered with something unexpected.
    #[error("Unexpected engine response: {0}")]
    Protocol(String),

    #[error("Engine I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Engine JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    pub fn launch(program: impl Into<String>, source: io::Error) -> Self {
        Self::Launch {
            program: program.into(),
            source,
        }
    }

    pub fn pipeline_failed(exit_code: Option<i32>, message: impl Into<String>) -> Self {
        Self::PipelineFailed {
            exit_code,
            message: message.into(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
