//! Run and step errors.
//!
//! A [`StepError`] says what went wrong inside a step; the pipeline wraps it
//! in a [`PipelineError`] naming the step.

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::engine::EngineError;
use crate::identification::ConversionError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: StepError,
    },

    #[error("Run cancelled at step '{step}'")]
    Cancelled { step: String },
}

impl PipelineError {
    /// Wrap a step's error. A step that stopped for cancellation becomes
    /// [`PipelineError::Cancelled`].
    pub fn at_step(step: impl Into<String>, source: StepError) -> Self {
        let step = step.into();
        match source {
            StepError::Cancelled => Self::Cancelled { step },
            source => Self::StepFailed { step, source },
        }
    }

    pub fn cancelled(step: impl Into<String>) -> Self {
        Self::Cancelled { step: step.into() }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Text for the error dialog: the step's own message, no wrapping.
    pub fn user_message(&self) -> String {
        match self {
            Self::StepFailed { source, .. } => source.to_string(),
            Self::Cancelled { .. } => "Cancelled".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum StepError {
    #[error("Input validation failed: {0}")]
    InvalidInput(String),

    #[error("Output validation failed: {0}")]
    InvalidOutput(String),

    /// `file` is the `.mgf` name only.
    #[error("{file}: {source}")]
    Conversion {
        file: String,
        #[source]
        source: ConversionError,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Failed {action}: {source}")]
    Io {
        action: String,
        #[source]
        source: io::Error,
    },

    #[error("Cancelled")]
    Cancelled,
}

impl StepError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_output(message: impl Into<String>) -> Self {
        Self::InvalidOutput(message.into())
    }

    pub fn conversion(mgf: &Path, source: ConversionError) -> Self {
        let file = mgf
            .file_name()
            .map_or_else(|| mgf.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self::Conversion { file, source }
    }

    /// `action` reads after "Failed", e.g. "creating output directory".
    pub fn io(action: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            action: action.into(),
            source,
        }
    }
}

pub type StepResult<T> = Result<T, StepError>;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_error_names_only_the_file() {
        let err = StepError::conversion(
            Path::new("/data/run_3.mgf"),
            ConversionError::search_engine_failed("java exited with code 1"),
        );
        assert_eq!(err.to_string(), "run_3.mgf: MSFragger failure");
    }

    #[test]
    fn dialog_message_drops_step_name() {
        let err = PipelineError::at_step("DDA pipeline", StepError::invalid_input("No input files"));

        assert_eq!(
            err.to_string(),
            "Step 'DDA pipeline' failed: Input validation failed: No input files"
        );
        assert_eq!(err.user_message(), "Input validation failed: No input files");
    }

    #[test]
    fn cancelled_step_cancels_the_run() {
        let err = PipelineError::at_step("Convert identifications", StepError::Cancelled);
        assert!(err.is_cancelled());
        assert_eq!(err.user_message(), "Cancelled");
    }

    #[test]
    fn io_error_reads_as_sentence() {
        let err = StepError::io(
            "creating output directory",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "Failed creating output directory: denied");
    }
}
