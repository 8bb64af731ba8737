//! Error types for tool paths and identification conversion.
//!
//! Messages are shown to the user as-is, so they stay short.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A tool or parameter path failed its confirmation check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolPathError {
    #[error("MSFragger path is not valid")]
    SearchEngine(PathBuf),

    #[error("idconvert path is not valid")]
    Converter(PathBuf),

    #[error(".params path is not valid")]
    SearchParams(PathBuf),
}

/// Failure of one `.mgf` conversion.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// A tool path was never confirmed.
    #[error(transparent)]
    InvalidTool(#[from] ToolPathError),

    /// The search engine could not be launched or exited non-zero.
    #[error("MSFragger failure")]
    SearchEngineFailed { detail: String },

    /// The search engine reported success without writing its output.
    #[error(".pepXML does not exist")]
    MissingIntermediate { path: PathBuf },

    /// The converter could not be launched or exited non-zero.
    #[error("idconvert failure")]
    ConverterFailed { detail: String },

    /// The converter reported success without writing its output.
    #[error(".mzid does not exist")]
    MissingOutput { path: PathBuf },

    /// The input path has no usable file name.
    #[error("Not an .mgf file: {0}")]
    NotMgf(PathBuf),

    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl ConversionError {
    pub fn search_engine_failed(detail: impl Into<String>) -> Self {
        Self::SearchEngineFailed {
            detail: detail.into(),
        }
    }

    pub fn converter_failed(detail: impl Into<String>) -> Self {
        Self::ConverterFailed {
            detail: detail.into(),
        }
    }

    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Extra detail for the log, beyond the user-facing message.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::SearchEngineFailed { detail } | Self::ConverterFailed { detail } => {
                Some(detail.as_str())
            }
            _ => None,
        }
    }
}

pub type ToolPathResult<T> = Result<T, ToolPathError>;
pub type ConversionResult<T> = Result<T, ConversionError>;
