//! The external processing engine.
//!
//! Peak detection, alignment, matching and protein inference all happen
//! inside the engine. This crate only hands it the parameters and input
//! files and relays its console output.

mod errors;
mod python;

use std::path::Path;

pub use errors::{EngineError, EngineResult};
pub use python::PythonEngine;

use crate::logging::LogSink;
use crate::parameters::{DdaParameters, InstrumentType};
use crate::project::InputFile;

/// A processing engine able to run the DDA pipeline.
pub trait PipelineEngine: Send + Sync {
    fn name(&self) -> &str;

    /// The engine's default parameters for an instrument and peak width.
    fn default_parameters(
        &self,
        instrument: InstrumentType,
        avg_fwhm_rt: f64,
    ) -> EngineResult<DdaParameters>;

    /// Run the whole pipeline, blocking until it returns.
    ///
    /// Console output is written to `logger` line by line as it arrives.
    fn run_dda_pipeline(
        &self,
        parameters: &DdaParameters,
        input_files: &[InputFile],
        output_dir: &Path,
        logger: &LogSink,
    ) -> EngineResult<()>;
}
