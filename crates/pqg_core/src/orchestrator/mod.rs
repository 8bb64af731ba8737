//! Pipeline orchestrator for coordinating a DDA run.
//!
//! A run moves through these states on a background thread:
//!
//! ```text
//! Idle -> Converting (0..n .mgf files) -> Running (engine call) -> Succeeded | Failed
//! ```
//!
//! Each state is a [`PipelineStep`]:
//!
//! ```text
//! Pipeline
//!     ├── Step: Convert identifications
//!     └── Step: DDA pipeline
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pqg_core::orchestrator::{spawn_pipeline_run, PipelineEvent, RunRequest};
//!
//! let request = RunRequest::new(parameters, input_files, output_dir);
//! let handle = spawn_pipeline_run(request, engine, runner, |event| match event {
//!     PipelineEvent::Log(line) => println!("{}", line),
//!     PipelineEvent::Progress { percent, .. } => println!("{}%", percent),
//!     PipelineEvent::Finished(outcome) => println!("done: {:?}", outcome),
//! })?;
//! ```

mod errors;
mod pipeline;
mod step;
pub mod steps;
mod types;
mod worker;

use std::sync::Arc;

pub use errors::{PipelineError, PipelineResult, StepError, StepResult};
pub use pipeline::{CancelHandle, Pipeline, PipelineRunResult};
pub use step::PipelineStep;
pub use steps::{ConvertIdentificationsStep, DdaPipelineStep};
pub use types::{Context, ConversionRecord, ProgressCallback, RunState, StepOutcome};
pub use worker::{spawn_pipeline_run, PipelineEvent, RunHandle, RunOutcome, RunRequest};

use crate::engine::PipelineEngine;
use crate::identification::CommandRunner;

/// Create the DDA pipeline: convert identifications, then run the engine.
pub fn create_dda_pipeline(
    engine: Arc<dyn PipelineEngine>,
    runner: Arc<dyn CommandRunner>,
) -> Pipeline {
    Pipeline::new()
        .with_step(ConvertIdentificationsStep::new(runner))
        .with_step(DdaPipelineStep::new(engine))
}
