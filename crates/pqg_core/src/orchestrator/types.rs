//! What steps read ([`Context`]) and what they change ([`RunState`]).

use std::path::PathBuf;
use std::sync::Arc;

use crate::identification::{ToolPaths, DEFAULT_JAVA_MAX_HEAP};
use crate::logging::LogSink;
use crate::parameters::DdaParameters;
use crate::project::InputFile;

use super::pipeline::CancelHandle;

/// Receives `(step, percent, message)`; percent is for the whole run.
pub type ProgressCallback = Box<dyn Fn(&str, u32, &str) + Send + Sync>;

/// Fixed inputs of one run, shared by every step.
pub struct Context {
    /// Also the run log's file name.
    pub run_name: String,
    pub parameters: DdaParameters,
    /// The project directory; the engine writes its results here.
    pub output_dir: PathBuf,
    pub tools: ToolPaths,
    pub java: String,
    pub java_max_heap: String,
    pub logger: Arc<LogSink>,
    cancel: Option<CancelHandle>,
    on_progress: Option<ProgressCallback>,
}

impl Context {
    /// Java defaults to `java` with the standard heap; no tools are confirmed.
    pub fn new(
        run_name: impl Into<String>,
        parameters: DdaParameters,
        output_dir: PathBuf,
        logger: Arc<LogSink>,
    ) -> Self {
        Self {
            run_name: run_name.into(),
            parameters,
            output_dir,
            tools: ToolPaths::default(),
            java: "java".to_string(),
            java_max_heap: DEFAULT_JAVA_MAX_HEAP.to_string(),
            logger,
            cancel: None,
            on_progress: None,
        }
    }

    pub fn with_tools(mut self, tools: ToolPaths) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_java(mut self, program: impl Into<String>, max_heap: impl Into<String>) -> Self {
        self.java = program.into();
        self.java_max_heap = max_heap.into();
        self
    }

    /// Let steps observe cancellation of the pipeline.
    pub fn with_cancel_handle(mut self, cancel: CancelHandle) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn with_progress_callback(mut self, on_progress: ProgressCallback) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    pub fn report_progress(&self, step: &str, percent: u32, message: &str) {
        if let Some(on_progress) = &self.on_progress {
            on_progress(step, percent.min(100), message);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelHandle::is_cancelled)
    }
}

/// Record of one converted identification file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRecord {
    pub mgf: PathBuf,
    pub mzid: PathBuf,
}

/// Mutable run state that accumulates results from pipeline steps.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    /// Input files, with identification paths updated by conversion.
    pub input_files: Vec<InputFile>,
    /// Conversions performed during this run.
    pub conversions: Vec<ConversionRecord>,
    /// Set once the engine call has returned successfully.
    pub engine_completed: bool,
}

impl RunState {
    pub fn new(input_files: Vec<InputFile>) -> Self {
        Self {
            input_files,
            ..Self::default()
        }
    }
}

/// Outcome of executing a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Success,
    /// Nothing to do; the reason is logged.
    Skipped(String),
}
