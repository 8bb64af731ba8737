//! DDA pipeline step - hands parameters and input files to the engine.
//!
//! The engine call blocks until the whole pipeline finishes and cannot be
//! interrupted; cancellation only takes effect before it starts.

use std::sync::Arc;

use crate::engine::PipelineEngine;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, RunState, StepOutcome};

pub struct DdaPipelineStep {
    engine: Arc<dyn PipelineEngine>,
}

impl DdaPipelineStep {
    pub fn new(engine: Arc<dyn PipelineEngine>) -> Self {
        Self { engine }
    }
}

impl PipelineStep for DdaPipelineStep {
    fn name(&self) -> &str {
        "DDA pipeline"
    }

    fn validate_input(&self, ctx: &Context) -> StepResult<()> {
        ctx.parameters
            .validate()
            .map_err(|e| StepError::invalid_input(e.to_string()))?;

        std::fs::create_dir_all(&ctx.output_dir)
            .map_err(|e| StepError::io("creating output directory", e))?;

        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<StepOutcome> {
        if state.input_files.is_empty() {
            return Err(StepError::invalid_input("No input files"));
        }

        ctx.logger.info(&format!(
            "Running {} on {} file(s), output in {}",
            self.engine.name(),
            state.input_files.len(),
            ctx.output_dir.display()
        ));
        ctx.logger.clear_tail();

        let result = self.engine.run_dda_pipeline(
            &ctx.parameters,
            &state.input_files,
            &ctx.output_dir,
            &ctx.logger,
        );

        if let Err(e) = result {
            ctx.logger.show_tail("engine output");
            return Err(e.into());
        }

        state.engine_completed = true;
        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        if !state.engine_completed {
            return Err(StepError::invalid_output("engine did not complete"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineError, EngineResult};
    use crate::logging::LogSink;
    use crate::parameters::{DdaParameters, InstrumentType};
    use crate::project::InputFile;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    struct StubEngine {
        calls: AtomicUsize,
        fail: bool,
    }

    impl PipelineEngine for StubEngine {
        fn name(&self) -> &str {
            "stub"
        }

        fn default_parameters(
            &self,
            instrument: InstrumentType,
            avg_fwhm_rt: f64,
        ) -> EngineResult<DdaParameters> {
            Ok(DdaParameters::defaults(instrument, avg_fwhm_rt))
        }

        fn run_dda_pipeline(
            &self,
            _parameters: &DdaParameters,
            _input_files: &[InputFile],
            _output_dir: &Path,
            logger: &LogSink,
        ) -> EngineResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            logger.output_line("Reading raw files", false);
            if self.fail {
                Err(EngineError::pipeline_failed(Some(1), "bad raw file"))
            } else {
                Ok(())
            }
        }
    }

    fn context(dir: &Path) -> Context {
        Context::new(
            "test",
            DdaParameters::default(),
            dir.join("out"),
            Arc::new(LogSink::discard()),
        )
    }

    #[test]
    fn successful_call_marks_engine_completed() {
        let dir = tempdir().unwrap();
        let engine = Arc::new(StubEngine {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let step = DdaPipelineStep::new(engine.clone());
        let ctx = context(dir.path());
        let mut state = RunState::new(vec![InputFile::new("/d/a.mzXML")]);

        step.validate_input(&ctx).unwrap();
        assert!(dir.path().join("out").is_dir());

        assert_eq!(step.execute(&ctx, &mut state).unwrap(), StepOutcome::Success);
        assert!(step.validate_output(&ctx, &state).is_ok());
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn engine_failure_is_a_step_error() {
        let dir = tempdir().unwrap();
        let step = DdaPipelineStep::new(Arc::new(StubEngine {
            calls: AtomicUsize::new(0),
            fail: true,
        }));
        let ctx = context(dir.path());
        let mut state = RunState::new(vec![InputFile::new("/d/a.mzXML")]);

        let err = step.execute(&ctx, &mut state).unwrap_err();

        assert_eq!(err.to_string(), "DDA pipeline failed: bad raw file");
        assert!(!state.engine_completed);
        assert_eq!(ctx.logger.get_tail(), vec!["Reading raw files".to_string()]);
    }

    #[test]
    fn empty_file_list_is_rejected() {
        let dir = tempdir().unwrap();
        let engine = Arc::new(StubEngine {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let step = DdaPipelineStep::new(engine.clone());

        let err = step
            .execute(&context(dir.path()), &mut RunState::default())
            .unwrap_err();

        assert!(matches!(err, StepError::InvalidInput(_)));
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }
}
