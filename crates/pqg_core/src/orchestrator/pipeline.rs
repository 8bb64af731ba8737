//! Sequential step runner for a DDA run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::errors::{PipelineError, PipelineResult, StepResult};
use super::step::PipelineStep;
use super::types::{Context, RunState, StepOutcome};

/// Shared cancellation flag.
///
/// Cloned into the worker's [`Context`] and kept by the UI in a
/// `RunHandle`. Steps poll it; nothing is interrupted.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Ordered steps of one run.
///
/// Cancellation is checked before every step. A step whose `execute`
/// returns `Skipped` does not get its output validated.
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Box<dyn PipelineStep>>,
    cancel: CancelHandle,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn with_step<S: PipelineStep + 'static>(mut self, step: S) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// A handle sharing this pipeline's cancellation flag.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every step against `state`, stopping at the first failure.
    pub fn run(&self, ctx: &Context, state: &mut RunState) -> PipelineResult<PipelineRunResult> {
        let mut result = PipelineRunResult::default();
        let step_share = 100 / self.steps.len().max(1) as u32;

        for (index, step) in self.steps.iter().enumerate() {
            let name = step.name();
            if self.is_cancelled() {
                ctx.logger.warn(&format!("Cancelled before '{}'", name));
                return Err(PipelineError::cancelled(name));
            }

            ctx.logger.phase(name);
            ctx.report_progress(name, index as u32 * step_share, &format!("Starting {}", name));

            let outcome = run_step(step.as_ref(), ctx, state).map_err(|e| {
                ctx.logger.error(&format!("{} failed: {}", name, e));
                PipelineError::at_step(name, e)
            })?;

            match &outcome {
                StepOutcome::Success => ctx.logger.success(&format!("{} completed", name)),
                StepOutcome::Skipped(reason) => {
                    ctx.logger.info(&format!("{} skipped: {}", name, reason))
                }
            }
            result.steps.push((name.to_string(), outcome));
        }

        ctx.report_progress("Complete", 100, "DDA pipeline finished");
        Ok(result)
    }
}

fn run_step(step: &dyn PipelineStep, ctx: &Context, state: &mut RunState) -> StepResult<StepOutcome> {
    step.validate_input(ctx)?;
    let outcome = step.execute(ctx, state)?;
    if outcome == StepOutcome::Success {
        step.validate_output(ctx, state)?;
    }
    Ok(outcome)
}

/// What each step of a finished run did, in order.
#[derive(Debug, Clone, Default)]
pub struct PipelineRunResult {
    pub steps: Vec<(String, StepOutcome)>,
}

impl PipelineRunResult {
    pub fn completed(&self) -> Vec<&str> {
        self.names_where(|o| *o == StepOutcome::Success)
    }

    pub fn skipped(&self) -> Vec<&str> {
        self.names_where(|o| matches!(o, StepOutcome::Skipped(_)))
    }

    fn names_where(&self, keep: impl Fn(&StepOutcome) -> bool) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|(_, outcome)| keep(outcome))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogSink;
    use crate::orchestrator::errors::StepError;
    use crate::parameters::DdaParameters;
    use std::path::PathBuf;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    struct CountingStep {
        name: &'static str,
        execute_count: Arc<AtomicUsize>,
        outcome: fn() -> Result<StepOutcome, StepError>,
        output_ok: bool,
    }

    impl CountingStep {
        fn new(name: &'static str, count: &Arc<AtomicUsize>) -> Self {
            Self {
                name,
                execute_count: Arc::clone(count),
                outcome: || Ok(StepOutcome::Success),
                output_ok: true,
            }
        }
    }

    impl PipelineStep for CountingStep {
        fn name(&self) -> &str {
            self.name
        }

        fn validate_input(&self, _ctx: &Context) -> Result<(), StepError> {
            Ok(())
        }

        fn execute(&self, _ctx: &Context, _state: &mut RunState) -> Result<StepOutcome, StepError> {
            self.execute_count.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }

        fn validate_output(&self, _ctx: &Context, _state: &RunState) -> Result<(), StepError> {
            if self.output_ok {
                Ok(())
            } else {
                Err(StepError::invalid_output("nothing written"))
            }
        }
    }

    fn context() -> Context {
        Context::new(
            "test_run",
            DdaParameters::default(),
            PathBuf::from("/out"),
            Arc::new(LogSink::discard()),
        )
    }

    #[test]
    fn steps_keep_insertion_order() {
        let count = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new()
            .with_step(CountingStep::new("Step1", &count))
            .with_step(CountingStep::new("Step2", &count));

        assert_eq!(pipeline.step_names(), vec!["Step1", "Step2"]);
    }

    #[test]
    fn run_records_completed_and_skipped_steps() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut skipping = CountingStep::new("Convert", &count);
        skipping.outcome = || Ok(StepOutcome::Skipped("nothing to convert".to_string()));
        skipping.output_ok = false;
        let pipeline = Pipeline::new()
            .with_step(skipping)
            .with_step(CountingStep::new("Run", &count));

        let result = pipeline.run(&context(), &mut RunState::default()).unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(result.completed(), vec!["Run"]);
        assert_eq!(result.skipped(), vec!["Convert"]);
    }

    #[test]
    fn failing_step_stops_the_pipeline() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut failing = CountingStep::new("Convert", &count);
        failing.outcome = || Err(StepError::invalid_input("broken"));
        let pipeline = Pipeline::new()
            .with_step(failing)
            .with_step(CountingStep::new("Run", &count));

        let err = pipeline.run(&context(), &mut RunState::default()).unwrap_err();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(matches!(err, PipelineError::StepFailed { ref step, .. } if step == "Convert"));
    }

    #[test]
    fn rejected_output_fails_the_step() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut step = CountingStep::new("Run", &count);
        step.output_ok = false;
        let pipeline = Pipeline::new().with_step(step);

        let err = pipeline.run(&context(), &mut RunState::default()).unwrap_err();
        assert!(err.to_string().contains("nothing written"));
    }

    #[test]
    fn progress_reaches_one_hundred() {
        let count = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new()
            .with_step(CountingStep::new("Convert", &count))
            .with_step(CountingStep::new("Run", &count));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let ctx = context().with_progress_callback(Box::new(move |_, percent, _| {
            sink.lock().unwrap().push(percent);
        }));

        pipeline.run(&ctx, &mut RunState::default()).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![0, 50, 100]);
    }

    #[test]
    fn cancelled_pipeline_runs_no_steps() {
        let count = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new().with_step(CountingStep::new("Run", &count));
        let handle = pipeline.cancel_handle();

        assert!(!pipeline.is_cancelled());
        handle.cancel();
        assert!(pipeline.is_cancelled());

        let err = pipeline.run(&context(), &mut RunState::default()).unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
