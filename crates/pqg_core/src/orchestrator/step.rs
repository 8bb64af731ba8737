//! The unit of work a [`Pipeline`](super::Pipeline) runs.

use super::errors::StepResult;
use super::types::{Context, RunState, StepOutcome};

/// One stage of a DDA run.
///
/// For each step the pipeline calls `validate_input`, then `execute`, then
/// `validate_output` if `execute` returned [`StepOutcome::Success`]. The
/// first error stops the run.
///
/// Steps log through `ctx.logger` and report progress within their own
/// share with `ctx.report_progress`. Long steps should poll
/// `ctx.is_cancelled()` between units of work and return
/// `StepError::Cancelled`.
pub trait PipelineStep: Send + Sync {
    /// Shown in the run panel and in error messages.
    fn name(&self) -> &str;

    fn validate_input(&self, _ctx: &Context) -> StepResult<()> {
        Ok(())
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<StepOutcome>;

    fn validate_output(&self, _ctx: &Context, _state: &RunState) -> StepResult<()> {
        Ok(())
    }
}
