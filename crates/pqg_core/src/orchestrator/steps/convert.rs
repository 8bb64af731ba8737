//! Convert step - turns `.mgf` identifications into `.mzID` before the
//! engine runs.
//!
//! Entries whose identification is already in a native format are left
//! alone. Cancellation is checked before each file.

use std::sync::Arc;

use crate::identification::{needs_conversion, CommandRunner, IdentificationConverter};
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, ConversionRecord, RunState, StepOutcome};

pub struct ConvertIdentificationsStep {
    runner: Arc<dyn CommandRunner>,
}

impl ConvertIdentificationsStep {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn pending(state: &RunState) -> Vec<usize> {
        state
            .input_files
            .iter()
            .enumerate()
            .filter(|(_, f)| f.ident_path.as_deref().is_some_and(needs_conversion))
            .map(|(i, _)| i)
            .collect()
    }
}

impl PipelineStep for ConvertIdentificationsStep {
    fn name(&self) -> &str {
        "Convert identifications"
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<StepOutcome> {
        let pending = Self::pending(state);
        if pending.is_empty() {
            return Ok(StepOutcome::Skipped("no .mgf identification files".to_string()));
        }

        ctx.logger
            .info(&format!("{} identification file(s) to convert", pending.len()));

        let converter = IdentificationConverter::new(self.runner.as_ref(), &ctx.tools, &ctx.logger)
            .with_java(&ctx.java, &ctx.java_max_heap);

        for (n, index) in pending.iter().enumerate() {
            if ctx.is_cancelled() {
                ctx.logger.warn("Conversion cancelled");
                return Err(StepError::Cancelled);
            }

            let Some(mgf) = state.input_files[*index].ident_path.clone() else {
                continue;
            };
            let percent = (n * 100 / pending.len()) as u32;
            ctx.report_progress(
                self.name(),
                percent,
                &format!("Converting {}", mgf.display()),
            );

            let mzid = converter
                .process(&mgf)
                .map_err(|e| {
                    if let Some(detail) = e.detail() {
                        ctx.logger.error(detail);
                    }
                    StepError::conversion(&mgf, e)
                })?;

            state.input_files[*index].ident_path = Some(mzid.clone());
            state.conversions.push(ConversionRecord { mgf, mzid });
        }

        Ok(StepOutcome::Success)
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        if let Some(index) = Self::pending(state).first() {
            return Err(StepError::invalid_output(format!(
                "input file {} still has an .mgf identification",
                index + 1
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identification::{CommandOutput, CommandSpec, ToolPath, ToolPaths};
    use crate::logging::LogSink;
    use crate::orchestrator::CancelHandle;
    use crate::parameters::DdaParameters;
    use crate::project::InputFile;
    use parking_lot::Mutex;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    /// Writes the files both tools would produce.
    #[derive(Default)]
    struct WritingRunner {
        calls: Mutex<Vec<CommandSpec>>,
    }

    impl CommandRunner for WritingRunner {
        fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
            self.calls.lock().push(spec.clone());
            let input = PathBuf::from(spec.args.iter().last().unwrap());
            if spec.args.iter().any(|a| a == "-jar") {
                fs::write(input.with_extension("pepxml"), b"")?;
            } else {
                fs::write(PathBuf::from(&spec.args[0]).with_extension("mzID"), b"")?;
            }
            Ok(CommandOutput {
                exit_code: Some(0),
                ..CommandOutput::default()
            })
        }
    }

    fn tools(dir: &Path) -> ToolPaths {
        let confirmed = |name: &str| ToolPath {
            confirmed: true,
            path: dir.join(name),
        };
        ToolPaths {
            search_engine: confirmed("MSFragger.jar"),
            converter: confirmed("idconvert"),
            search_params: confirmed("closed.params"),
        }
    }

    fn context(dir: &Path) -> Context {
        Context::new(
            "test",
            DdaParameters::default(),
            dir.to_path_buf(),
            Arc::new(LogSink::discard()),
        )
        .with_tools(tools(dir))
    }

    fn with_ident(raw: &str, ident: Option<PathBuf>) -> InputFile {
        InputFile {
            ident_path: ident,
            ..InputFile::new(raw)
        }
    }

    #[test]
    fn skipped_without_mgf_files() {
        let dir = tempdir().unwrap();
        let runner = Arc::new(WritingRunner::default());
        let step = ConvertIdentificationsStep::new(runner.clone());
        let mut state = RunState::new(vec![
            with_ident("/d/a.mzML", Some(PathBuf::from("/d/a.mzID"))),
            with_ident("/d/b.mzML", None),
        ]);

        let outcome = step.execute(&context(dir.path()), &mut state).unwrap();

        assert!(matches!(outcome, StepOutcome::Skipped(_)));
        assert!(runner.calls.lock().is_empty());
    }

    #[test]
    fn mgf_entries_are_replaced_by_mzid() {
        let dir = tempdir().unwrap();
        let mgf = dir.path().join("a.mgf");
        let runner = Arc::new(WritingRunner::default());
        let step = ConvertIdentificationsStep::new(runner.clone());
        let mut state = RunState::new(vec![
            with_ident("/d/a.mzML", Some(mgf.clone())),
            with_ident("/d/b.mzML", Some(PathBuf::from("/d/b.mzID"))),
        ]);
        let ctx = context(dir.path());

        let outcome = step.execute(&ctx, &mut state).unwrap();

        assert_eq!(outcome, StepOutcome::Success);
        assert_eq!(state.input_files[0].ident_path, Some(dir.path().join("a.mzID")));
        assert_eq!(state.input_files[1].ident_path, Some(PathBuf::from("/d/b.mzID")));
        assert_eq!(state.conversions.len(), 1);
        assert_eq!(state.conversions[0].mgf, mgf);
        assert_eq!(runner.calls.lock().len(), 2);
        assert!(step.validate_output(&ctx, &state).is_ok());
    }

    #[test]
    fn conversion_failure_names_the_file() {
        let dir = tempdir().unwrap();
        let step = ConvertIdentificationsStep::new(Arc::new(WritingRunner::default()));
        let mut state =
            RunState::new(vec![with_ident("/d/a.mzML", Some(dir.path().join("a.mgf")))]);
        let ctx = Context::new(
            "test",
            DdaParameters::default(),
            dir.path().to_path_buf(),
            Arc::new(LogSink::discard()),
        );

        let err = step.execute(&ctx, &mut state).unwrap_err();

        assert_eq!(err.to_string(), "a.mgf: MSFragger path is not valid");
        assert!(state.conversions.is_empty());
    }

    #[test]
    fn cancellation_stops_before_next_file() {
        let dir = tempdir().unwrap();
        let runner = Arc::new(WritingRunner::default());
        let step = ConvertIdentificationsStep::new(runner.clone());
        let mut state =
            RunState::new(vec![with_ident("/d/a.mzML", Some(dir.path().join("a.mgf")))]);

        let pipeline = crate::orchestrator::Pipeline::new();
        let handle: CancelHandle = pipeline.cancel_handle();
        handle.cancel();
        let ctx = context(dir.path()).with_cancel_handle(handle);

        let err = step.execute(&ctx, &mut state).unwrap_err();

        assert!(matches!(err, StepError::Cancelled));
        assert!(runner.calls.lock().is_empty());
    }
}
