//! Background execution of one pipeline run.
//!
//! The run happens on its own named thread. Everything it reports goes
//! through a single event callback, and the last event is always exactly
//! one [`PipelineEvent::Finished`].

use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::engine::PipelineEngine;
use crate::identification::{CommandRunner, ToolPaths, DEFAULT_JAVA_MAX_HEAP};
use crate::logging::{LineCallback, LogConfig, LogSink};
use crate::parameters::DdaParameters;
use crate::project::InputFile;

use super::create_dda_pipeline;
use super::pipeline::{CancelHandle, Pipeline};
use super::types::{Context, RunState};

/// Everything a run needs, copied out of the project so the UI can keep
/// editing while it runs.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub run_name: String,
    pub parameters: DdaParameters,
    pub input_files: Vec<InputFile>,
    pub output_dir: PathBuf,
    pub tools: ToolPaths,
    pub java: String,
    pub java_max_heap: String,
    pub log_config: LogConfig,
    /// Directory for the per-run log file. `None` keeps output in memory.
    pub log_dir: Option<PathBuf>,
}

impl RunRequest {
    pub fn new(
        parameters: DdaParameters,
        input_files: Vec<InputFile>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            run_name: "dda_pipeline".to_string(),
            parameters,
            input_files,
            output_dir: output_dir.into(),
            tools: ToolPaths::default(),
            java: "java".to_string(),
            java_max_heap: DEFAULT_JAVA_MAX_HEAP.to_string(),
            log_config: LogConfig::default(),
            log_dir: None,
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Succeeded,
    /// The message is suitable for an error dialog.
    Failed(String),
    Cancelled,
}

/// Something the UI should show.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// One formatted log line.
    Log(String),
    Progress {
        step: String,
        percent: u32,
        message: String,
    },
    /// Always the last event of a run, sent exactly once.
    Finished(RunOutcome),
}

type EventCallback = Arc<dyn Fn(PipelineEvent) + Send + Sync>;

/// Handle to a running pipeline.
pub struct RunHandle {
    cancel: CancelHandle,
    thread: Option<JoinHandle<()>>,
}

impl RunHandle {
    /// Ask the run to stop at the next step or file boundary.
    ///
    /// An engine call already in progress keeps running until it returns.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Block until the worker thread exits.
    pub fn join(mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("Pipeline worker thread panicked");
            }
        }
    }
}

impl std::fmt::Debug for RunHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunHandle")
            .field("cancelled", &self.is_cancelled())
            .field("finished", &self.is_finished())
            .finish()
    }
}

/// Start a run on a background thread.
///
/// `on_event` is called from the worker thread.
pub fn spawn_pipeline_run<F>(
    request: RunRequest,
    engine: Arc<dyn PipelineEngine>,
    runner: Arc<dyn CommandRunner>,
    on_event: F,
) -> io::Result<RunHandle>
where
    F: Fn(PipelineEvent) + Send + Sync + 'static,
{
    let events: EventCallback = Arc::new(on_event);
    let pipeline = create_dda_pipeline(engine, runner);
    let cancel = pipeline.cancel_handle();

    let thread = thread::Builder::new()
        .name("dda-pipeline".to_string())
        .spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                run_pipeline(&pipeline, request, &events)
            }))
            .unwrap_or_else(|payload| {
                let message = panic_message(payload.as_ref());
                tracing::error!("Pipeline worker panicked: {}", message);
                RunOutcome::Failed(format!("Internal error: {}", message))
            });

            tracing::info!("Pipeline run finished: {:?}", outcome);
            events(PipelineEvent::Finished(outcome));
        })?;

    Ok(RunHandle {
        cancel,
        thread: Some(thread),
    })
}

fn run_pipeline(pipeline: &Pipeline, request: RunRequest, events: &EventCallback) -> RunOutcome {
    let logger = Arc::new(build_logger(&request, events));

    let progress_events = Arc::clone(events);
    let ctx = Context::new(
        request.run_name,
        request.parameters,
        request.output_dir,
        Arc::clone(&logger),
    )
    .with_tools(request.tools)
    .with_java(request.java, request.java_max_heap)
    .with_cancel_handle(pipeline.cancel_handle())
    .with_progress_callback(Box::new(move |step, percent, message| {
        progress_events(PipelineEvent::Progress {
            step: step.to_string(),
            percent,
            message: message.to_string(),
        });
    }));
    let mut state = RunState::new(request.input_files);

    logger.info("Starting DDA Pipeline");
    let outcome = match pipeline.run(&ctx, &mut state) {
        Ok(result) => {
            tracing::debug!(
                "Steps completed: {:?}, skipped: {:?}",
                result.completed(),
                result.skipped()
            );
            RunOutcome::Succeeded
        }
        Err(e) if e.is_cancelled() => {
            logger.warn("Pipeline cancelled");
            RunOutcome::Cancelled
        }
        Err(e) => {
            logger.error(&e.to_string());
            RunOutcome::Failed(e.user_message())
        }
    };

    logger.close();
    outcome
}

fn build_logger(request: &RunRequest, events: &EventCallback) -> LogSink {
    let forward = || -> LineCallback {
        let events = Arc::clone(events);
        Box::new(move |line: &str| events(PipelineEvent::Log(line.to_string())))
    };

    let Some(dir) = &request.log_dir else {
        return LogSink::callback_only(request.log_config.clone(), forward());
    };

    LogSink::builder(&request.run_name)
        .log_dir(dir)
        .config(request.log_config.clone())
        .callback(forward())
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!("Cannot create run log in {}: {}", dir.display(), e);
            LogSink::callback_only(request.log_config.clone(), forward())
        })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineError, EngineResult};
    use crate::identification::{CommandOutput, CommandSpec, SystemCommandRunner, ToolPath};
    use crate::parameters::InstrumentType;
    use parking_lot::Mutex;
    use std::fs;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc;
    use tempfile::tempdir;

    enum Behaviour {
        Succeed,
        Fail,
        Panic,
    }

    struct MockEngine {
        behaviour: Behaviour,
        calls: AtomicUsize,
        received: Mutex<Vec<InputFile>>,
    }

    impl MockEngine {
        fn new(behaviour: Behaviour) -> Arc<Self> {
            Arc::new(Self {
                behaviour,
                calls: AtomicUsize::new(0),
                received: Mutex::new(Vec::new()),
            })
        }
    }

    impl PipelineEngine for MockEngine {
        fn name(&self) -> &str {
            "mock"
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
            input_files: &[InputFile],
            _output_dir: &Path,
            logger: &LogSink,
        ) -> EngineResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.received.lock() = input_files.to_vec();
            logger.output_line("Reading raw files", false);
            match self.behaviour {
                Behaviour::Succeed => Ok(()),
                Behaviour::Fail => Err(EngineError::pipeline_failed(Some(1), "out of memory")),
                Behaviour::Panic => panic!("engine exploded"),
            }
        }
    }

    fn collect_events() -> (Arc<Mutex<Vec<PipelineEvent>>>, impl Fn(PipelineEvent) + Send + Sync) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        (events, move |event| sink.lock().push(event))
    }

    fn finished(events: &[PipelineEvent]) -> Vec<RunOutcome> {
        events
            .iter()
            .filter_map(|e| match e {
                PipelineEvent::Finished(outcome) => Some(outcome.clone()),
                _ => None,
            })
            .collect()
    }

    fn request(dir: &Path) -> RunRequest {
        let mut request = RunRequest::new(
            DdaParameters::default(),
            vec![InputFile::new("/d/a.mzXML"), InputFile::new("/d/b.mzXML")],
            dir.join("out"),
        );
        request.log_config.show_timestamps = false;
        request
    }

    #[test]
    fn successful_run_finishes_once() {
        let dir = tempdir().unwrap();
        let engine = MockEngine::new(Behaviour::Succeed);
        let (events, on_event) = collect_events();

        let handle = spawn_pipeline_run(
            request(dir.path()),
            engine.clone(),
            Arc::new(SystemCommandRunner),
            on_event,
        )
        .unwrap();
        handle.join();

        let events = events.lock();
        assert_eq!(finished(&events), vec![RunOutcome::Succeeded]);
        assert!(matches!(events.last(), Some(PipelineEvent::Finished(_))));
        assert!(events.contains(&PipelineEvent::Log("Starting DDA Pipeline".to_string())));
        assert!(events.contains(&PipelineEvent::Log("Reading raw files".to_string())));
        assert!(events
            .iter()
            .any(|e| matches!(e, PipelineEvent::Progress { percent: 100, .. })));
        assert_eq!(engine.received.lock().len(), 2);
    }

    #[test]
    fn engine_error_still_finishes_once() {
        let dir = tempdir().unwrap();
        let engine = MockEngine::new(Behaviour::Fail);
        let (events, on_event) = collect_events();

        spawn_pipeline_run(
            request(dir.path()),
            engine,
            Arc::new(SystemCommandRunner),
            on_event,
        )
        .unwrap()
        .join();

        assert_eq!(
            finished(&events.lock()),
            vec![RunOutcome::Failed("DDA pipeline failed: out of memory".to_string())]
        );
    }

    #[test]
    fn engine_panic_still_finishes_once() {
        let dir = tempdir().unwrap();
        let engine = MockEngine::new(Behaviour::Panic);
        let (events, on_event) = collect_events();

        spawn_pipeline_run(
            request(dir.path()),
            engine,
            Arc::new(SystemCommandRunner),
            on_event,
        )
        .unwrap()
        .join();

        let outcomes = finished(&events.lock());
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(&outcomes[0], RunOutcome::Failed(msg) if msg.contains("engine exploded")));
    }

    #[test]
    fn run_log_file_is_written() {
        let dir = tempdir().unwrap();
        let mut request = request(dir.path());
        request.log_dir = Some(dir.path().join("logs"));
        let (_events, on_event) = collect_events();

        spawn_pipeline_run(
            request,
            MockEngine::new(Behaviour::Succeed),
            Arc::new(SystemCommandRunner),
            on_event,
        )
        .unwrap()
        .join();

        let log = fs::read_to_string(dir.path().join("logs").join("dda_pipeline.log")).unwrap();
        assert!(log.contains("Starting DDA Pipeline"));
    }

    /// Blocks each tool call until the test releases it.
    struct GatedRunner {
        started: Mutex<mpsc::Sender<()>>,
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl CommandRunner for GatedRunner {
        fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
            let _ = self.started.lock().send(());
            let _ = self.release.lock().recv();

            let input = std::path::PathBuf::from(spec.args.iter().last().unwrap());
            if spec.args.iter().any(|a| a == "-jar") {
                fs::write(input.with_extension("pepxml"), b"")?;
            } else {
                fs::write(std::path::PathBuf::from(&spec.args[0]).with_extension("mzID"), b"")?;
            }
            Ok(CommandOutput {
                exit_code: Some(0),
                ..CommandOutput::default()
            })
        }
    }

    #[test]
    fn cancel_during_conversion_skips_engine() {
        let dir = tempdir().unwrap();
        let (started_tx, started_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let runner = Arc::new(GatedRunner {
            started: Mutex::new(started_tx),
            release: Mutex::new(release_rx),
        });

        let mut request = request(dir.path());
        for (file, name) in request.input_files.iter_mut().zip(["a.mgf", "b.mgf"]) {
            file.ident_path = Some(dir.path().join(name));
        }
        let confirmed = |name: &str| ToolPath {
            confirmed: true,
            path: dir.path().join(name),
        };
        request.tools = ToolPaths {
            search_engine: confirmed("MSFragger.jar"),
            converter: confirmed("idconvert"),
            search_params: confirmed("closed.params"),
        };

        let engine = MockEngine::new(Behaviour::Succeed);
        let (events, on_event) = collect_events();
        let handle =
            spawn_pipeline_run(request, engine.clone(), runner, on_event).unwrap();

        // First tool call of the first file has started.
        started_rx.recv().unwrap();
        handle.cancel();
        // Let both tool calls of the first file complete.
        release_tx.send(()).unwrap();
        started_rx.recv().unwrap();
        release_tx.send(()).unwrap();
        handle.join();

        assert_eq!(finished(&events.lock()), vec![RunOutcome::Cancelled]);
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
        assert!(dir.path().join("a.mzID").exists());
        assert!(!dir.path().join("b.mzID").exists());
    }
}
