//! Pipeline run handlers.

use std::path::Path;
use std::sync::Arc;

use iced::futures::stream;
use iced::Task;
use tokio::sync::mpsc;

use pqg_core::logging::LogConfig;
use pqg_core::orchestrator::{spawn_pipeline_run, PipelineEvent, RunOutcome, RunRequest};

use crate::app::{App, Message, Modal, RunPanel};

impl App {
    /// Save the project and start a run on a worker thread.
    ///
    /// Worker events come back through a channel drained by a `Task::run`
    /// stream that ends when the worker drops its sender.
    pub fn run_pipeline(&mut self) -> Task<Message> {
        if !self.can_edit() {
            return Task::none();
        }
        if !self.save_session() {
            return Task::none();
        }
        let Some(output_dir) = self.session.output_dir().map(Path::to_path_buf) else {
            return Task::none();
        };

        let settings = self.config.settings();
        let mut request = RunRequest::new(
            self.session.parameters().clone(),
            self.session.input_files().to_vec(),
            &output_dir,
        );
        request.tools = self.tools.clone();
        request.java = settings.tools.java.clone();
        request.java_max_heap = settings.tools.java_max_heap.clone();
        request.log_config = LogConfig::from(&settings.logging);
        request.log_dir = Some(output_dir.join("logs"));

        let (tx, rx) = mpsc::unbounded_channel();
        let spawned = spawn_pipeline_run(
            request,
            Arc::clone(&self.engine),
            Arc::clone(&self.runner),
            move |event| {
                // The receiver is gone once the window has closed.
                let _ = tx.send(event);
            },
        );

        match spawned {
            Ok(handle) => {
                tracing::info!("Started DDA pipeline in {}", output_dir.display());
                self.edit_dialog = None;
                self.run = Some(RunPanel::new(handle));
                self.status_text = "Running DDA pipeline...".to_string();

                let events = stream::unfold(rx, |mut rx| async move {
                    rx.recv().await.map(|event| (event, rx))
                });
                Task::run(events, Message::Pipeline)
            }
            Err(e) => {
                self.show_error(format!("Failed to start the pipeline: {}", e));
                Task::none()
            }
        }
    }

    pub fn handle_pipeline_event(&mut self, event: PipelineEvent) {
        let Some(run) = self.run.as_mut() else {
            return;
        };

        match event {
            PipelineEvent::Log(line) => run.append_log(&line),
            PipelineEvent::Progress {
                step,
                percent,
                message,
            } => {
                run.step = step;
                run.progress = percent.min(100) as f32;
                run.status = message;
            }
            PipelineEvent::Finished(outcome) => {
                self.status_text = run.finish(outcome.clone());
                if let RunOutcome::Failed(message) = outcome {
                    self.modal = Some(Modal::Error(message));
                }
            }
        }
    }

    /// Best-effort cancel. An engine call already running is not interrupted.
    pub fn cancel_run(&mut self) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        if run.cancel_requested || run.is_finished() {
            return;
        }
        if let Some(handle) = run.handle.as_ref() {
            handle.cancel();
        }
        run.cancel_requested = true;
        run.append_log("Cancellation requested; waiting for the current step to return.");
        tracing::info!("Pipeline cancellation requested");
    }

    /// Hide or reopen the panel of a run that is still going. The project
    /// stays read-only until the run finishes.
    pub fn set_run_panel_hidden(&mut self, hidden: bool) {
        if let Some(run) = self.run.as_mut().filter(|run| !run.is_finished()) {
            run.hidden = hidden;
        }
    }

    pub fn close_run_panel(&mut self) {
        if self.run.as_ref().is_some_and(RunPanel::is_finished) {
            self.run = None;
        }
    }
}
