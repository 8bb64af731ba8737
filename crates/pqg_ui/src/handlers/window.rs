//! Window management handlers.

use iced::window;
use iced::Task;

use crate::app::{App, Message, Modal};

impl App {
    /// Prompt before closing when the project has unsaved changes.
    pub fn handle_close_requested(&mut self, _id: window::Id) -> Task<Message> {
        if self.session.is_dirty() {
            self.modal = Some(Modal::ClosePrompt);
            return Task::none();
        }
        self.exit()
    }

    pub fn save_and_exit(&mut self) -> Task<Message> {
        if self.save_session() {
            self.exit()
        } else {
            Task::none()
        }
    }

    pub fn exit(&mut self) -> Task<Message> {
        if let Some(handle) = self.run.as_mut().and_then(|run| run.handle.take()) {
            tracing::warn!("Exiting with a pipeline run in progress");
            handle.cancel();
        }
        tracing::info!("PASTAQ GUI exiting");
        iced::exit()
    }
}
