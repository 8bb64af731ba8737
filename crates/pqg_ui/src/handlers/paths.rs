//! External tool path handlers.

use std::path::PathBuf;

use iced::Task;

use pqg_core::config::ConfigSection;
use pqg_core::identification::ToolKind;

use super::helpers::clean_file_url;
use crate::app::{App, Message};

impl App {
    pub fn browse_tool(&self, kind: ToolKind) -> Task<Message> {
        let start = self.start_directory();
        let title = format!("Select {}", kind.label());
        let extensions = kind.picker_extensions();

        Task::perform(
            async move {
                let mut dialog = rfd::AsyncFileDialog::new().set_title(title);
                if !extensions.is_empty() {
                    dialog = dialog.add_filter(kind.label(), extensions);
                }
                dialog = dialog.add_filter("All Files", &["*"]);
                if let Some(dir) = start {
                    dialog = dialog.set_directory(dir);
                }
                let path = dialog.pick_file().await.map(|f| f.path().to_path_buf());
                (kind, path)
            },
            |(kind, path)| Message::ToolSelected(kind, path),
        )
    }

    pub fn handle_tool_selected(&mut self, kind: ToolKind, path: Option<PathBuf>) {
        let Some(path) = path else {
            return;
        };
        self.remember_directory(&path);
        self.tool_inputs
            .insert(kind, path.to_string_lossy().into_owned());
        self.confirm_tool(kind);
    }

    pub fn handle_tool_path_changed(&mut self, kind: ToolKind, text: String) {
        self.tool_inputs.insert(kind, clean_file_url(&text));
    }

    /// Check the typed path. Confirmed paths are saved to the config.
    pub fn confirm_tool(&mut self, kind: ToolKind) {
        let path = self.tool_inputs.get(&kind).cloned().unwrap_or_default();

        match self.tools.set(kind, &path) {
            Ok(()) => {
                self.tools.store(&mut self.config.settings_mut().paths);
                if let Err(e) = self.config.update_section(ConfigSection::Paths) {
                    tracing::warn!("Failed to save tool paths: {}", e);
                }
                self.status_text = format!("{} path confirmed", kind.label());
            }
            Err(e) => self.show_error(e.to_string()),
        }
    }
}
