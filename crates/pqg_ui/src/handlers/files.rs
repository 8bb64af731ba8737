//! Input file list handlers.

use std::path::PathBuf;

use iced::Task;

use pqg_core::identification::{is_identification_file, is_raw_file};

use crate::app::{App, EditFilesState, Message};

impl App {
    pub fn add_files(&self) -> Task<Message> {
        let start = self.start_directory();

        Task::perform(
            async move {
                let dialog = rfd::AsyncFileDialog::new()
                    .set_title("Select Raw Data Files")
                    .add_filter("Raw Data", &["mzXML", "mzML", "mzxml", "mzml"])
                    .add_filter("All Files", &["*"]);
                let dialog = match start {
                    Some(dir) => dialog.set_directory(dir),
                    None => dialog,
                };
                dialog
                    .pick_files()
                    .await
                    .map(|files| files.iter().map(|f| f.path().to_path_buf()).collect())
            },
            Message::RawFilesSelected,
        )
    }

    pub fn handle_raw_files_selected(&mut self, paths: Option<Vec<PathBuf>>) {
        let Some(paths) = paths.filter(|p| !p.is_empty()) else {
            return;
        };
        if let Some(first) = paths.first() {
            self.remember_directory(first);
        }
        self.add_raw_paths(paths);
    }

    fn add_raw_paths(&mut self, paths: Vec<PathBuf>) {
        let offered = paths.len();
        match self.session.add_raw_files(paths) {
            Ok(added) => {
                self.status_text = if added == offered {
                    format!("Added {} file(s)", added)
                } else {
                    format!("Added {} of {} file(s)", added, offered)
                };
            }
            Err(e) => self.show_error(e.to_string()),
        }
    }

    /// Dropped raw files are added to the project. Dropped identification
    /// files go to the edit panel when it is open.
    pub fn handle_file_dropped(&mut self, path: PathBuf) {
        if !self.can_edit() {
            return;
        }

        if let Some(dialog) = self.edit_dialog.as_mut() {
            if is_identification_file(&path) {
                if !dialog.candidates.contains(&path) {
                    dialog.candidates.push(path);
                }
                return;
            }
        }

        if is_raw_file(&path) {
            self.add_raw_paths(vec![path]);
        } else {
            self.status_text = format!("Ignored {}", path.display());
        }
    }

    pub fn handle_file_selection_toggled(&mut self, index: usize, selected: bool) {
        if selected {
            self.selected_files.insert(index);
        } else {
            self.selected_files.remove(&index);
        }
    }

    pub fn handle_reference_toggled(&mut self, index: usize, reference: bool) {
        if !self.can_edit() {
            return;
        }
        if let Err(e) = self.session.set_reference(index, reference) {
            self.show_error(e.to_string());
        }
    }

    pub fn remove_selected_files(&mut self) {
        if !self.can_edit() || self.selected_files.is_empty() {
            return;
        }
        let indices: Vec<usize> = self.selected_files.iter().copied().collect();
        match self.session.remove_files(&indices) {
            Ok(removed) => {
                self.selected_files.clear();
                self.status_text = format!("Removed {} file(s)", removed);
            }
            Err(e) => self.show_error(e.to_string()),
        }
    }

    pub fn remove_all_files(&mut self) {
        if !self.can_edit() {
            return;
        }
        match self.session.remove_all_files() {
            Ok(removed) => {
                self.selected_files.clear();
                self.status_text = format!("Removed {} file(s)", removed);
            }
            Err(e) => self.show_error(e.to_string()),
        }
    }

    pub fn open_edit_dialog(&mut self) {
        if !self.can_edit() {
            return;
        }
        if self.selected_files.is_empty() {
            self.status_text = "Select the files to edit first".to_string();
            return;
        }

        let indices: Vec<usize> = self.selected_files.iter().copied().collect();
        let group = indices
            .first()
            .and_then(|&i| self.session.input_files().get(i))
            .and_then(|f| f.group.clone())
            .unwrap_or_default();

        self.edit_dialog = Some(EditFilesState {
            indices,
            group,
            candidates: Vec::new(),
        });
    }

    pub fn browse_identifications(&self) -> Task<Message> {
        let start = self.start_directory();

        Task::perform(
            async move {
                let dialog = rfd::AsyncFileDialog::new()
                    .set_title("Select Identification Files")
                    .add_filter(
                        "Identification Files",
                        &["mzID", "mzIdentML", "mgf", "mzid", "mzidentml"],
                    )
                    .add_filter("All Files", &["*"]);
                let dialog = match start {
                    Some(dir) => dialog.set_directory(dir),
                    None => dialog,
                };
                dialog
                    .pick_files()
                    .await
                    .map(|files| files.iter().map(|f| f.path().to_path_buf()).collect())
            },
            Message::IdentificationsSelected,
        )
    }

    pub fn handle_identifications_selected(&mut self, paths: Option<Vec<PathBuf>>) {
        let Some(paths) = paths.filter(|p| !p.is_empty()) else {
            return;
        };
        if let Some(first) = paths.first() {
            self.remember_directory(first);
        }
        if let Some(dialog) = self.edit_dialog.as_mut() {
            dialog.candidates = paths
                .into_iter()
                .filter(|p| is_identification_file(p))
                .collect();
        }
    }

    pub fn confirm_edit_dialog(&mut self) {
        let Some(dialog) = self.edit_dialog.take() else {
            return;
        };

        match self
            .session
            .edit_files(&dialog.indices, &dialog.group, &dialog.candidates)
        {
            Ok(attached) => {
                self.status_text = format!(
                    "Updated {} file(s), attached {} identification file(s)",
                    dialog.indices.len(),
                    attached
                );
            }
            Err(e) => self.show_error(e.to_string()),
        }
    }
}
