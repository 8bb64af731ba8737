//! Project lifecycle handlers: new, open, save, reset.

use std::path::PathBuf;
use std::sync::Arc;

use iced::Task;

use pqg_core::config::ConfigSection;
use pqg_core::parameters::{DdaParameters, InstrumentType, DEFAULT_AVG_FWHM_RT};
use pqg_core::project::ProjectSession;

use crate::app::{App, DefaultsTarget, Message};

impl App {
    /// Pick a directory for a new project.
    pub fn new_project(&self) -> Task<Message> {
        let start = self.start_directory();

        Task::perform(
            async move {
                let dialog = rfd::AsyncFileDialog::new().set_title("Select Project Directory");
                let dialog = match start {
                    Some(dir) => dialog.set_directory(dir),
                    None => dialog,
                };
                dialog.pick_folder().await.map(|f| f.path().to_path_buf())
            },
            Message::NewProjectDirSelected,
        )
    }

    pub fn handle_new_project_dir(&mut self, dir: Option<PathBuf>) -> Task<Message> {
        let Some(dir) = dir else {
            return Task::none();
        };
        self.remember_directory(&dir);
        self.load_defaults(DefaultsTarget::NewProject(dir))
    }

    /// Ask the engine for its defaults off the UI thread.
    fn load_defaults(&mut self, target: DefaultsTarget) -> Task<Message> {
        if self.loading_defaults {
            return Task::none();
        }
        self.loading_defaults = true;
        self.status_text = "Loading default parameters...".to_string();

        let engine = Arc::clone(&self.engine);
        Task::perform(
            async move {
                let result = tokio::task::spawn_blocking(move || {
                    engine.default_parameters(InstrumentType::Orbitrap, DEFAULT_AVG_FWHM_RT)
                })
                .await;

                let result = match result {
                    Ok(Ok(parameters)) => Ok(parameters),
                    Ok(Err(e)) => Err(e.to_string()),
                    Err(e) => Err(e.to_string()),
                };
                (target, result)
            },
            |(target, result)| Message::DefaultsLoaded(target, result),
        )
    }

    pub fn handle_defaults_loaded(
        &mut self,
        target: DefaultsTarget,
        result: Result<DdaParameters, String>,
    ) {
        self.loading_defaults = false;

        let (parameters, source) = match result {
            Ok(parameters) => (parameters, "engine"),
            Err(e) => {
                tracing::warn!("Engine defaults unavailable, using built-in defaults: {}", e);
                (DdaParameters::default(), "built-in")
            }
        };

        match target {
            DefaultsTarget::NewProject(dir) => match ProjectSession::new_in_dir(&dir, parameters) {
                Ok(session) => {
                    self.replace_session(session);
                    self.status_text = format!(
                        "Created project in {} ({} defaults)",
                        dir.display(),
                        source
                    );
                }
                Err(e) => self.show_error(e.to_string()),
            },
            DefaultsTarget::Reset => match self.session.set_parameters(parameters) {
                Ok(()) => {
                    self.field_inputs.clear();
                    self.field_errors.clear();
                    self.status_text = format!("Parameters reset to {} defaults", source);
                }
                Err(e) => self.show_error(e.to_string()),
            },
        }
    }

    pub fn open_project(&self) -> Task<Message> {
        let start = self.start_directory();

        Task::perform(
            async move {
                let dialog = rfd::AsyncFileDialog::new()
                    .set_title("Open Project")
                    .add_filter("Project Files", &["json"])
                    .add_filter("All Files", &["*"]);
                let dialog = match start {
                    Some(dir) => dialog.set_directory(dir),
                    None => dialog,
                };
                dialog.pick_file().await.map(|f| f.path().to_path_buf())
            },
            Message::OpenProjectFileSelected,
        )
    }

    pub fn handle_open_project_file(&mut self, path: Option<PathBuf>) {
        let Some(path) = path else {
            return;
        };
        self.remember_directory(&path);

        match ProjectSession::open(&path) {
            Ok(session) => {
                self.replace_session(session);
                self.status_text = format!("Opened {}", path.display());
            }
            Err(e) => self.show_error(format!("Can't open project: {}", e)),
        }
    }

    /// Save the open project. Returns `false` and shows an error on failure.
    pub fn save_session(&mut self) -> bool {
        match self.session.save() {
            Ok(()) => {
                if let Some(path) = self.session.path() {
                    self.status_text = format!("Saved {}", path.display());
                }
                true
            }
            Err(e) => {
                self.show_error(e.to_string());
                false
            }
        }
    }

    pub fn save_project_as(&self) -> Task<Message> {
        let start = self.start_directory();

        Task::perform(
            async move {
                let dialog = rfd::AsyncFileDialog::new().set_title("Save Project In Directory");
                let dialog = match start {
                    Some(dir) => dialog.set_directory(dir),
                    None => dialog,
                };
                dialog.pick_folder().await.map(|f| f.path().to_path_buf())
            },
            Message::SaveAsDirSelected,
        )
    }

    pub fn handle_save_as_dir(&mut self, dir: Option<PathBuf>) {
        let Some(dir) = dir else {
            return;
        };
        self.remember_directory(&dir);

        match self.session.save_as_dir(&dir) {
            Ok(()) => self.status_text = format!("Saved project in {}", dir.display()),
            Err(e) => self.show_error(e.to_string()),
        }
    }

    pub fn reset_parameters(&mut self) -> Task<Message> {
        if !self.can_edit() {
            return Task::none();
        }
        self.load_defaults(DefaultsTarget::Reset)
    }

    pub fn handle_project_name_changed(&mut self, name: String) {
        if !self.can_edit() {
            return;
        }
        if let Err(e) = self.session.set_project_name(name) {
            self.show_error(e.to_string());
        }
    }

    pub fn handle_project_description_changed(&mut self, description: String) {
        if !self.can_edit() {
            return;
        }
        if let Err(e) = self.session.set_project_description(description) {
            self.show_error(e.to_string());
        }
    }

    pub fn handle_dark_mode_toggled(&mut self, enabled: bool) {
        self.config.settings_mut().ui.dark_mode = enabled;
        if let Err(e) = self.config.update_section(ConfigSection::Ui) {
            tracing::warn!("Failed to save appearance settings: {}", e);
        }
    }

    fn replace_session(&mut self, session: ProjectSession) {
        self.session = session;
        self.selected_files.clear();
        self.field_inputs.clear();
        self.field_errors.clear();
        self.edit_dialog = None;
    }
}
