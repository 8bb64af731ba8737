//! Application state and message routing.
//!
//! Update logic lives in the `handlers` modules as `impl App` blocks and
//! views live in `pages`.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use iced::{event, window, Element, Event, Subscription, Task, Theme};

use pqg_core::config::ConfigManager;
use pqg_core::engine::{PipelineEngine, PythonEngine};
use pqg_core::identification::{CommandRunner, SystemCommandRunner, ToolKind, ToolPaths};
use pqg_core::orchestrator::{PipelineEvent, RunHandle, RunOutcome};
use pqg_core::parameters::DdaParameters;
use pqg_core::project::ProjectSession;

use crate::pages;

/// Main window tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    InputFiles,
    Parameters,
    Paths,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::InputFiles, Tab::Parameters, Tab::Paths];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::InputFiles => "Input Files",
            Tab::Parameters => "Parameters",
            Tab::Paths => "Paths",
        }
    }
}

/// Modal shown on top of everything else.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Error(String),
    ClosePrompt,
}

/// What freshly loaded default parameters are for.
#[derive(Debug, Clone)]
pub enum DefaultsTarget {
    NewProject(PathBuf),
    Reset,
}

/// State of the edit files panel.
#[derive(Debug, Clone, Default)]
pub struct EditFilesState {
    pub indices: Vec<usize>,
    pub group: String,
    pub candidates: Vec<PathBuf>,
}

/// State of the run panel for the current or last run.
#[derive(Debug)]
pub struct RunPanel {
    pub log: String,
    pub step: String,
    pub status: String,
    pub progress: f32,
    pub handle: Option<RunHandle>,
    pub outcome: Option<RunOutcome>,
    pub cancel_requested: bool,
    /// Panel closed while the run continues; the status bar can reopen it.
    pub hidden: bool,
}

impl RunPanel {
    pub fn new(handle: RunHandle) -> Self {
        let mut panel = Self {
            log: String::new(),
            step: String::new(),
            status: "Starting...".to_string(),
            progress: 0.0,
            handle: Some(handle),
            outcome: None,
            cancel_requested: false,
            hidden: false,
        };
        panel.append_log(&format!(
            "Run started {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        panel
    }

    pub fn append_log(&mut self, line: &str) {
        self.log.push_str(line);
        self.log.push('\n');
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Record the outcome and return the summary line.
    ///
    /// A hidden panel is shown again so the result is seen.
    pub fn finish(&mut self, outcome: RunOutcome) -> String {
        if let Some(handle) = self.handle.take() {
            handle.join();
        }
        let summary = match &outcome {
            RunOutcome::Succeeded => "DDA pipeline finished".to_string(),
            RunOutcome::Failed(message) => format!("DDA pipeline failed: {}", message),
            RunOutcome::Cancelled => "DDA pipeline cancelled".to_string(),
        };
        self.append_log(&summary);
        self.status = summary.clone();
        if outcome == RunOutcome::Succeeded {
            self.progress = 100.0;
        }
        self.outcome = Some(outcome);
        self.hidden = false;
        summary
    }
}

/// All possible messages the application can receive.
#[derive(Debug, Clone)]
pub enum Message {
    // Project
    NewProject,
    NewProjectDirSelected(Option<PathBuf>),
    DefaultsLoaded(DefaultsTarget, Result<DdaParameters, String>),
    OpenProject,
    OpenProjectFileSelected(Option<PathBuf>),
    SaveProject,
    SaveProjectAs,
    SaveAsDirSelected(Option<PathBuf>),
    ResetParameters,
    ProjectNameChanged(String),
    ProjectDescriptionChanged(String),
    DarkModeToggled(bool),
    TabSelected(Tab),

    // Input files
    AddFiles,
    RawFilesSelected(Option<Vec<PathBuf>>),
    FileDropped(PathBuf),
    FileSelectionToggled(usize, bool),
    ReferenceToggled(usize, bool),
    RemoveFiles,
    RemoveAllFiles,
    EditFiles,
    EditGroupChanged(String),
    BrowseIdentifications,
    IdentificationsSelected(Option<Vec<PathBuf>>),
    EditConfirmed,
    EditCancelled,

    // Parameters
    FieldTextChanged(&'static str, String),
    FieldToggled(&'static str, bool),
    FieldChoiceSelected(&'static str, String),

    // Paths
    BrowseTool(ToolKind),
    ToolSelected(ToolKind, Option<PathBuf>),
    ToolPathChanged(ToolKind, String),
    ConfirmTool(ToolKind),

    // Run
    RunPipeline,
    Pipeline(PipelineEvent),
    CancelRun,
    HideRunPanel,
    ShowRunPanel,
    CloseRunPanel,

    // Window
    CloseRequested(window::Id),
    SaveAndExit,
    DiscardAndExit,
    CancelExit,
    DismissError,
    Noop,
}

/// Main application state.
pub struct App {
    pub config: ConfigManager,
    pub session: ProjectSession,
    pub tools: ToolPaths,
    pub tool_inputs: HashMap<ToolKind, String>,
    pub engine: Arc<dyn PipelineEngine>,
    pub runner: Arc<dyn CommandRunner>,

    pub tab: Tab,
    pub selected_files: BTreeSet<usize>,
    /// Editor text for numeric fields, kept while it does not parse.
    pub field_inputs: HashMap<&'static str, String>,
    pub field_errors: HashMap<&'static str, String>,
    pub loading_defaults: bool,

    pub edit_dialog: Option<EditFilesState>,
    pub run: Option<RunPanel>,
    pub modal: Option<Modal>,
    pub status_text: String,
}

impl App {
    pub fn new(config: ConfigManager) -> (Self, Task<Message>) {
        let settings = config.settings();
        let tools = ToolPaths::from_settings(&settings.paths);
        let tool_inputs = ToolKind::ALL
            .into_iter()
            .map(|kind| (kind, tools.get(kind).path.to_string_lossy().into_owned()))
            .collect();
        let engine: Arc<dyn PipelineEngine> =
            Arc::new(PythonEngine::new(settings.tools.python.clone()));

        tracing::debug!("Using engine {}", engine.name());

        let app = Self {
            config,
            session: ProjectSession::default(),
            tools,
            tool_inputs,
            engine,
            runner: Arc::new(SystemCommandRunner),
            tab: Tab::default(),
            selected_files: BTreeSet::new(),
            field_inputs: HashMap::new(),
            field_errors: HashMap::new(),
            loading_defaults: false,
            edit_dialog: None,
            run: None,
            modal: None,
            status_text: "Create or open a project to begin.".to_string(),
        };

        (app, Task::none())
    }

    pub fn title(&self) -> String {
        match self.session.path() {
            Some(path) if self.session.is_dirty() => format!("PASTAQ - {} *", path.display()),
            Some(path) => format!("PASTAQ - {}", path.display()),
            None => "PASTAQ".to_string(),
        }
    }

    pub fn theme(&self) -> Theme {
        if self.config.settings().ui.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            window::close_requests().map(Message::CloseRequested),
            event::listen_with(|event, _status, _id| match event {
                Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
                _ => None,
            }),
        ])
    }

    pub fn view(&self) -> Element<Message> {
        pages::main_window::view(self)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::NewProject => self.new_project(),
            Message::NewProjectDirSelected(dir) => self.handle_new_project_dir(dir),
            Message::DefaultsLoaded(target, result) => {
                self.handle_defaults_loaded(target, result);
                Task::none()
            }
            Message::OpenProject => self.open_project(),
            Message::OpenProjectFileSelected(path) => {
                self.handle_open_project_file(path);
                Task::none()
            }
            Message::SaveProject => {
                self.save_session();
                Task::none()
            }
            Message::SaveProjectAs => self.save_project_as(),
            Message::SaveAsDirSelected(dir) => {
                self.handle_save_as_dir(dir);
                Task::none()
            }
            Message::ResetParameters => self.reset_parameters(),
            Message::ProjectNameChanged(name) => {
                self.handle_project_name_changed(name);
                Task::none()
            }
            Message::ProjectDescriptionChanged(description) => {
                self.handle_project_description_changed(description);
                Task::none()
            }
            Message::DarkModeToggled(enabled) => {
                self.handle_dark_mode_toggled(enabled);
                Task::none()
            }
            Message::TabSelected(tab) => {
                self.tab = tab;
                Task::none()
            }

            Message::AddFiles => self.add_files(),
            Message::RawFilesSelected(paths) => {
                self.handle_raw_files_selected(paths);
                Task::none()
            }
            Message::FileDropped(path) => {
                self.handle_file_dropped(path);
                Task::none()
            }
            Message::FileSelectionToggled(index, selected) => {
                self.handle_file_selection_toggled(index, selected);
                Task::none()
            }
            Message::ReferenceToggled(index, reference) => {
                self.handle_reference_toggled(index, reference);
                Task::none()
            }
            Message::RemoveFiles => {
                self.remove_selected_files();
                Task::none()
            }
            Message::RemoveAllFiles => {
                self.remove_all_files();
                Task::none()
            }
            Message::EditFiles => {
                self.open_edit_dialog();
                Task::none()
            }
            Message::EditGroupChanged(group) => {
                if let Some(dialog) = self.edit_dialog.as_mut() {
                    dialog.group = group;
                }
                Task::none()
            }
            Message::BrowseIdentifications => self.browse_identifications(),
            Message::IdentificationsSelected(paths) => {
                self.handle_identifications_selected(paths);
                Task::none()
            }
            Message::EditConfirmed => {
                self.confirm_edit_dialog();
                Task::none()
            }
            Message::EditCancelled => {
                self.edit_dialog = None;
                Task::none()
            }

            Message::FieldTextChanged(key, text) => {
                self.handle_field_text_changed(key, text);
                Task::none()
            }
            Message::FieldToggled(key, value) => {
                self.handle_field_toggled(key, value);
                Task::none()
            }
            Message::FieldChoiceSelected(key, value) => {
                self.handle_field_choice_selected(key, value);
                Task::none()
            }

            Message::BrowseTool(kind) => self.browse_tool(kind),
            Message::ToolSelected(kind, path) => {
                self.handle_tool_selected(kind, path);
                Task::none()
            }
            Message::ToolPathChanged(kind, text) => {
                self.handle_tool_path_changed(kind, text);
                Task::none()
            }
            Message::ConfirmTool(kind) => {
                self.confirm_tool(kind);
                Task::none()
            }

            Message::RunPipeline => self.run_pipeline(),
            Message::Pipeline(event) => {
                self.handle_pipeline_event(event);
                Task::none()
            }
            Message::CancelRun => {
                self.cancel_run();
                Task::none()
            }
            Message::HideRunPanel => {
                self.set_run_panel_hidden(true);
                Task::none()
            }
            Message::ShowRunPanel => {
                self.set_run_panel_hidden(false);
                Task::none()
            }
            Message::CloseRunPanel => {
                self.close_run_panel();
                Task::none()
            }

            Message::CloseRequested(id) => self.handle_close_requested(id),
            Message::SaveAndExit => self.save_and_exit(),
            Message::DiscardAndExit => self.exit(),
            Message::CancelExit | Message::DismissError => {
                self.modal = None;
                Task::none()
            }
            Message::Noop => Task::none(),
        }
    }

    /// A run is in progress and has not reported `Finished` yet.
    pub fn is_running(&self) -> bool {
        self.run.as_ref().is_some_and(|run| !run.is_finished())
    }

    /// Project editors and actions are enabled.
    pub fn can_edit(&self) -> bool {
        self.session.is_open() && !self.is_running()
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.status_text = message.clone();
        self.modal = Some(Modal::Error(message));
    }

    /// Directory file pickers start in.
    pub fn start_directory(&self) -> Option<PathBuf> {
        let last = &self.config.settings().paths.last_directory;
        if !last.is_empty() && Path::new(last).is_dir() {
            return Some(PathBuf::from(last));
        }
        self.session.output_dir().map(Path::to_path_buf)
    }

    /// Store the directory of a picked path for the next picker.
    pub fn remember_directory(&mut self, path: &Path) {
        let dir = if path.is_dir() {
            path
        } else {
            match path.parent() {
                Some(parent) => parent,
                None => return,
            }
        };

        if let Err(e) = self.config.remember_directory(dir) {
            tracing::warn!("Failed to save last directory: {}", e);
        }
    }
}
