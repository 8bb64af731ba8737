//! Loading and saving `pastaq_gui.toml`.
//!
//! The whole file is rendered with `toml_edit` so every table carries its
//! header comment. Section updates re-read the file from disk and replace
//! one table, leaving hand edits elsewhere alone. Every write goes through
//! a temp file and a rename.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml_edit::{DocumentMut, Item, Table};

use super::settings::{ConfigSection, Settings};

/// Failure to read, parse or write `pastaq_gui.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config file for editing: {0}")]
    Edit(#[from] toml_edit::TomlError),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

impl ConfigError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result of a [`ConfigManager`] operation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Owns the settings and the file they live in.
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
}

impl ConfigManager {
    /// Nothing is read until `load` or `load_or_create`.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Edits stay in memory until `save` or `update_section`.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Read an existing file.
    pub fn load(&mut self) -> ConfigResult<()> {
        let content = self.read()?.ok_or_else(|| ConfigError::NotFound(self.config_path.clone()))?;
        self.settings = toml::from_str(&content)?;
        Ok(())
    }

    /// Read the file, or write one with defaults when there is none.
    ///
    /// A file with unknown tables or missing keys is rewritten in full.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        let Some(content) = self.read()? else {
            self.settings = Settings::default();
            self.save()?;
            tracing::info!("Created default config at {}", self.config_path.display());
            return Ok(());
        };

        self.settings = toml::from_str(&content)?;
        let on_disk: DocumentMut = content.parse()?;
        if needs_rewrite(&on_disk, &self.settings)? {
            tracing::debug!("Normalizing config file {}", self.config_path.display());
            self.save()?;
        }
        Ok(())
    }

    pub fn logs_folder(&self) -> PathBuf {
        PathBuf::from(&self.settings.paths.logs_folder)
    }

    /// Remember the folder file pickers should open in next time.
    ///
    /// Returns `false` when it was already stored.
    pub fn remember_directory(&mut self, dir: &Path) -> ConfigResult<bool> {
        let value = dir.to_string_lossy();
        if self.settings.paths.last_directory == value {
            return Ok(false);
        }
        self.settings.paths.last_directory = value.into_owned();
        self.update_section(ConfigSection::Paths)?;
        Ok(true)
    }

    /// Write every section.
    pub fn save(&self) -> ConfigResult<()> {
        write_atomic(&self.config_path, &render(&self.settings)?)
    }

    /// Write one section, keeping the rest of the file as it is on disk.
    pub fn update_section(&mut self, section: ConfigSection) -> ConfigResult<()> {
        let mut doc: DocumentMut = match self.read()? {
            Some(content) => content.parse()?,
            None => DocumentMut::new(),
        };

        doc[section.table_name()] = Item::Table(section_table(&self.settings, section)?);
        write_atomic(&self.config_path, &doc.to_string())?;
        tracing::debug!("Updated config section [{}]", section.table_name());
        Ok(())
    }

    fn read(&self) -> ConfigResult<Option<String>> {
        match fs::read_to_string(&self.config_path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::io(&self.config_path, e)),
        }
    }
}

/// One section as a commented table.
fn section_table(settings: &Settings, section: ConfigSection) -> ConfigResult<Table> {
    let body = section.to_toml(settings)?;
    let mut table = body.parse::<DocumentMut>()?.as_table().clone();
    table.set_implicit(false);
    table
        .decor_mut()
        .set_prefix(format!("\n{}\n", section.header_comment()));
    Ok(table)
}

/// The full file.
fn render(settings: &Settings) -> ConfigResult<String> {
    let mut doc = DocumentMut::new();
    for section in ConfigSection::ALL {
        doc.insert(section.table_name(), Item::Table(section_table(settings, section)?));
    }
    Ok(format!("# PASTAQ GUI configuration\n{}", doc))
}

/// Unknown tables, or keys that only exist because defaults filled them in.
fn needs_rewrite(on_disk: &DocumentMut, settings: &Settings) -> ConfigResult<bool> {
    let known = ConfigSection::ALL.map(|s| s.table_name());
    if on_disk.iter().any(|(name, _)| !known.contains(&name)) {
        return Ok(true);
    }

    for section in ConfigSection::ALL {
        let expected = section_table(settings, section)?;
        let present = on_disk
            .get(section.table_name())
            .and_then(Item::as_table)
            .map(|t| t.len())
            .unwrap_or(0);
        if present < expected.len() {
            return Ok(true);
        }
    }
    Ok(false)
}

fn write_atomic(path: &Path, content: &str) -> ConfigResult<()> {
    let temp_path = path.with_extension("toml.tmp");
    let write = || -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    };
    write().map_err(|e| ConfigError::io(path, e))
}
