//! External tool paths and their confirmation checks.

use std::path::{Path, PathBuf};

use crate::config::PathSettings;

use super::errors::{ToolPathError, ToolPathResult};

/// Which external path is being set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// MSFragger `.jar`.
    SearchEngine,
    /// ProteoWizard `idconvert` executable.
    Converter,
    /// MSFragger `.params` file.
    SearchParams,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [
        ToolKind::SearchEngine,
        ToolKind::Converter,
        ToolKind::SearchParams,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::SearchEngine => "MSFragger",
            ToolKind::Converter => "idconvert",
            ToolKind::SearchParams => "MSFragger parameters",
        }
    }

    /// Extension filter offered by the file picker.
    pub fn picker_extensions(&self) -> &'static [&'static str] {
        match self {
            ToolKind::SearchEngine => &["jar"],
            ToolKind::Converter if cfg!(windows) => &["exe"],
            ToolKind::Converter => &[],
            ToolKind::SearchParams => &["params"],
        }
    }

    /// Run the confirmation check for this kind.
    pub fn check(&self, path: &Path) -> ToolPathResult<()> {
        let ok = match self {
            ToolKind::SearchEngine => {
                path.is_file()
                    && path
                        .extension()
                        .map(|e| e.eq_ignore_ascii_case("jar"))
                        .unwrap_or(false)
            }
            ToolKind::Converter => is_executable(path),
            ToolKind::SearchParams => path.is_file(),
        };

        if ok {
            Ok(())
        } else {
            Err(self.error(path))
        }
    }

    fn error(&self, path: &Path) -> ToolPathError {
        let path = path.to_path_buf();
        match self {
            ToolKind::SearchEngine => ToolPathError::SearchEngine(path),
            ToolKind::Converter => ToolPathError::Converter(path),
            ToolKind::SearchParams => ToolPathError::SearchParams(path),
        }
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("exe"))
            .unwrap_or(false)
}

/// A path plus whether it passed its check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolPath {
    pub confirmed: bool,
    pub path: PathBuf,
}

impl ToolPath {
    /// Set and check a path. The path is kept even when the check fails.
    ///
    /// Relative paths are resolved against the working directory here, since
    /// the search engine later runs from the jar's directory.
    pub fn confirm(kind: ToolKind, path: impl Into<PathBuf>) -> (Self, ToolPathResult<()>) {
        let path = path.into();
        let path = std::path::absolute(&path).unwrap_or(path);
        let result = kind.check(&path);
        let tool = Self {
            confirmed: result.is_ok(),
            path,
        };
        (tool, result)
    }

    fn from_setting(kind: ToolKind, setting: &str) -> Self {
        if setting.is_empty() {
            return Self::default();
        }
        Self::confirm(kind, setting).0
    }
}

/// The three external paths needed to convert `.mgf` files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolPaths {
    pub search_engine: ToolPath,
    pub converter: ToolPath,
    pub search_params: ToolPath,
}

impl ToolPaths {
    /// Load the stored paths, re-checking each one.
    pub fn from_settings(settings: &PathSettings) -> Self {
        Self {
            search_engine: ToolPath::from_setting(ToolKind::SearchEngine, &settings.search_engine_jar),
            converter: ToolPath::from_setting(ToolKind::Converter, &settings.converter_exe),
            search_params: ToolPath::from_setting(ToolKind::SearchParams, &settings.search_params),
        }
    }

    /// Write confirmed paths back to the settings. Unconfirmed ones are left alone.
    pub fn store(&self, settings: &mut PathSettings) {
        for kind in ToolKind::ALL {
            let tool = self.get(kind);
            if !tool.confirmed {
                continue;
            }
            let value = tool.path.to_string_lossy().into_owned();
            match kind {
                ToolKind::SearchEngine => settings.search_engine_jar = value,
                ToolKind::Converter => settings.converter_exe = value,
                ToolKind::SearchParams => settings.search_params = value,
            }
        }
    }

    pub fn get(&self, kind: ToolKind) -> &ToolPath {
        match kind {
            ToolKind::SearchEngine => &self.search_engine,
            ToolKind::Converter => &self.converter,
            ToolKind::SearchParams => &self.search_params,
        }
    }

    /// Replace one path and check it.
    pub fn set(&mut self, kind: ToolKind, path: impl Into<PathBuf>) -> ToolPathResult<()> {
        let (tool, result) = ToolPath::confirm(kind, path);
        match kind {
            ToolKind::SearchEngine => self.search_engine = tool,
            ToolKind::Converter => self.converter = tool,
            ToolKind::SearchParams => self.search_params = tool,
        }
        result
    }

    /// Fail with the first unconfirmed path, in search engine, converter, params order.
    pub fn require_all(&self) -> ToolPathResult<()> {
        for kind in ToolKind::ALL {
            let tool = self.get(kind);
            if !tool.confirmed {
                return Err(kind.error(&tool.path));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn search_engine_must_be_existing_jar() {
        let dir = tempdir().unwrap();
        let jar = dir.path().join("MSFragger-3.4.jar");
        let txt = dir.path().join("readme.txt");
        fs::write(&jar, b"").unwrap();
        fs::write(&txt, b"").unwrap();

        assert!(ToolKind::SearchEngine.check(&jar).is_ok());
        assert_eq!(
            ToolKind::SearchEngine.check(&txt),
            Err(ToolPathError::SearchEngine(txt.clone()))
        );
        assert!(ToolKind::SearchEngine
            .check(&dir.path().join("missing.jar"))
            .is_err());
    }

    #[cfg(unix)]
    #[test]
    fn converter_must_be_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let exe = dir.path().join("idconvert");
        fs::write(&exe, b"#!/bin/sh\n").unwrap();
        assert!(ToolKind::Converter.check(&exe).is_err());

        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(ToolKind::Converter.check(&exe).is_ok());
        assert!(ToolKind::Converter.check(dir.path()).is_err());
    }

    #[test]
    fn failed_set_keeps_path_unconfirmed() {
        let mut tools = ToolPaths::default();
        let result = tools.set(ToolKind::SearchParams, "/does/not/exist.params");

        assert_eq!(result.unwrap_err().to_string(), ".params path is not valid");
        assert!(!tools.search_params.confirmed);
        assert_eq!(tools.search_params.path, PathBuf::from("/does/not/exist.params"));
    }

    #[test]
    fn relative_path_is_stored_absolute() {
        let (tool, _) = ToolPath::confirm(ToolKind::SearchParams, "closed.params");

        assert!(tool.path.is_absolute());
        assert_eq!(
            tool.path,
            std::env::current_dir().unwrap().join("closed.params")
        );
    }

    #[test]
    fn require_all_reports_first_missing() {
        let dir = tempdir().unwrap();
        let params = dir.path().join("closed.params");
        fs::write(&params, b"").unwrap();

        let mut tools = ToolPaths::default();
        tools.set(ToolKind::SearchParams, &params).unwrap();

        let err = tools.require_all().unwrap_err();
        assert_eq!(err.to_string(), "MSFragger path is not valid");
    }

    #[test]
    fn only_confirmed_paths_are_stored() {
        let dir = tempdir().unwrap();
        let jar = dir.path().join("fragger.jar");
        fs::write(&jar, b"").unwrap();

        let mut tools = ToolPaths::default();
        tools.set(ToolKind::SearchEngine, &jar).unwrap();
        let _ = tools.set(ToolKind::SearchParams, "/nope.params");

        let mut settings = PathSettings {
            search_params: "/kept.params".to_string(),
            ..PathSettings::default()
        };
        tools.store(&mut settings);

        assert_eq!(settings.search_engine_jar, jar.to_string_lossy());
        assert_eq!(settings.search_params, "/kept.params");

        let reloaded = ToolPaths::from_settings(&settings);
        assert!(reloaded.search_engine.confirmed);
        assert!(!reloaded.search_params.confirmed);
    }
}
