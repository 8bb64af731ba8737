//! On-disk project format.
//!
//! A project is one JSON object holding every parameter key at the top
//! level next to `input_files`. Files are read and written whole.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::parameters::DdaParameters;

use super::errors::{ProjectError, ProjectResult};

/// One raw data file of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFile {
    pub raw_path: PathBuf,

    /// Retention time alignment reference.
    #[serde(default)]
    pub reference: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ident_path: Option<PathBuf>,
}

impl InputFile {
    pub fn new(raw_path: impl Into<PathBuf>) -> Self {
        Self {
            raw_path: raw_path.into(),
            reference: false,
            group: None,
            ident_path: None,
        }
    }
}

/// Contents of a project file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_description: String,

    #[serde(flatten)]
    pub parameters: DdaParameters,

    #[serde(default)]
    pub input_files: Vec<InputFile>,
}

impl ProjectFile {
    pub fn with_parameters(parameters: DdaParameters) -> Self {
        Self {
            parameters,
            ..Self::default()
        }
    }

    /// Read a project file. Missing parameter keys take their defaults.
    pub fn load(path: &Path) -> ProjectResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ProjectError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| ProjectError::json(path, e))
    }

    /// Write the project file, replacing it atomically.
    pub fn save(&self, path: &Path) -> ProjectResult<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ProjectError::json(path, e))?;

        let temp_path = path.with_extension("json.tmp");
        let write = || -> std::io::Result<()> {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()?;
            fs::rename(&temp_path, path)
        };

        write().map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            ProjectError::io(path, e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::{ChargeStates, FillAlpha, InstrumentType};
    use tempfile::tempdir;

    fn sample_project() -> ProjectFile {
        let mut parameters = DdaParameters::defaults(InstrumentType::Tof, 6.0);
        parameters.feature_detection_charge_states = ChargeStates::from_range(2, 4).unwrap();
        parameters.qc_plot_fill_alpha = FillAlpha::Fixed(0.25);

        ProjectFile {
            project_name: "Yeast".to_string(),
            project_description: String::new(),
            parameters,
            input_files: vec![
                InputFile {
                    raw_path: PathBuf::from("/data/a.mzXML"),
                    reference: true,
                    group: Some("control".to_string()),
                    ident_path: Some(PathBuf::from("/data/a.mzID")),
                },
                InputFile::new("/data/b.mzML"),
            ],
        }
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("parameters.json");
        let project = sample_project();

        project.save(&path).unwrap();
        let loaded = ProjectFile::load(&path).unwrap();

        assert_eq!(loaded, project);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn parameters_are_top_level_keys() {
        let value = serde_json::to_value(sample_project()).unwrap();

        assert_eq!(value["instrument_type"], "tof");
        assert_eq!(value["feature_detection_charge_states"], serde_json::json!([4, 3, 2]));
        assert_eq!(value["input_files"][0]["reference"], true);
        assert!(value.get("project_description").is_none());
        assert!(value["input_files"][1].get("group").is_none());
        assert!(value["input_files"][1].get("ident_path").is_none());
    }

    #[test]
    fn partial_file_is_completed_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("old.json");
        fs::write(
            &path,
            r#"{
                "max_peaks": 1234,
                "qc_plot_fill_alpha": "dynamic",
                "some_retired_key": 5,
                "input_files": [{"raw_path": "/data/x.mzXML", "reference": false}]
            }"#,
        )
        .unwrap();

        let loaded = ProjectFile::load(&path).unwrap();

        assert_eq!(loaded.parameters.max_peaks, 1234);
        assert_eq!(loaded.parameters.warp2d_slack, DdaParameters::default().warp2d_slack);
        assert_eq!(loaded.input_files, vec![InputFile::new("/data/x.mzXML")]);
        assert_eq!(loaded.parameters.extra["some_retired_key"], 5);

        loaded.save(&path).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["some_retired_key"], 5);
        assert_eq!(raw["max_peaks"], 1234);
        assert!(raw.get("extra").is_none());
        assert_eq!(ProjectFile::load(&path).unwrap(), loaded);
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ProjectFile::load(&path).unwrap_err();
        assert!(matches!(err, ProjectError::Json { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
