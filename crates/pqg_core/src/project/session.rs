//! The open project and its unsaved-changes state.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::identification::{assign_identifications, is_raw_file};
use crate::parameters::{DdaParameters, FieldValue};

use super::errors::{ProjectError, ProjectResult};
use super::file::{InputFile, ProjectFile};

/// File name used for projects created in a directory.
pub const PROJECT_FILE_NAME: &str = "parameters.json";

/// Project state owned by the UI.
///
/// Every mutation marks the session dirty and a successful save clears it.
#[derive(Debug, Clone, Default)]
pub struct ProjectSession {
    path: Option<PathBuf>,
    project: ProjectFile,
    dirty: bool,
}

impl ProjectSession {
    /// Create `<dir>/parameters.json` with the given parameters and open it.
    pub fn new_in_dir(dir: &Path, parameters: DdaParameters) -> ProjectResult<Self> {
        let path = dir.join(PROJECT_FILE_NAME);
        let project = ProjectFile::with_parameters(parameters);

        if !dir.is_dir() {
            return Err(ProjectError::CannotSave {
                dir: dir.to_path_buf(),
            });
        }
        project.save(&path).map_err(|e| {
            tracing::warn!("Creating project in {} failed: {}", dir.display(), e);
            ProjectError::CannotSave {
                dir: dir.to_path_buf(),
            }
        })?;

        tracing::info!("Created project {}", path.display());
        Ok(Self {
            path: Some(path),
            project,
            dirty: false,
        })
    }

    /// Open an existing project file.
    pub fn open(path: &Path) -> ProjectResult<Self> {
        let project = ProjectFile::load(path)?;
        tracing::info!(
            "Opened project {} ({} input files)",
            path.display(),
            project.input_files.len()
        );
        Ok(Self {
            path: Some(path.to_path_buf()),
            project,
            dirty: false,
        })
    }

    pub fn is_open(&self) -> bool {
        self.path.is_some()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Directory the pipeline writes its results to.
    pub fn output_dir(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }

    pub fn project(&self) -> &ProjectFile {
        &self.project
    }

    pub fn parameters(&self) -> &DdaParameters {
        &self.project.parameters
    }

    pub fn input_files(&self) -> &[InputFile] {
        &self.project.input_files
    }

    /// Write the project to its current path.
    pub fn save(&mut self) -> ProjectResult<()> {
        let path = self.path.as_deref().ok_or(ProjectError::NoProjectOpen)?;
        self.project.save(path)?;
        self.dirty = false;
        tracing::debug!("Saved project {}", path.display());
        Ok(())
    }

    /// Save to `<dir>/parameters.json` and continue from there.
    pub fn save_as_dir(&mut self, dir: &Path) -> ProjectResult<()> {
        self.require_open()?;
        let path = dir.join(PROJECT_FILE_NAME);
        if !dir.is_dir() {
            return Err(ProjectError::CannotSave {
                dir: dir.to_path_buf(),
            });
        }
        self.project.save(&path).map_err(|_| ProjectError::CannotSave {
            dir: dir.to_path_buf(),
        })?;
        self.path = Some(path);
        self.dirty = false;
        Ok(())
    }

    /// Replace all parameters, keeping input files and project details.
    pub fn set_parameters(&mut self, parameters: DdaParameters) -> ProjectResult<()> {
        self.require_open()?;
        self.project.parameters = parameters;
        self.dirty = true;
        Ok(())
    }

    /// Restore default parameters.
    pub fn reset_parameters(&mut self) -> ProjectResult<()> {
        self.set_parameters(DdaParameters::default())
    }

    /// Write one editor value into the parameters.
    pub fn set_field(&mut self, key: &str, value: FieldValue) -> ProjectResult<()> {
        self.require_open()?;
        self.project.parameters.set_field(key, value)?;
        self.dirty = true;
        Ok(())
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) -> ProjectResult<()> {
        self.require_open()?;
        self.project.project_name = name.into();
        self.dirty = true;
        Ok(())
    }

    pub fn set_project_description(&mut self, description: impl Into<String>) -> ProjectResult<()> {
        self.require_open()?;
        self.project.project_description = description.into();
        self.dirty = true;
        Ok(())
    }

    /// Append raw data files. Other extensions and paths already listed
    /// are skipped. Returns how many were added.
    pub fn add_raw_files<I>(&mut self, paths: I) -> ProjectResult<usize>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.require_open()?;
        let mut known: HashSet<PathBuf> = self
            .project
            .input_files
            .iter()
            .map(|f| f.raw_path.clone())
            .collect();

        let mut added = 0;
        for path in paths {
            if !is_raw_file(&path) {
                tracing::debug!("Skipping non raw file {}", path.display());
                continue;
            }
            if !known.insert(path.clone()) {
                continue;
            }
            self.project.input_files.push(InputFile::new(path));
            added += 1;
        }

        if added > 0 {
            self.dirty = true;
        }
        Ok(added)
    }

    /// Remove the entries at `indices`. Out of range indices are ignored.
    pub fn remove_files(&mut self, indices: &[usize]) -> ProjectResult<usize> {
        self.require_open()?;
        let before = self.project.input_files.len();
        let mut position = 0;
        self.project.input_files.retain(|_| {
            let keep = !indices.contains(&position);
            position += 1;
            keep
        });

        let removed = before - self.project.input_files.len();
        if removed > 0 {
            self.dirty = true;
        }
        Ok(removed)
    }

    pub fn remove_all_files(&mut self) -> ProjectResult<usize> {
        self.require_open()?;
        let removed = self.project.input_files.len();
        self.project.input_files.clear();
        if removed > 0 {
            self.dirty = true;
        }
        Ok(removed)
    }

    pub fn set_reference(&mut self, index: usize, reference: bool) -> ProjectResult<()> {
        self.require_open()?;
        let file = self
            .project
            .input_files
            .get_mut(index)
            .ok_or(ProjectError::NoSuchFile(index))?;
        file.reference = reference;
        self.dirty = true;
        Ok(())
    }

    /// Set the group of the selected entries and attach identification
    /// files to them. Returns how many identifications were attached.
    ///
    /// An empty group clears it. With no candidates only the group changes.
    pub fn edit_files(
        &mut self,
        indices: &[usize],
        group: &str,
        candidates: &[PathBuf],
    ) -> ProjectResult<usize> {
        self.require_open()?;
        if let Some(&bad) = indices
            .iter()
            .find(|&&i| i >= self.project.input_files.len())
        {
            return Err(ProjectError::NoSuchFile(bad));
        }

        let group = group.trim();
        let mut selected: Vec<&mut InputFile> = self
            .project
            .input_files
            .iter_mut()
            .enumerate()
            .filter(|(i, _)| indices.contains(i))
            .map(|(_, f)| f)
            .collect();

        for file in selected.iter_mut() {
            file.group = if group.is_empty() {
                None
            } else {
                Some(group.to_string())
            };
        }

        let assigned = if candidates.is_empty() {
            0
        } else {
            assign_identifications(&mut selected, candidates)
        };

        if !selected.is_empty() {
            self.dirty = true;
        }
        Ok(assigned)
    }

    fn require_open(&self) -> ProjectResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(ProjectError::NoProjectOpen)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::InstrumentType;
    use tempfile::tempdir;

    fn open_session() -> (tempfile::TempDir, ProjectSession) {
        let dir = tempdir().unwrap();
        let session = ProjectSession::new_in_dir(dir.path(), DdaParameters::default()).unwrap();
        (dir, session)
    }

    #[test]
    fn new_project_is_written_and_clean() {
        let (dir, session) = open_session();

        assert!(session.is_open());
        assert!(!session.is_dirty());
        assert!(dir.path().join(PROJECT_FILE_NAME).exists());
        assert_eq!(session.output_dir(), Some(dir.path()));
    }

    #[test]
    fn new_project_in_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let err = ProjectSession::new_in_dir(&dir.path().join("nope"), DdaParameters::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Can't save project at the given directory");
    }

    #[test]
    fn closed_session_rejects_edits() {
        let mut session = ProjectSession::default();
        assert!(!session.is_open());
        assert!(matches!(session.save(), Err(ProjectError::NoProjectOpen)));
        assert!(matches!(
            session.add_raw_files(vec![PathBuf::from("a.mzML")]),
            Err(ProjectError::NoProjectOpen)
        ));
    }

    #[test]
    fn edits_mark_dirty_and_save_clears() {
        let (_dir, mut session) = open_session();

        session
            .set_field("warp2d_slack", FieldValue::Integer(12))
            .unwrap();
        assert!(session.is_dirty());

        session.save().unwrap();
        assert!(!session.is_dirty());

        let reopened = ProjectSession::open(session.path().unwrap()).unwrap();
        assert_eq!(reopened.parameters().warp2d_slack, 12);
    }

    #[test]
    fn rejected_field_leaves_session_clean() {
        let (_dir, mut session) = open_session();
        assert!(session
            .set_field("qc_plot_dpi", FieldValue::Integer(0))
            .is_err());
        assert!(!session.is_dirty());
    }

    #[test]
    fn add_raw_files_filters_and_dedups() {
        let (_dir, mut session) = open_session();

        let added = session
            .add_raw_files(vec![
                PathBuf::from("/data/a.mzXML"),
                PathBuf::from("/data/b.MZML"),
                PathBuf::from("/data/notes.txt"),
                PathBuf::from("/data/a.mzXML"),
            ])
            .unwrap();
        assert_eq!(added, 2);

        let again = session
            .add_raw_files(vec![PathBuf::from("/data/b.MZML")])
            .unwrap();
        assert_eq!(again, 0);
        assert_eq!(session.input_files().len(), 2);
        assert!(session.input_files().iter().all(|f| !f.reference));
    }

    #[test]
    fn remove_files_by_index() {
        let (_dir, mut session) = open_session();
        session
            .add_raw_files((0..4).map(|i| PathBuf::from(format!("/d/{}.mzML", i))))
            .unwrap();

        assert_eq!(session.remove_files(&[0, 2, 9]).unwrap(), 2);
        let remaining: Vec<_> = session
            .input_files()
            .iter()
            .map(|f| f.raw_path.clone())
            .collect();
        assert_eq!(remaining, vec![PathBuf::from("/d/1.mzML"), PathBuf::from("/d/3.mzML")]);

        assert_eq!(session.remove_all_files().unwrap(), 2);
        assert!(session.input_files().is_empty());
    }

    #[test]
    fn edit_files_sets_group_and_pairs_by_stem() {
        let (_dir, mut session) = open_session();
        session
            .add_raw_files(vec![
                PathBuf::from("/d/a.mzML"),
                PathBuf::from("/d/b.mzML"),
                PathBuf::from("/d/c.mzML"),
            ])
            .unwrap();

        let assigned = session
            .edit_files(
                &[0, 1],
                " treated ",
                &[PathBuf::from("/i/b.mzID"), PathBuf::from("/i/a.mgf")],
            )
            .unwrap();

        assert_eq!(assigned, 2);
        let files = session.input_files();
        assert_eq!(files[0].group.as_deref(), Some("treated"));
        assert_eq!(files[0].ident_path, Some(PathBuf::from("/i/a.mgf")));
        assert_eq!(files[1].ident_path, Some(PathBuf::from("/i/b.mzID")));
        assert_eq!(files[2].group, None);
        assert_eq!(files[2].ident_path, None);
    }

    #[test]
    fn edit_single_file_pairs_unconditionally() {
        let (_dir, mut session) = open_session();
        session
            .add_raw_files(vec![PathBuf::from("/d/a.mzML"), PathBuf::from("/d/b.mzML")])
            .unwrap();

        session
            .edit_files(&[1], "", &[PathBuf::from("/i/whatever.mzID")])
            .unwrap();

        assert_eq!(
            session.input_files()[1].ident_path,
            Some(PathBuf::from("/i/whatever.mzID"))
        );
        assert!(matches!(
            session.edit_files(&[5], "", &[]),
            Err(ProjectError::NoSuchFile(5))
        ));
    }

    #[test]
    fn reset_keeps_files_and_details() {
        let (_dir, mut session) = open_session();
        session.add_raw_files(vec![PathBuf::from("/d/a.mzML")]).unwrap();
        session.set_project_name("Run 7").unwrap();
        session
            .set_parameters(DdaParameters::defaults(InstrumentType::FtIcr, 3.0))
            .unwrap();

        session.reset_parameters().unwrap();

        assert_eq!(session.parameters(), &DdaParameters::default());
        assert_eq!(session.input_files().len(), 1);
        assert_eq!(session.project().project_name, "Run 7");
    }

    #[test]
    fn save_as_moves_project() {
        let (_dir, mut session) = open_session();
        let other = tempdir().unwrap();
        session.set_reference(0, true).unwrap_err();
        session.add_raw_files(vec![PathBuf::from("/d/a.mzML")]).unwrap();
        session.set_reference(0, true).unwrap();

        session.save_as_dir(other.path()).unwrap();

        assert_eq!(session.output_dir(), Some(other.path()));
        assert!(!session.is_dirty());
        let reopened = ProjectSession::open(&other.path().join(PROJECT_FILE_NAME)).unwrap();
        assert!(reopened.input_files()[0].reference);
    }
}
