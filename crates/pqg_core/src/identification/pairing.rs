//! Pairing of raw data files with identification files.

use std::path::{Path, PathBuf};

use crate::project::InputFile;

/// Extensions accepted in the identification picker.
pub const IDENTIFICATION_EXTENSIONS: &[&str] = &["mzid", "mzidentml", "mgf"];

/// Extensions accepted as raw data.
pub const RAW_EXTENSIONS: &[&str] = &["mzxml", "mzml"];

/// File name without its last extension.
pub fn file_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|s| s.to_str())
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| allowed.iter().any(|a| e.eq_ignore_ascii_case(a)))
        .unwrap_or(false)
}

/// Whether `path` can be attached as an identification file.
pub fn is_identification_file(path: &Path) -> bool {
    has_extension(path, IDENTIFICATION_EXTENSIONS)
}

/// Whether `path` is raw data the engine can read.
pub fn is_raw_file(path: &Path) -> bool {
    has_extension(path, RAW_EXTENSIONS)
}

/// Whether an identification file must be converted before a run.
pub fn needs_conversion(path: &Path) -> bool {
    has_extension(path, &["mgf"])
}

/// Attach identification files to the selected raw entries.
///
/// With exactly one entry and one candidate the candidate is attached
/// whatever its name. Otherwise each entry gets the first candidate whose
/// stem equals the stem of its raw file; entries without a match keep
/// their current identification. Returns the number of entries updated.
pub fn assign_identifications(entries: &mut [&mut InputFile], candidates: &[PathBuf]) -> usize {
    if entries.len() == 1 && candidates.len() == 1 {
        entries[0].ident_path = Some(candidates[0].clone());
        return 1;
    }

    let mut assigned = 0;
    for entry in entries.iter_mut() {
        let Some(stem) = file_stem(&entry.raw_path) else {
            continue;
        };
        if let Some(found) = candidates
            .iter()
            .find(|candidate| file_stem(candidate) == Some(stem))
        {
            entry.ident_path = Some(found.clone());
            assigned += 1;
        }
    }
    assigned
}
