//! Helper functions for handler modules.

use std::path::Path;

use percent_encoding::percent_decode_str;

/// Clean up a file URL (from drag-drop or paste) to a regular path.
pub fn clean_file_url(url: &str) -> String {
    let first_uri = url
        .lines()
        .map(|line| line.trim())
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .unwrap_or("");

    let path = match first_uri.strip_prefix("file://") {
        Some(without_prefix) => percent_decode_str(without_prefix)
            .decode_utf8_lossy()
            .into_owned(),
        None => first_uri.to_string(),
    };

    path.trim().to_string()
}

/// File name for table cells, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_path_is_unchanged() {
        assert_eq!(clean_file_url("/data/run1.mzML"), "/data/run1.mzML");
    }

    #[test]
    fn file_url_is_decoded() {
        assert_eq!(
            clean_file_url("file:///data/my%20runs/run1.mzML\r\n"),
            "/data/my runs/run1.mzML"
        );
    }

    #[test]
    fn uri_list_takes_first_entry() {
        let list = "# comment\nfile:///a/first.mgf\nfile:///a/second.mgf\n";
        assert_eq!(clean_file_url(list), "/a/first.mgf");
    }

    #[test]
    fn multibyte_escapes_decode_as_utf8() {
        assert_eq!(clean_file_url("file:///d/%C3%A9chantillon.mzML"), "/d/échantillon.mzML");
    }

    #[test]
    fn invalid_escape_is_kept() {
        assert_eq!(clean_file_url("file:///d/100%zz.mzML"), "/d/100%zz.mzML");
        assert_eq!(clean_file_url("file:///d/end%2"), "/d/end%2");
    }

    #[test]
    fn display_name_uses_file_name() {
        assert_eq!(display_name(Path::new("/data/run1.mzML")), "run1.mzML");
    }
}
