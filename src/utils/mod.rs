use std::io;
use std::path::Path;

use url::Url;

use crate::domain::FilenameError;

/// Extract the target filename from a URL's path component.
///
/// The final path segment is taken (query string and fragment are ignored)
/// and percent-decoded as the last step. Fails when the URL has no path or
/// the path points to a directory.
pub fn extract_filename_from_url(url: &str) -> Result<String, FilenameError> {
    let parsed = Url::parse(url).map_err(|_| FilenameError::NoPathInUrl {
        url: url.to_string(),
    })?;

    // Url::parse normalizes an absent path to "/", so empty-vs-root has to
    // be told apart from the raw text.
    if !has_explicit_path(url) {
        return Err(FilenameError::NoPathInUrl {
            url: url.to_string(),
        });
    }

    let path = parsed.path();
    if path.is_empty() {
        return Err(FilenameError::NoPathInUrl {
            url: url.to_string(),
        });
    }
    if path.ends_with('/') {
        return Err(FilenameError::DirectoryPath {
            url: url.to_string(),
        });
    }

    // Path does not end in a separator, so the last segment is non-empty.
    let segment = path.rsplit('/').next().unwrap_or(path);

    // Decode after extraction; invalid UTF-8 falls back to replacement
    // characters, matching lenient percent-decoding.
    let decoded = String::from_utf8_lossy(&urlencoding::decode_binary(segment.as_bytes())).into_owned();

    Ok(decoded)
}

/// True when the URL text carries a path of its own (a `/` after the
/// authority, with query and fragment stripped).
fn has_explicit_path(url: &str) -> bool {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let base = &url[..end];
    match base.find("://") {
        Some(idx) => base[idx + 3..].contains('/'),
        // No authority separator: the whole remainder is the path.
        None => true,
    }
}

/// Ensure that a directory exists, creating it and its parents if necessary.
///
/// Returns true if the directory exists after the call.
pub fn ensure_directory(path: &Path) -> io::Result<bool> {
    std::fs::create_dir_all(path)?;
    Ok(path.is_dir())
}

/// Clear a directory by removing and recreating it.
///
/// Returns false if the directory does not exist. When it exists, its
/// contents are wiped and the directory recreated only if `recreate` is
/// true; otherwise the call reports existence without touching anything.
pub fn clear_directory(path: &Path, recreate: bool) -> io::Result<bool> {
    if !path.is_dir() {
        return Ok(false);
    }
    if recreate {
        std::fs::remove_dir_all(path)?;
        std::fs::create_dir_all(path)?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_filename() {
        let name = extract_filename_from_url("https://example.com/documents/report.pdf").unwrap();
        assert_eq!(name, "report.pdf");
    }

    #[test]
    fn test_extract_ignores_query_and_fragment() {
        assert_eq!(
            extract_filename_from_url("https://example.com/a/b/report.PDF?x=1").unwrap(),
            "report.PDF"
        );
        assert_eq!(
            extract_filename_from_url("https://example.com/file.pdf#section").unwrap(),
            "file.pdf"
        );
        assert_eq!(
            extract_filename_from_url("https://example.com/file.pdf?v=1#section").unwrap(),
            "file.pdf"
        );
    }

    #[test]
    fn test_extract_percent_decodes_last() {
        assert_eq!(
            extract_filename_from_url("https://example.com/files/my%20doc.pdf").unwrap(),
            "my doc.pdf"
        );
        assert_eq!(
            extract_filename_from_url("https://example.com/files/my%20document").unwrap(),
            "my document"
        );
    }

    #[test]
    fn test_extract_no_extension() {
        assert_eq!(
            extract_filename_from_url("https://example.com/files/README").unwrap(),
            "README"
        );
    }

    #[test]
    fn test_extract_multi_dot_names() {
        assert_eq!(
            extract_filename_from_url("https://example.com/file.tar.gz").unwrap(),
            "file.tar.gz"
        );
        assert_eq!(
            extract_filename_from_url("https://example.com/file.backup.2024.zip").unwrap(),
            "file.backup.2024.zip"
        );
    }

    #[test]
    fn test_no_path_in_url() {
        let err = extract_filename_from_url("https://example.com").unwrap_err();
        assert!(matches!(err, FilenameError::NoPathInUrl { .. }));

        // A path before the query still resolves.
        let name = extract_filename_from_url("https://api.example.com/data?id=123");
        assert_eq!(name.unwrap(), "data");
    }

    #[test]
    fn test_no_path_with_query_only() {
        let err = extract_filename_from_url("https://example.com?x=1").unwrap_err();
        assert!(matches!(err, FilenameError::NoPathInUrl { .. }));
    }

    #[test]
    fn test_directory_path() {
        let err = extract_filename_from_url("https://example.com/files/").unwrap_err();
        assert!(matches!(err, FilenameError::DirectoryPath { .. }));

        let err = extract_filename_from_url("https://example.com/").unwrap_err();
        assert!(matches!(err, FilenameError::DirectoryPath { .. }));
    }

    #[test]
    fn test_unparseable_url_reports_no_path() {
        let err = extract_filename_from_url("not a url").unwrap_err();
        assert!(matches!(err, FilenameError::NoPathInUrl { .. }));
    }

    #[test]
    fn test_ensure_directory_creates_parents() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("downloads").join("nested").join("dir");
        assert!(!nested.exists());

        assert!(ensure_directory(&nested).unwrap());
        assert!(nested.is_dir());

        // Idempotent on an existing directory.
        assert!(ensure_directory(&nested).unwrap());
    }

    #[test]
    fn test_clear_directory_absent() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing");

        assert!(!clear_directory(&missing, false).unwrap());
        assert!(!clear_directory(&missing, true).unwrap());
        assert!(!missing.exists());
    }

    #[test]
    fn test_clear_directory_recreate() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("data");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("stale.txt"), b"old").unwrap();

        // recreate=false leaves contents alone
        assert!(clear_directory(&dir, false).unwrap());
        assert!(dir.join("stale.txt").exists());

        // recreate=true wipes and recreates
        assert!(clear_directory(&dir, true).unwrap());
        assert!(dir.is_dir());
        assert!(!dir.join("stale.txt").exists());
    }
}
