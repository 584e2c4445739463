use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{DownloadError, FilenameError};
use crate::utils::extract_filename_from_url;

/// A request to fetch one resource into the output directory.
///
/// The filename is resolved eagerly: construction fails when none is
/// supplied and none can be derived from the URL, so a request always
/// carries a non-empty filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadRequest {
    url: String,
    filename: String,
}

impl DownloadRequest {
    /// Build a request, deriving the filename from the URL when `filename`
    /// is `None`.
    ///
    /// An explicitly supplied filename is accepted as-is; its content is
    /// only checked by the dry-run preview, not here.
    pub fn new(url: impl Into<String>, filename: Option<String>) -> Result<Self, FilenameError> {
        let url = url.into();
        let filename = match filename {
            Some(name) => name,
            None => extract_filename_from_url(&url)?,
        };
        Ok(Self { url, filename })
    }

    /// Build a request whose filename is derived from the URL path.
    pub fn from_url(url: impl Into<String>) -> Result<Self, FilenameError> {
        Self::new(url, None)
    }

    /// Build a request with an explicit target filename.
    pub fn with_filename(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

/// The result of executing one download request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DownloadOutcome {
    Success {
        url: String,
        filename: String,
        file_path: PathBuf,
    },
    Failed {
        url: String,
        filename: String,
        #[serde(serialize_with = "serialize_error")]
        error: DownloadError,
    },
}

impl DownloadOutcome {
    pub fn url(&self) -> &str {
        match self {
            Self::Success { url, .. } | Self::Failed { url, .. } => url,
        }
    }

    pub fn filename(&self) -> &str {
        match self {
            Self::Success { filename, .. } | Self::Failed { filename, .. } => filename,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The typed failure, if any.
    pub fn error(&self) -> Option<&DownloadError> {
        match self {
            Self::Success { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }
}

fn serialize_error<S>(error: &DownloadError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(error)
}

/// The result of dry-validating one download request. No network or disk
/// I/O is involved in producing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PreviewOutcome {
    Valid {
        url: String,
        filename: String,
    },
    Invalid {
        url: String,
        filename: String,
        reason: String,
    },
}

impl PreviewOutcome {
    /// Fold a construction-time resolver failure into an `Invalid` entry,
    /// for callers that preview URL lists before requests exist.
    pub fn invalid_construction(url: impl Into<String>, error: &FilenameError) -> Self {
        Self::Invalid {
            url: url.into(),
            filename: "unknown".to_string(),
            reason: error.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::Valid { url, .. } | Self::Invalid { url, .. } => url,
        }
    }

    pub fn filename(&self) -> &str {
        match self {
            Self::Valid { filename, .. } | Self::Invalid { filename, .. } => filename,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Valid { .. } => None,
            Self::Invalid { reason, .. } => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_filename() {
        let req = DownloadRequest::new("https://example.com/data", Some("myfile.pdf".into())).unwrap();
        assert_eq!(req.url(), "https://example.com/data");
        assert_eq!(req.filename(), "myfile.pdf");
    }

    #[test]
    fn test_auto_extracted_filename() {
        let req = DownloadRequest::from_url("https://example.com/documents/report.pdf").unwrap();
        assert_eq!(req.filename(), "report.pdf");
    }

    #[test]
    fn test_explicit_overrides_extraction() {
        let req =
            DownloadRequest::new("https://example.com/auto_name.pdf", Some("custom_name.pdf".into()))
                .unwrap();
        assert_eq!(req.filename(), "custom_name.pdf");
    }

    #[test]
    fn test_explicit_filename_skips_url_validation() {
        // The URL is unresolvable on its own, but an explicit filename
        // means no extraction happens.
        let req = DownloadRequest::with_filename("https://example.com", "index.html");
        assert_eq!(req.filename(), "index.html");
    }

    #[test]
    fn test_explicit_filename_content_not_checked() {
        // Separators pass construction; only the dry-run flags them.
        let req = DownloadRequest::with_filename("https://example.com/file.zip", "docs/file.zip");
        assert_eq!(req.filename(), "docs/file.zip");
    }

    #[test]
    fn test_construction_fails_without_path() {
        let err = DownloadRequest::from_url("https://example.com").unwrap_err();
        assert!(matches!(err, FilenameError::NoPathInUrl { .. }));
    }

    #[test]
    fn test_construction_fails_on_directory_path() {
        let err = DownloadRequest::from_url("https://example.com/files/").unwrap_err();
        assert!(matches!(err, FilenameError::DirectoryPath { .. }));

        let err = DownloadRequest::from_url("https://example.com/path/").unwrap_err();
        assert!(matches!(err, FilenameError::DirectoryPath { .. }));
    }

    #[test]
    fn test_outcome_accessors() {
        let ok = DownloadOutcome::Success {
            url: "https://example.com/a.bin".into(),
            filename: "a.bin".into(),
            file_path: PathBuf::from("/tmp/a.bin"),
        };
        assert!(ok.is_success());
        assert!(ok.error().is_none());

        let failed = DownloadOutcome::Failed {
            url: "https://example.com/b.bin".into(),
            filename: "b.bin".into(),
            error: DownloadError::Http {
                url: "https://example.com/b.bin".into(),
                status: 404,
            },
        };
        assert!(!failed.is_success());
        assert!(matches!(failed.error(), Some(DownloadError::Http { status: 404, .. })));
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let failed = DownloadOutcome::Failed {
            url: "https://example.com/b.bin".into(),
            filename: "b.bin".into(),
            error: DownloadError::Http {
                url: "https://example.com/b.bin".into(),
                status: 404,
            },
        };
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "failed");
        assert!(json["error"].as_str().unwrap().contains("404"));
    }

    #[test]
    fn test_invalid_construction_preview() {
        let err = FilenameError::NoPathInUrl {
            url: "https://example.com".into(),
        };
        let preview = PreviewOutcome::invalid_construction("https://example.com", &err);
        assert!(!preview.is_valid());
        assert_eq!(preview.filename(), "unknown");
        assert!(preview.reason().unwrap().contains("no path information"));
    }
}
