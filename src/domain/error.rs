use std::path::PathBuf;

use thiserror::Error;

/// Reasons a filename cannot be derived from a URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilenameError {
    #[error("cannot extract filename from URL: no path information. URL: {url}")]
    NoPathInUrl { url: String },

    #[error("cannot extract filename from URL: path points to a directory. URL: {url}")]
    DirectoryPath { url: String },
}

/// Why a single transfer failed.
///
/// Causes are carried as rendered strings so outcomes stay cloneable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    #[error("HTTP {status} error while downloading from {url}")]
    Http { url: String, status: u16 },

    #[error("download from {url} timed out after {timeout_secs} seconds")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("network error downloading from {url}: {cause}")]
    Network { url: String, cause: String },

    #[error("failed to write file {filename}: {cause}")]
    FileWrite { filename: String, cause: String },

    #[error("unexpected error: {cause}")]
    Unexpected { cause: String },
}

/// Construction-time configuration problems.
///
/// The only error kind that escapes the facade as `Err`; everything after
/// a batch starts is returned as outcome data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown timeout preset: {name}. Available presets: FOR_LARGE_FILES, BALANCED, FOR_SMALL_FILES")]
    UnknownPreset { name: String },

    #[error("timeout must be a positive number of seconds, got {seconds}")]
    InvalidTimeout { seconds: u64 },

    #[error("max_concurrent must be a positive integer, got {value}")]
    InvalidConcurrency { value: usize },

    #[error("failed to create output directory {}: {cause}", .path.display())]
    OutputDir { path: PathBuf, cause: std::io::Error },

    #[error("failed to build HTTP client: {cause}")]
    HttpClient { cause: String },
}
