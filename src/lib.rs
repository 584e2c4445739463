//! Concurrency-limited batch file downloader.
//!
//! Give the [`Downloader`] a set of URL/filename pairs and it fetches each
//! over HTTP into an output directory, running at most `max_concurrent`
//! transfers at a time. Every request produces exactly one
//! [`DownloadOutcome`], in request order; a failing transfer never aborts
//! the batch. [`Downloader::download_dry`] previews a batch without any
//! network or disk I/O.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod utils;

pub use application::Downloader;
pub use config::{Timeout, TimeoutPreset, DEFAULT_MAX_CONCURRENT};
pub use domain::{
    ConfigError, DownloadError, DownloadOutcome, DownloadRequest, FilenameError, PreviewOutcome,
};
