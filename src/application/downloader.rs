use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use reqwest::StatusCode;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::api::{FetchError, HttpClient};
use crate::config::{Timeout, DEFAULT_MAX_CONCURRENT};
use crate::domain::{ConfigError, DownloadError, DownloadOutcome, DownloadRequest, PreviewOutcome};
use crate::utils::ensure_directory;

/// Batch file downloader with a fixed concurrency cap.
///
/// Owns the output directory, the resolved timeout, and a shared HTTP
/// client reused by every transfer. Construction validates the
/// configuration eagerly and creates the output directory; after that,
/// `download` and `download_dry` never fail as a whole — per-request
/// problems come back as outcome data.
#[derive(Debug, Clone)]
pub struct Downloader {
    out_dir: PathBuf,
    timeout_secs: u64,
    max_concurrent: usize,
    client: HttpClient,
}

impl Downloader {
    /// Create a downloader with the default timeout (BALANCED, 60 s) and
    /// concurrency cap (5).
    pub fn new(out_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Self::with_options(out_dir, Timeout::default(), DEFAULT_MAX_CONCURRENT)
    }

    /// Create a downloader with an explicit timeout (preset or seconds)
    /// and concurrency cap.
    pub fn with_options(
        out_dir: impl Into<PathBuf>,
        timeout: impl Into<Timeout>,
        max_concurrent: usize,
    ) -> Result<Self, ConfigError> {
        let out_dir = out_dir.into();
        let timeout_secs = timeout.into().resolve()?;

        if max_concurrent == 0 {
            return Err(ConfigError::InvalidConcurrency {
                value: max_concurrent,
            });
        }

        ensure_directory(&out_dir).map_err(|cause| ConfigError::OutputDir {
            path: out_dir.clone(),
            cause,
        })?;

        let client = HttpClient::new(Duration::from_secs(timeout_secs)).map_err(|e| {
            ConfigError::HttpClient {
                cause: e.to_string(),
            }
        })?;

        debug!(out_dir = %out_dir.display(), timeout_secs, max_concurrent, "downloader ready");

        Ok(Self {
            out_dir,
            timeout_secs,
            max_concurrent,
            client,
        })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Download every request, at most `max_concurrent` at a time.
    ///
    /// All transfers are scheduled at once and throttled by a semaphore;
    /// one outcome is returned per request, in request order, regardless
    /// of completion order. A failing transfer never affects its siblings.
    pub async fn download(
        &self,
        requests: impl IntoIterator<Item = DownloadRequest>,
    ) -> Vec<DownloadOutcome> {
        let requests: Vec<DownloadRequest> = requests.into_iter().collect();
        info!(
            count = requests.len(),
            max_concurrent = self.max_concurrent,
            "starting batch download"
        );

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let outcomes = self.run_batch(requests, semaphore).await;

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        info!(total = outcomes.len(), failed, "batch download finished");

        outcomes
    }

    /// Fan the requests out against the given limiter and gather the
    /// outcomes positionally.
    async fn run_batch(
        &self,
        requests: Vec<DownloadRequest>,
        semaphore: Arc<Semaphore>,
    ) -> Vec<DownloadOutcome> {
        let transfers = requests.into_iter().map(|request| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    // Not reachable while the batch holds the semaphore
                    // open, but a surprise here must not escape the batch.
                    Err(e) => {
                        return failed_outcome(
                            &request,
                            DownloadError::Unexpected {
                                cause: format!("concurrency limiter closed: {e}"),
                            },
                        )
                    }
                };
                self.download_single(request).await
            }
        });

        // join_all keeps positional order: outcome i belongs to request i.
        join_all(transfers).await
    }

    /// Validate requests without any network or disk I/O.
    ///
    /// Filenames were already resolved at construction; the one remaining
    /// check is that a filename names a file directly inside the output
    /// directory, i.e. contains no path separator.
    pub fn download_dry(&self, requests: &[DownloadRequest]) -> Vec<PreviewOutcome> {
        requests
            .iter()
            .map(|request| {
                let filename = request.filename();
                if filename.contains('/') || filename.contains('\\') {
                    PreviewOutcome::Invalid {
                        url: request.url().to_string(),
                        filename: filename.to_string(),
                        reason: "filename cannot contain path separators".to_string(),
                    }
                } else {
                    PreviewOutcome::Valid {
                        url: request.url().to_string(),
                        filename: filename.to_string(),
                    }
                }
            })
            .collect()
    }

    /// Execute one transfer, translating every failure into an outcome.
    async fn download_single(&self, request: DownloadRequest) -> DownloadOutcome {
        let url = request.url().to_string();
        let filename = request.filename().to_string();

        match self.client.get(&url).await {
            // Exactly 200 counts as success; any other status, 2xx
            // included, is an HTTP failure.
            Ok(response) if response.status == StatusCode::OK => {
                let file_path = self.out_dir.join(&filename);
                match tokio::fs::write(&file_path, &response.body).await {
                    Ok(()) => {
                        debug!(%url, path = %file_path.display(), "download complete");
                        DownloadOutcome::Success {
                            url,
                            filename,
                            file_path,
                        }
                    }
                    Err(e) => {
                        warn!(%url, %filename, error = %e, "file write failed");
                        failed_outcome(
                            &request,
                            DownloadError::FileWrite {
                                filename,
                                cause: e.to_string(),
                            },
                        )
                    }
                }
            }
            Ok(response) => {
                let status = response.status.as_u16();
                warn!(%url, status, "non-success HTTP status");
                failed_outcome(&request, DownloadError::Http { url, status })
            }
            Err(FetchError::Timeout { .. }) => {
                warn!(%url, timeout_secs = self.timeout_secs, "download timed out");
                failed_outcome(
                    &request,
                    DownloadError::Timeout {
                        url,
                        timeout_secs: self.timeout_secs,
                    },
                )
            }
            Err(FetchError::Transport { source, .. }) => {
                warn!(%url, error = %source, "network error");
                failed_outcome(
                    &request,
                    DownloadError::Network {
                        url,
                        cause: source.to_string(),
                    },
                )
            }
        }
    }
}

fn failed_outcome(request: &DownloadRequest, error: DownloadError) -> DownloadOutcome {
    DownloadOutcome::Failed {
        url: request.url().to_string(),
        filename: request.filename().to_string(),
        error,
    }
}
