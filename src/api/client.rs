use std::time::Duration;

use bytes::Bytes;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },
}

impl FetchError {
    fn classify(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Transport {
                url: url.to_string(),
                source,
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// Status and fully buffered body of one GET.
#[derive(Debug)]
pub struct FetchedResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Thin wrapper over a shared `reqwest::Client` configured with a total
/// request timeout covering connect, send, and body read.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> std::result::Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Issue a GET and buffer the whole response body.
    pub async fn get(&self, url: &str) -> Result<FetchedResponse> {
        debug!(url, "sending GET request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::classify(url, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::classify(url, e))?;

        debug!(url, status = status.as_u16(), bytes = body.len(), "response received");

        Ok(FetchedResponse { status, body })
    }
}
