//! Error types for downstream calls.

use thiserror::Error;

/// Errors that can occur while fetching from a downstream service.
#[derive(Error, Debug)]
pub enum DownstreamError {
    /// The endpoint was never configured.
    #[error("{0} is not set")]
    ConfigMissing(&'static str),

    /// The shared HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Connection refused, DNS failure, timeout, or a broken body stream.
    #[error("transport error talking to {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The downstream answered with nothing but whitespace.
    #[error("empty response from {endpoint}, the body was: {body:?}")]
    EmptyResponse { endpoint: String, body: String },
}

impl DownstreamError {
    /// True for failures that happen per request rather than at startup.
    pub fn is_runtime(&self) -> bool {
        !matches!(
            self,
            DownstreamError::ConfigMissing(_) | DownstreamError::HttpClient(_)
        )
    }
}
