use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Invalid date '{input}', please use one of these formats: {accepted}")]
    InvalidDateFormat { input: String, accepted: String },

    #[error("Archive rejected the request. Check username or token.")]
    InvalidCredentials,

    #[error("Failed to parse archive file listing")]
    ListingParse(#[source] serde_json::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Data download failed")]
    DownloadIo(#[from] std::io::Error),

    #[error("I/O error reading dataset from {url}")]
    DatasetIo {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parsing error reading dataset from {url}")]
    DatasetParse {
        url: String,
        #[source]
        source: PolarsError,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
