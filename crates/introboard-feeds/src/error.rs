//! Errors raised while fetching a payload.
//!
//! The `Display` text is what ends up after `Failed to load introductions: `
//! in the UI, so keep it short and human-readable.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid URL {0:?}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, FetchError>;
