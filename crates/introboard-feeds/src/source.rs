//! Payload sources: a JSON file on disk or a JSON endpoint over HTTP.

use std::path::PathBuf;

use serde_json::Value;

use crate::error::{FetchError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Local(PathBuf),
    Remote(String),
}

impl Source {
    /// Fetch and decode the payload. Any JSON value is accepted; shape
    /// recognition is the normalizer's job.
    pub async fn fetch(&self, client: &reqwest::Client) -> Result<Value> {
        match self {
            Source::Local(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|source| FetchError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(serde_json::from_slice(&bytes)?)
            }
            Source::Remote(url) => {
                let resp = client.get(url.as_str()).send().await?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(FetchError::Status {
                        status: status.as_u16(),
                        url: url.clone(),
                    });
                }
                let bytes = resp.bytes().await?;
                Ok(serde_json::from_slice(&bytes)?)
            }
        }
    }

    /// Scheme + host (+ port) of a remote source, used to rebase
    /// root-relative image paths.
    pub fn origin(&self) -> Result<Option<String>> {
        match self {
            Source::Local(_) => Ok(None),
            Source::Remote(url) => {
                let parsed =
                    reqwest::Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.clone()))?;
                let origin = parsed.origin();
                if !origin.is_tuple() {
                    return Err(FetchError::InvalidUrl(url.clone()));
                }
                Ok(Some(origin.ascii_serialization()))
            }
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Local(path) => write!(f, "{}", path.display()),
            Source::Remote(url) => write!(f, "{url}"),
        }
    }
}
