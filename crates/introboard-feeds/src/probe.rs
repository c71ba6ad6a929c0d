//! Image reachability probes.
//!
//! A terminal can't show the photo itself, but it can tell whether the photo
//! would load. [`ImageProber::probe`] answers that for one URL: an HTTP GET
//! for absolute URLs, a file-existence check under `public_dir` for bare
//! local paths.

use std::path::{Path, PathBuf};

use introboard_core::image::ImageSource;
use tracing::debug;

use crate::error::{FetchError, Result};

#[derive(Debug, Clone)]
pub struct ImageProber {
    client: reqwest::Client,
    public_dir: PathBuf,
}

impl ImageProber {
    pub fn new(client: reqwest::Client, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            public_dir: public_dir.into(),
        }
    }

    /// Where a bare local path lives on disk.
    pub fn local_path(&self, src: &str) -> PathBuf {
        self.public_dir.join(src.trim_start_matches('/'))
    }

    /// `Ok(())` if the image at `src` is reachable.
    pub async fn probe(&self, src: &str) -> Result<()> {
        let result = match ImageSource::classify(src) {
            ImageSource::Absolute => self.probe_remote(src).await,
            _ => probe_file(&self.local_path(src)).await,
        };
        debug!(%src, ok = result.is_ok(), "image probe");
        result
    }

    async fn probe_remote(&self, src: &str) -> Result<()> {
        let url = if src.starts_with("//") {
            format!("https:{src}")
        } else {
            src.to_string()
        };
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(FetchError::InvalidUrl(url));
        }
        let resp = self.client.get(url.as_str()).send().await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(FetchError::Status {
                status: resp.status().as_u16(),
                url,
            })
        }
    }
}

async fn probe_file(path: &Path) -> Result<()> {
    let meta = tokio::fs::metadata(path).await.map_err(|source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if meta.is_file() {
        Ok(())
    } else {
        Err(FetchError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a file"),
        })
    }
}
