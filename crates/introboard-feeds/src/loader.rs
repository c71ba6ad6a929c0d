//! The local → remote fallback chain.
//!
//! [`Loader::load`] tries the local file first. Any failure there (missing
//! file, unreadable, bad JSON) silently falls through to the remote URL. Only
//! a remote failure becomes a [`LoadState::Failed`].

use std::path::PathBuf;
use std::time::Duration;

use introboard_core::config::DataConfig;
use introboard_core::image::DEFAULT_IMAGE_ORIGIN;
use introboard_core::normalizer;
use introboard_core::types::{DataOrigin, Dataset, LoadState};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::source::Source;

/// Per-request limit for data loads and image probes. A stalled remote
/// becomes a load error instead of a spinner that never ends.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Prefix of every user-visible load error.
pub const LOAD_ERROR_PREFIX: &str = "Failed to load introductions";

#[derive(Debug, Clone)]
pub struct Loader {
    local: Option<PathBuf>,
    remote: Option<String>,
    client: reqwest::Client,
}

impl Loader {
    pub fn new(local: Option<PathBuf>, remote: Option<String>) -> Result<Self> {
        Self::with_timeout(local, remote, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        local: Option<PathBuf>,
        remote: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("introboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            local,
            remote,
            client,
        })
    }

    pub fn from_config(data: &DataConfig) -> Result<Self> {
        Self::new(Some(data.local_path.clone()), Some(data.remote_url.clone()))
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Run the chain once. Records are normalised fresh on every call.
    pub async fn load(&self) -> LoadState {
        if let Some(path) = &self.local {
            let source = Source::Local(path.clone());
            match source.fetch(&self.client).await {
                Ok(payload) => {
                    let records = normalizer::normalize(&payload);
                    info!(path = %path.display(), records = records.len(), "loaded local introductions");
                    return LoadState::Ready(Dataset {
                        records,
                        origin: None,
                        source: DataOrigin::Local,
                        loaded_at: chrono::Utc::now(),
                    });
                }
                Err(err) => debug!(path = %path.display(), %err, "local data unavailable, trying remote"),
            }
        }

        let Some(url) = &self.remote else {
            return LoadState::Failed(format!("{LOAD_ERROR_PREFIX}: no data source configured"));
        };

        let source = Source::Remote(url.clone());
        match source.fetch(&self.client).await {
            Ok(payload) => {
                let origin = source
                    .origin()
                    .ok()
                    .flatten()
                    .unwrap_or_else(|| DEFAULT_IMAGE_ORIGIN.to_string());
                let records = normalizer::normalize(&payload);
                info!(%url, %origin, records = records.len(), "loaded remote introductions");
                LoadState::Ready(Dataset {
                    records,
                    origin: Some(origin),
                    source: DataOrigin::Remote,
                    loaded_at: chrono::Utc::now(),
                })
            }
            Err(err) => {
                warn!(%url, %err, "remote load failed");
                LoadState::Failed(format!("{LOAD_ERROR_PREFIX}: {err}"))
            }
        }
    }
}
