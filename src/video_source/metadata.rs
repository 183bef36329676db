//! Video metadata lookup via YouTube's public oEmbed endpoint.

use super::watch_url;
use crate::config::YoutubeSettings;
use crate::error::{Result, TubecastError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// Metadata returned by the oEmbed lookup, kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Video title.
    #[serde(default)]
    pub title: String,
    /// Channel name.
    #[serde(default, rename = "author_name")]
    pub author: String,
    /// Thumbnail URL.
    #[serde(default)]
    pub thumbnail_url: String,
}

/// Fetches video metadata from the oEmbed endpoint.
pub struct MetadataFetcher {
    client: reqwest::Client,
    oembed_url: String,
    watch_url: String,
}

impl MetadataFetcher {
    pub fn new(settings: &YoutubeSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            oembed_url: settings.oembed_url.clone(),
            watch_url: settings.watch_url.clone(),
        })
    }

    /// Fetch title, author and thumbnail for a video.
    ///
    /// Every failure is reported as [`TubecastError::VideoInfo`]; the
    /// underlying cause is only logged.
    #[instrument(skip(self))]
    pub async fn fetch(&self, video_id: &str) -> Result<VideoMetadata> {
        self.lookup(video_id).await.map_err(|e| {
            warn!("Metadata lookup failed for {}: {}", video_id, e);
            TubecastError::VideoInfo {
                reason: e.to_string(),
            }
        })
    }

    async fn lookup(&self, video_id: &str) -> Result<VideoMetadata> {
        let video_url = watch_url(&self.watch_url, video_id);
        let url = Url::parse_with_params(
            &self.oembed_url,
            &[("url", video_url.as_str()), ("format", "json")],
        )
        .map_err(|e| TubecastError::Config(format!("Invalid oEmbed URL: {}", e)))?;

        debug!("Fetching oEmbed metadata: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(TubecastError::VideoNotFound(format!(
                "{} (status {})",
                video_id,
                response.status()
            )));
        }

        let metadata: VideoMetadata = response.json().await?;
        debug!("Found video: {} by {}", metadata.title, metadata.author);

        Ok(metadata)
    }
}
