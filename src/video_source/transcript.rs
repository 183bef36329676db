//! Transcript retrieval with a placeholder fallback.
//!
//! A missing transcript must never fail a conversion, so [`TranscriptFetcher`]
//! swallows every provider error and substitutes [`PLACEHOLDER_TRANSCRIPT`].

use crate::config::TranscriptSettings;
use crate::error::{Result, TubecastError};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Text used when no real transcript could be obtained.
pub const PLACEHOLDER_TRANSCRIPT: &str = "This is a simulated transcript for the YouTube video. In a production environment, this would contain the actual video transcript extracted from YouTube's captions or using a speech-to-text service. The video discusses various interesting topics and provides valuable insights to the audience.";

/// One timed piece of a transcript as returned by a provider. Only the text
/// is kept.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TranscriptSegment {
    #[serde(default, deserialize_with = "text_from_value")]
    pub text: String,
}

/// Accept any JSON value as segment text. Null becomes empty, other
/// non-strings keep their JSON form.
fn text_from_value<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Where a transcript's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptOrigin {
    Provider,
    Placeholder,
}

/// A transcript flattened to a single blob of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub text: String,
    pub origin: TranscriptOrigin,
}

impl Transcript {
    /// Join segment texts with single spaces, discarding timing.
    pub fn from_segments(segments: &[TranscriptSegment]) -> Self {
        let text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            text,
            origin: TranscriptOrigin::Provider,
        }
    }

    pub fn placeholder() -> Self {
        Self {
            text: PLACEHOLDER_TRANSCRIPT.to_string(),
            origin: TranscriptOrigin::Placeholder,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.origin == TranscriptOrigin::Placeholder
    }
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Fetch the ordered transcript segments for a video.
    async fn fetch_segments(&self, video_id: &str) -> Result<Vec<TranscriptSegment>>;
}

#[derive(Debug, Deserialize)]
struct TranscriptResponse {
    transcript: Option<Vec<TranscriptSegment>>,
}

/// Transcript provider backed by the RapidAPI youtube-transcriptor service.
pub struct RapidApiTranscriptProvider {
    client: reqwest::Client,
    endpoint: String,
    host: String,
    api_key: Option<String>,
}

impl RapidApiTranscriptProvider {
    pub fn new(settings: &TranscriptSettings, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            host: settings.rapidapi_host.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl TranscriptProvider for RapidApiTranscriptProvider {
    async fn fetch_segments(&self, video_id: &str) -> Result<Vec<TranscriptSegment>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TubecastError::Config("RapidAPI key not configured".to_string()))?;

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("video_id", video_id)])
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", &self.host)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TubecastError::Transcript(format!(
                "provider returned status {}",
                response.status()
            )));
        }

        let body: TranscriptResponse = response.json().await?;
        body.transcript
            .ok_or_else(|| TubecastError::Transcript("response has no transcript field".to_string()))
    }
}

/// Fetches transcripts, degrading to the placeholder on any failure.
pub struct TranscriptFetcher {
    provider: Box<dyn TranscriptProvider>,
}

impl TranscriptFetcher {
    pub fn new(provider: Box<dyn TranscriptProvider>) -> Self {
        Self { provider }
    }

    /// Fetch the transcript for a video. Never fails.
    #[instrument(skip(self))]
    pub async fn fetch(&self, video_id: &str) -> Transcript {
        match self.provider.fetch_segments(video_id).await {
            Ok(segments) => {
                debug!("Received {} transcript segments", segments.len());
                Transcript::from_segments(&segments)
            }
            Err(TubecastError::Config(msg)) => {
                info!("Skipping transcript fetch ({}), using placeholder", msg);
                Transcript::placeholder()
            }
            Err(e) => {
                warn!("Transcript fetch failed, using placeholder: {}", e);
                Transcript::placeholder()
            }
        }
    }
}
