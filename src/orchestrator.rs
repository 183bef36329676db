//! Conversion pipeline for Tubecast.
//!
//! Runs one conversion from raw input to [`ConversionResult`]: resolve the
//! video ID, look up metadata, fetch the transcript, generate podcast copy.
//! Steps run strictly in sequence. Only bad input and a failed metadata
//! lookup can fail a conversion; the later steps degrade to placeholder or
//! template content.

use crate::config::{Prompts, Settings};
use crate::error::{Result, TubecastError};
use crate::podcast::{ContentTransformer, PodcastContent};
use crate::video_source::{
    watch_url, MetadataFetcher, RapidApiTranscriptProvider, TranscriptFetcher,
    TranscriptProvider, VideoReference,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

/// Duration reported for every episode; the real length is never fetched.
pub const DURATION_LABEL: &str = "Variable";

/// The record returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub title: String,
    pub channel: String,
    pub duration: String,
    pub thumbnail_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub podcast_description: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_topics: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_notes: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Value>,
    pub audio_url: String,
    pub video_id: String,
}

/// The conversion pipeline.
pub struct Orchestrator {
    metadata: MetadataFetcher,
    transcripts: TranscriptFetcher,
    transformer: ContentTransformer,
    watch_url: String,
}

impl Orchestrator {
    /// Create an orchestrator using the RapidAPI transcript provider.
    pub fn new(settings: Settings) -> Result<Self> {
        let provider = RapidApiTranscriptProvider::new(&settings.transcript, settings.rapidapi_key())?;
        Self::with_transcript_provider(settings, Box::new(provider))
    }

    /// Create an orchestrator with a custom transcript provider.
    pub fn with_transcript_provider(
        settings: Settings,
        provider: Box<dyn TranscriptProvider>,
    ) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let transformer =
            ContentTransformer::new(settings.generation.clone(), settings.openai_api_key(), prompts);

        Ok(Self {
            metadata: MetadataFetcher::new(&settings.youtube)?,
            transcripts: TranscriptFetcher::new(provider),
            transformer,
            watch_url: settings.youtube.watch_url,
        })
    }

    /// Whether podcast copy will be written by the model rather than the template.
    pub fn generation_enabled(&self) -> bool {
        self.transformer.is_configured()
    }

    /// Convert a YouTube URL or ID into podcast copy.
    #[instrument(skip(self))]
    pub async fn convert(&self, input: Option<&str>) -> Result<ConversionResult> {
        let input = input
            .filter(|s| !s.is_empty())
            .ok_or(TubecastError::MissingUrl)?;

        let reference = VideoReference::parse(input);
        let video_id = reference.video_id.ok_or(TubecastError::InvalidUrl)?;
        info!("Converting video {}", video_id);

        let metadata = self.metadata.fetch(&video_id).await?;
        info!("Found video: {}", metadata.title);

        let transcript = self.transcripts.fetch(&video_id).await;
        if transcript.is_placeholder() {
            info!("Using placeholder transcript");
        }

        let content = self.transformer.transform(&metadata, &transcript).await;

        let PodcastContent {
            podcast_description,
            key_topics,
            show_notes,
            enhanced_transcript,
        } = content;

        Ok(ConversionResult {
            title: metadata.title,
            channel: metadata.author,
            duration: DURATION_LABEL.to_string(),
            thumbnail_url: metadata.thumbnail_url,
            podcast_description,
            key_topics,
            show_notes,
            transcript: enhanced_transcript,
            audio_url: watch_url(&self.watch_url, &video_id),
            video_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video_source::{TranscriptSegment, PLACEHOLDER_TRANSCRIPT};
    use async_trait::async_trait;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;

    struct StaticProvider(Option<Vec<&'static str>>);

    #[async_trait]
    impl TranscriptProvider for StaticProvider {
        async fn fetch_segments(&self, _video_id: &str) -> Result<Vec<TranscriptSegment>> {
            match &self.0 {
                Some(texts) => Ok(texts
                    .iter()
                    .map(|t| TranscriptSegment { text: t.to_string() })
                    .collect()),
                None => Err(TubecastError::Transcript("unreachable".to_string())),
            }
        }
    }

    fn settings_for(server: &ServerGuard) -> Settings {
        let mut settings = Settings::default();
        settings.youtube.oembed_url = format!("{}/oembed", server.url());
        settings.generation.api_key = Some(String::new());
        settings
    }

    async fn mock_oembed(server: &mut ServerGuard) -> mockito::Mock {
        server
            .mock("GET", "/oembed")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"title": "Rust in 100 Seconds", "author_name": "Fireship", "thumbnail_url": "https://i.ytimg.com/vi/5C_HPTJg5ek/hqdefault.jpg"}"#,
            )
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_missing_input() {
        let server = Server::new_async().await;
        let orchestrator = Orchestrator::with_transcript_provider(
            settings_for(&server),
            Box::new(StaticProvider(None)),
        )
        .unwrap();

        assert!(matches!(orchestrator.convert(None).await, Err(TubecastError::MissingUrl)));
        assert!(matches!(orchestrator.convert(Some("")).await, Err(TubecastError::MissingUrl)));
    }

    #[tokio::test]
    async fn test_invalid_input_makes_no_requests() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/oembed")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let orchestrator = Orchestrator::with_transcript_provider(
            settings_for(&server),
            Box::new(StaticProvider(None)),
        )
        .unwrap();

        let result = orchestrator.convert(Some("not a url")).await;
        assert!(matches!(result, Err(TubecastError::InvalidUrl)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_metadata_failure_fails_conversion() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/oembed")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let orchestrator = Orchestrator::with_transcript_provider(
            settings_for(&server),
            Box::new(StaticProvider(Some(vec!["hello"]))),
        )
        .unwrap();

        let err = orchestrator.convert(Some("dQw4w9WgXcQ")).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch video information");
    }

    #[tokio::test]
    async fn test_conversion_with_placeholder_transcript() {
        let mut server = Server::new_async().await;
        let _mock = mock_oembed(&mut server).await;

        let orchestrator = Orchestrator::with_transcript_provider(
            settings_for(&server),
            Box::new(StaticProvider(None)),
        )
        .unwrap();
        assert!(!orchestrator.generation_enabled());

        let result = orchestrator
            .convert(Some("https://www.youtube.com/watch?v=5C_HPTJg5ek"))
            .await
            .unwrap();

        assert_eq!(result.title, "Rust in 100 Seconds");
        assert_eq!(result.channel, "Fireship");
        assert_eq!(result.duration, "Variable");
        assert_eq!(result.video_id, "5C_HPTJg5ek");
        assert_eq!(result.audio_url, "https://www.youtube.com/watch?v=5C_HPTJg5ek");
        assert_eq!(result.transcript, Some(json!(PLACEHOLDER_TRANSCRIPT)));
        assert_eq!(
            result.key_topics,
            Some(json!(["Video Content", "Key Discussion Points", "Main Insights"]))
        );
    }

    #[tokio::test]
    async fn test_conversion_with_provider_transcript() {
        let mut server = Server::new_async().await;
        let _mock = mock_oembed(&mut server).await;

        let orchestrator = Orchestrator::with_transcript_provider(
            settings_for(&server),
            Box::new(StaticProvider(Some(vec!["Rust is", "blazingly fast."]))),
        )
        .unwrap();

        let result = orchestrator.convert(Some("https://youtu.be/5C_HPTJg5ek")).await.unwrap();
        assert_eq!(result.transcript, Some(json!("Rust is blazingly fast.")));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["thumbnailUrl"], "https://i.ytimg.com/vi/5C_HPTJg5ek/hqdefault.jpg");
        assert_eq!(value["videoId"], "5C_HPTJg5ek");
        assert!(value["podcastDescription"].as_str().unwrap().contains("Rust in 100 Seconds"));
    }
}
