//! Podcast copy generation.
//!
//! Reshapes video metadata and a transcript into an episode description,
//! key topics, show notes and an enhanced transcript. Generation is
//! best-effort: without an API key, on a failed completion call, or when the
//! model's answer holds no decodable JSON, a deterministic template is used
//! instead, so [`ContentTransformer::transform`] always yields a record.

mod parse;
mod template;

pub use parse::{interpret_response, parse_content};
pub use template::{truncate_chars, unconfigured, unparseable, EXCERPT_CHARS};

use crate::config::{GenerationSettings, Prompts};
use crate::error::{Result, TubecastError};
use crate::openai::create_client;
use crate::video_source::{Transcript, VideoMetadata};
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, info, instrument, warn};

/// Number of transcript characters included in the prompt.
pub const PROMPT_TRANSCRIPT_CHARS: usize = 8000;

/// Podcast copy for one video.
///
/// Fields hold raw JSON values so a model answer passes through unchanged,
/// whatever shape it has. Absent fields are omitted when serialized; an
/// explicit `null` is kept and serialized as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub podcast_description: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_topics: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_notes: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhanced_transcript: Option<Value>,
}

impl PodcastContent {
    /// Build a record from plain strings and a topic list.
    pub fn from_parts(
        description: String,
        topics: &[&str],
        show_notes: String,
        enhanced_transcript: String,
    ) -> Self {
        Self {
            podcast_description: Some(Value::from(description)),
            key_topics: Some(Value::from(topics.to_vec())),
            show_notes: Some(Value::from(show_notes)),
            enhanced_transcript: Some(Value::from(enhanced_transcript)),
        }
    }

    /// Take the four content fields out of a decoded JSON object.
    pub fn from_map(mut fields: Map<String, Value>) -> Self {
        Self {
            podcast_description: fields.remove("podcastDescription"),
            key_topics: fields.remove("keyTopics"),
            show_notes: fields.remove("showNotes"),
            enhanced_transcript: fields.remove("enhancedTranscript"),
        }
    }
}

/// Produces [`PodcastContent`] with the configured chat model.
///
/// The OpenAI client is built on first use and reused for the life of the
/// transformer. A missing key is remembered as `None` and never retried.
pub struct ContentTransformer {
    settings: GenerationSettings,
    api_key: Option<String>,
    prompts: Prompts,
    client: OnceLock<Option<Client<OpenAIConfig>>>,
}

impl ContentTransformer {
    pub fn new(settings: GenerationSettings, api_key: Option<String>, prompts: Prompts) -> Self {
        Self {
            settings,
            api_key,
            prompts,
            client: OnceLock::new(),
        }
    }

    /// Whether a generative-text key is available.
    pub fn is_configured(&self) -> bool {
        self.client().is_some()
    }

    fn client(&self) -> Option<&Client<OpenAIConfig>> {
        self.client
            .get_or_init(|| {
                let api_key = self.api_key.as_deref()?;
                match create_client(api_key, &self.settings) {
                    Ok(client) => Some(client),
                    Err(e) => {
                        warn!("Generative text disabled: {}", e);
                        None
                    }
                }
            })
            .as_ref()
    }

    /// Generate podcast copy. Never fails.
    #[instrument(skip(self, metadata, transcript), fields(title = %metadata.title))]
    pub async fn transform(&self, metadata: &VideoMetadata, transcript: &Transcript) -> PodcastContent {
        let Some(client) = self.client() else {
            info!("No OpenAI API key configured, using template content");
            return unconfigured(metadata, &transcript.text);
        };

        match self.generate(client, metadata, transcript).await {
            Ok(response) => interpret_response(&response, &transcript.text),
            Err(e) => {
                warn!("Podcast generation failed, using template content: {}", e);
                unconfigured(metadata, &transcript.text)
            }
        }
    }

    /// Build the chat messages for a video.
    fn build_messages(
        &self,
        metadata: &VideoMetadata,
        transcript: &Transcript,
    ) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut vars = HashMap::new();
        vars.insert("title".to_string(), metadata.title.clone());
        vars.insert("channel".to_string(), metadata.author.clone());
        vars.insert(
            "transcript".to_string(),
            truncate_chars(&transcript.text, PROMPT_TRANSCRIPT_CHARS),
        );

        let system_message = self.prompts.render_with_custom(&self.prompts.podcast.system, &vars);
        let user_message = self.prompts.render_with_custom(&self.prompts.podcast.user, &vars);

        Ok(vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_message)
                .build()
                .map_err(|e| TubecastError::OpenAI(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_message)
                .build()
                .map_err(|e| TubecastError::OpenAI(e.to_string()))?
                .into(),
        ])
    }

    /// Build the chat completion request for a video.
    #[allow(deprecated)]
    fn build_request(
        &self,
        metadata: &VideoMetadata,
        transcript: &Transcript,
    ) -> Result<CreateChatCompletionRequest> {
        let messages = self.build_messages(metadata, transcript)?;

        CreateChatCompletionRequestArgs::default()
            .model(&self.settings.model)
            .messages(messages)
            .temperature(self.settings.temperature)
            .max_tokens(self.settings.max_tokens)
            .build()
            .map_err(|e| TubecastError::OpenAI(e.to_string()))
    }

    /// Call the chat model and return its raw text answer.
    async fn generate(
        &self,
        client: &Client<OpenAIConfig>,
        metadata: &VideoMetadata,
        transcript: &Transcript,
    ) -> Result<String> {
        let request = self.build_request(metadata, transcript)?;

        debug!("Requesting podcast copy from {}", self.settings.model);

        let response = client.chat().create(request).await.map_err(|e| {
            TubecastError::OpenAI(format!("Failed to generate podcast content: {}", e))
        })?;

        // An empty answer decodes as an empty object.
        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "{}".to_string());

        debug!("Model response: {}", truncate_chars(&content, 500));

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server, ServerGuard};
    use serde_json::json;

    fn metadata() -> VideoMetadata {
        VideoMetadata {
            title: "Rust in 100 Seconds".to_string(),
            author: "Fireship".to_string(),
            thumbnail_url: String::new(),
        }
    }

    fn transcript(text: &str) -> Transcript {
        Transcript {
            text: text.to_string(),
            origin: crate::video_source::TranscriptOrigin::Provider,
        }
    }

    fn transformer_for(server: &ServerGuard) -> ContentTransformer {
        let settings = GenerationSettings {
            api_base: Some(format!("{}/v1", server.url())),
            timeout_secs: 10,
            ..GenerationSettings::default()
        };
        ContentTransformer::new(settings, Some("sk-test".to_string()), Prompts::default())
    }

    fn completion_body(content: &str) -> String {
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": "gpt-4-turbo-preview",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
        .to_string()
    }

    #[test]
    fn test_podcast_content_serializes_camel_case_and_skips_absent() {
        let content = PodcastContent {
            podcast_description: Some(json!("Desc")),
            key_topics: None,
            show_notes: Some(json!("Notes")),
            enhanced_transcript: None,
        };

        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(value, json!({"podcastDescription": "Desc", "showNotes": "Notes"}));
    }

    #[tokio::test]
    async fn test_without_key_uses_template() {
        let transformer =
            ContentTransformer::new(GenerationSettings::default(), None, Prompts::default());
        assert!(!transformer.is_configured());

        let content = transformer
            .transform(&metadata(), &transcript(&"x".repeat(2000)))
            .await;

        assert_eq!(content, unconfigured(&metadata(), &"x".repeat(2000)));
        assert_eq!(content.enhanced_transcript, Some(json!("x".repeat(1000))));
    }

    #[tokio::test]
    async fn test_model_json_is_adopted() {
        let mut server = Server::new_async().await;
        let answer = r#"{"podcastDescription": "A deep dive.", "keyTopics": ["Ownership", "Borrowing"], "showNotes": "00:00 Intro", "enhancedTranscript": "Welcome!"}"#;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4-turbo-preview",
                "max_tokens": 2000
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body(answer))
            .create_async()
            .await;

        let transformer = transformer_for(&server);
        assert!(transformer.is_configured());

        let content = transformer
            .transform(&metadata(), &transcript("Rust is a systems language."))
            .await;
        mock.assert_async().await;

        assert_eq!(content.podcast_description, Some(json!("A deep dive.")));
        assert_eq!(content.key_topics, Some(json!(["Ownership", "Borrowing"])));
        assert_eq!(content.show_notes, Some(json!("00:00 Intro")));
        assert_eq!(content.enhanced_transcript, Some(json!("Welcome!")));
    }

    #[tokio::test]
    async fn test_prose_answer_uses_secondary_fallback() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body("A lively episode.\n\nMore details follow."))
            .create_async()
            .await;

        let content = transformer_for(&server)
            .transform(&metadata(), &transcript("original transcript"))
            .await;

        assert_eq!(content, unparseable("A lively episode.\n\nMore details follow.", "original transcript"));
        assert_eq!(content.podcast_description, Some(json!("A lively episode.")));
    }

    #[tokio::test]
    async fn test_api_error_uses_template() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"error": {"message": "bad request", "type": "invalid_request_error", "param": null, "code": null}}"#,
            )
            .create_async()
            .await;

        let content = transformer_for(&server)
            .transform(&metadata(), &transcript("original transcript"))
            .await;

        assert_eq!(content, unconfigured(&metadata(), "original transcript"));
    }

    #[test]
    fn test_request_uses_configured_sampling() {
        let transformer = ContentTransformer::new(
            GenerationSettings::default(),
            Some("sk-test".to_string()),
            Prompts::default(),
        );

        let request = transformer
            .build_request(&metadata(), &transcript("hello"))
            .unwrap();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["model"], "gpt-4-turbo-preview");
        assert_eq!(body["max_tokens"], 2000);
        let temperature = body["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6, "temperature was {}", temperature);
    }

    #[test]
    fn test_prompt_includes_truncated_transcript() {
        let transformer = ContentTransformer::new(
            GenerationSettings::default(),
            Some("sk-test".to_string()),
            Prompts::default(),
        );
        let long = format!("{}{}", "a".repeat(PROMPT_TRANSCRIPT_CHARS), "TAIL");

        let messages = transformer
            .build_messages(&metadata(), &transcript(&long))
            .unwrap();
        let rendered = serde_json::to_string(&messages).unwrap();

        assert_eq!(messages.len(), 2);
        assert!(rendered.contains("Title: Rust in 100 Seconds"));
        assert!(rendered.contains("Channel: Fireship"));
        assert!(!rendered.contains("TAIL"));
    }
}
