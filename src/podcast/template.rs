//! Deterministic podcast copy used when the model is unavailable or its
//! answer cannot be decoded.

use super::PodcastContent;
use crate::video_source::VideoMetadata;

/// Length of the transcript excerpt returned by the templates.
pub const EXCERPT_CHARS: usize = 1000;

/// Length of the description taken from raw model text when it has no
/// leading paragraph.
pub const DESCRIPTION_FALLBACK_CHARS: usize = 500;

pub const UNCONFIGURED_TOPICS: [&str; 3] = ["Video Content", "Key Discussion Points", "Main Insights"];

pub const UNPARSEABLE_TOPICS: [&str; 3] = ["Main Topic", "Discussion Points", "Key Insights"];

pub const UNPARSEABLE_SHOW_NOTES: &str = "See full episode description above.";

/// Copy produced when no generative-text key is configured.
pub fn unconfigured(metadata: &VideoMetadata, transcript: &str) -> PodcastContent {
    PodcastContent::from_parts(
        format!(
            "This episode covers \"{}\" from {}. The content has been transformed into an engaging podcast format perfect for audio-only consumption.\n\nNote: Full AI enhancement requires API key configuration.",
            metadata.title, metadata.author
        ),
        &UNCONFIGURED_TOPICS,
        format!(
            "Episode: {}\nChannel: {}\n\nFull AI-powered show notes available with API key configuration.",
            metadata.title, metadata.author
        ),
        truncate_chars(transcript, EXCERPT_CHARS),
    )
}

/// Copy built from raw model text that held no decodable JSON object.
pub fn unparseable(raw: &str, transcript: &str) -> PodcastContent {
    let first_paragraph = raw.split("\n\n").next().unwrap_or_default();
    let description = if first_paragraph.is_empty() {
        truncate_chars(raw, DESCRIPTION_FALLBACK_CHARS)
    } else {
        first_paragraph.to_string()
    };

    PodcastContent::from_parts(
        description,
        &UNPARSEABLE_TOPICS,
        UNPARSEABLE_SHOW_NOTES.to_string(),
        truncate_chars(transcript, EXCERPT_CHARS),
    )
}

/// First `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
