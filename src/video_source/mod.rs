//! Video source handling for Tubecast.
//!
//! Resolves YouTube identifiers from user input and fetches the two pieces of
//! upstream data a conversion needs: oEmbed metadata and a transcript.

mod metadata;
mod transcript;

pub use metadata::{MetadataFetcher, VideoMetadata};
pub use transcript::{
    RapidApiTranscriptProvider, Transcript, TranscriptFetcher, TranscriptOrigin,
    TranscriptProvider, TranscriptSegment, PLACEHOLDER_TRANSCRIPT,
};

use regex::Regex;
use std::sync::LazyLock;

/// Recognized shapes, tried in order. URL forms come first so an identifier
/// embedded in a URL wins over an accidental bare match.
static VIDEO_ID_PATTERNS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)")
            .expect("Invalid regex"),
        Regex::new(r"^([a-zA-Z0-9_-]{11})$").expect("Invalid regex"),
    ]
});

/// Extract a video ID from a YouTube URL or bare ID.
///
/// Only the shape is checked. A string that matches a pattern but names no
/// real video is still returned, and the upstream services reject it later.
pub fn extract_video_id(input: &str) -> Option<String> {
    VIDEO_ID_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// Raw user input together with the identifier derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoReference {
    pub input: String,
    pub video_id: Option<String>,
}

impl VideoReference {
    pub fn parse(input: &str) -> Self {
        Self {
            input: input.to_string(),
            video_id: extract_video_id(input),
        }
    }
}

/// Build the canonical watch URL for a video.
pub fn watch_url(base: &str, video_id: &str) -> String {
    format!("{}?v={}", base.trim_end_matches('?'), video_id)
}
