//! Decoding of free-form model answers into [`PodcastContent`].

use super::{template, PodcastContent};
use crate::error::{Result, TubecastError};
use serde_json::{Map, Value};
use tracing::warn;

/// The span from the first `{` to the last `}`, if any.
fn json_span(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (end > start).then(|| &response[start..=end])
}

/// Strictly decode the JSON object embedded in a model answer.
///
/// Fields are taken as-is: absent keys stay absent, `null` stays `null` and
/// values of an unexpected shape are carried through unchanged. A repeated
/// key keeps its last value.
pub fn parse_content(response: &str) -> Result<PodcastContent> {
    let json_str = json_span(response).ok_or_else(|| {
        TubecastError::OpenAI("No JSON object in model response".to_string())
    })?;

    let fields: Map<String, Value> = serde_json::from_str(json_str)?;
    Ok(PodcastContent::from_map(fields))
}

/// Turn a model answer into podcast copy, falling back to the plain-text
/// template when no JSON object can be decoded.
pub fn interpret_response(response: &str, transcript: &str) -> PodcastContent {
    match parse_content(response) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to parse model response as JSON: {}", e);
            template::unparseable(response, transcript)
        }
    }
}
