//! Convert command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{ConversionResult, Orchestrator};
use anyhow::Result;
use serde_json::Value;

/// Run a single conversion and print the result.
pub async fn run_convert(url: &str, json: bool, settings: Settings) -> Result<()> {
    let orchestrator = Orchestrator::new(settings)?;

    if !json && !orchestrator.generation_enabled() {
        Output::warning("OPENAI_API_KEY not set; using the built-in template.");
    }

    let spinner = (!json).then(|| Output::spinner("Converting to podcast..."));
    let outcome = orchestrator.convert(Some(url)).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let result = outcome?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    Ok(())
}

fn print_result(result: &ConversionResult) {
    Output::header(&result.title);
    Output::kv("Channel", &result.channel);
    Output::kv("Duration", &result.duration);
    Output::kv("Audio", &result.audio_url);
    if !result.thumbnail_url.is_empty() {
        Output::kv("Thumbnail", &result.thumbnail_url);
    }

    if let Some(description) = &result.podcast_description {
        Output::section("Podcast Episode Description", &display_value(description));
    }

    if let Some(Value::Array(topics)) = &result.key_topics {
        if !topics.is_empty() {
            println!();
            Output::info("Key Topics");
            for topic in topics {
                Output::list_item(&display_value(topic));
            }
        }
    } else if let Some(topics) = &result.key_topics {
        Output::section("Key Topics", &display_value(topics));
    }

    if let Some(notes) = &result.show_notes {
        Output::section("Show Notes", &display_value(notes));
    }

    if let Some(transcript) = &result.transcript {
        Output::section("Enhanced Transcript", &display_value(transcript));
    }

    println!();
    Output::success("Conversion complete.");
}

/// Render a model-provided value as plain text.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
