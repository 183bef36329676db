//! Configuration module for Tubecast.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{PodcastPrompts, Prompts};
pub use settings::{
    GeneralSettings, GenerationSettings, PromptSettings, ServerSettings, Settings,
    TranscriptSettings, YoutubeSettings, OPENAI_API_KEY_ENV, RAPIDAPI_KEY_ENV,
};
