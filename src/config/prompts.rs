//! Prompt templates for Tubecast.
//!
//! Prompts can be customized by placing a `podcast.toml` file in the custom prompts directory.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("Invalid regex"));

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub podcast: PodcastPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for turning a video transcript into podcast copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PodcastPrompts {
    pub system: String,
    pub user: String,
}

impl Default for PodcastPrompts {
    fn default() -> Self {
        Self {
            system: "You are an expert podcast producer. Transform YouTube video content into engaging podcast episodes. Create compelling descriptions, show notes, and identify key topics. Make the content flow naturally for audio-only consumption.".to_string(),

            user: r#"Transform this YouTube video into a podcast episode:

Title: {{title}}
Channel: {{channel}}

Transcript:
{{transcript}}

Please provide:
1. A compelling podcast episode description (2-3 paragraphs)
2. 5-7 key topics discussed
3. Detailed show notes with timestamps (estimate based on content flow)
4. An enhanced, podcast-friendly version of the key content

Format your response as JSON with keys: podcastDescription, keyTopics (array), showNotes, enhancedTranscript"#.to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, applying an optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let podcast_path = custom_path.join("podcast.toml");
            if podcast_path.exists() {
                let content = std::fs::read_to_string(&podcast_path)?;
                prompts.podcast = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Placeholders are filled in a single pass, so substituted text is never
    /// rescanned. Unknown placeholders are left as written.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
