//! Configuration settings for Tubecast.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable consulted when no OpenAI key is configured.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable consulted when no RapidAPI key is configured.
pub const RAPIDAPI_KEY_ENV: &str = "RAPIDAPI_KEY";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub youtube: YoutubeSettings,
    pub transcript: TranscriptSettings,
    pub generation: GenerationSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// YouTube endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// oEmbed lookup endpoint for title, author and thumbnail.
    pub oembed_url: String,
    /// Base watch URL; the video ID is appended as the `v` query parameter.
    pub watch_url: String,
    /// Timeout for the metadata lookup, in seconds.
    pub timeout_secs: u64,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            oembed_url: "https://www.youtube.com/oembed".to_string(),
            watch_url: "https://www.youtube.com/watch".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Transcript provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Transcript endpoint; called with a `video_id` query parameter.
    pub endpoint: String,
    /// Value sent in the `X-RapidAPI-Host` header.
    pub rapidapi_host: String,
    /// RapidAPI key. Falls back to `RAPIDAPI_KEY` when unset.
    pub api_key: Option<String>,
    /// Timeout for the transcript request, in seconds.
    pub timeout_secs: u64,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://youtube-transcriptor.p.rapidapi.com/transcript".to_string(),
            rapidapi_host: "youtube-transcriptor.p.rapidapi.com".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Generative text settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Chat model used to write the episode copy.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum output tokens.
    pub max_tokens: u32,
    /// OpenAI API key. Falls back to `OPENAI_API_KEY` when unset.
    pub api_key: Option<String>,
    /// Override for the OpenAI API base URL.
    pub api_base: Option<String>,
    /// Timeout for the completion request, in seconds.
    pub timeout_secs: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4-turbo-preview".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            api_key: None,
            api_base: None,
            timeout_secs: 300,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::TubecastError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tubecast")
            .join("config.toml")
    }

    /// OpenAI key from config or environment. Empty values count as unset.
    pub fn openai_api_key(&self) -> Option<String> {
        resolve_secret(self.generation.api_key.as_deref(), OPENAI_API_KEY_ENV)
    }

    /// RapidAPI key from config or environment. Empty values count as unset.
    pub fn rapidapi_key(&self) -> Option<String> {
        resolve_secret(self.transcript.api_key.as_deref(), RAPIDAPI_KEY_ENV)
    }
}

fn resolve_secret(configured: Option<&str>, env_var: &str) -> Option<String> {
    configured
        .map(str::to_string)
        .or_else(|| std::env::var(env_var).ok())
        .filter(|key| !key.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.generation.model, "gpt-4-turbo-preview");
        assert_eq!(settings.generation.max_tokens, 2000);
        assert!((settings.generation.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [server]
            port = 8080

            [generation]
            model = "gpt-4o-mini"
            "#,
        )
        .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.generation.model, "gpt-4o-mini");
        assert_eq!(settings.generation.max_tokens, 2000);
        assert_eq!(settings.youtube.oembed_url, "https://www.youtube.com/oembed");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.server.port = 4242;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.server.port, 4242);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.server.port, 3000);
    }

    #[test]
    fn test_configured_key_wins_and_blank_is_unset() {
        assert_eq!(
            resolve_secret(Some("sk-test"), "TUBECAST_TEST_UNSET_VAR"),
            Some("sk-test".to_string())
        );
        assert_eq!(resolve_secret(Some("  "), "TUBECAST_TEST_UNSET_VAR"), None);
        assert_eq!(resolve_secret(None, "TUBECAST_TEST_UNSET_VAR"), None);
    }
}
