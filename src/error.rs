//! Error types for Tubecast.

use thiserror::Error;

/// Library-level error type for Tubecast operations.
#[derive(Error, Debug)]
pub enum TubecastError {
    #[error("YouTube URL is required")]
    MissingUrl,

    #[error("Invalid YouTube URL")]
    InvalidUrl,

    /// Metadata lookup failed. The reason is kept for logs only; callers see
    /// the generic message.
    #[error("Failed to fetch video information")]
    VideoInfo { reason: String },

    #[error("Video not found: {0}")]
    VideoNotFound(String),

    #[error("Transcript unavailable: {0}")]
    Transcript(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),
}

impl TubecastError {
    /// Whether the error was caused by the caller's input rather than an
    /// upstream or internal failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, TubecastError::MissingUrl | TubecastError::InvalidUrl)
    }
}

/// Result type alias for Tubecast operations.
pub type Result<T> = std::result::Result<T, TubecastError>;
