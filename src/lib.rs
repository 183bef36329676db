//! Tubecast - YouTube to Podcast Converter
//!
//! Turns a YouTube video into podcast episode copy: a description, key
//! topics, show notes and an enhanced transcript.
//!
//! # Overview
//!
//! A conversion runs four steps in order:
//! - Resolve the video ID from a URL or bare ID
//! - Look up title, channel and thumbnail via oEmbed
//! - Fetch a transcript, falling back to placeholder text
//! - Ask a chat model for the episode copy, falling back to a template
//!
//! Only bad input and a failed metadata lookup can fail a conversion.
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `video_source` - ID extraction, metadata and transcript fetching
//! - `podcast` - Episode copy generation and response parsing
//! - `orchestrator` - Pipeline coordination
//! - `cli` - Command line interface and HTTP server
//!
//! # Example
//!
//! ```rust,no_run
//! use tubecast::config::Settings;
//! use tubecast::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let result = orchestrator.convert(Some("https://youtu.be/dQw4w9WgXcQ")).await?;
//!     println!("{}: {:?}", result.title, result.key_topics);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod orchestrator;
pub mod podcast;
pub mod video_source;

pub use error::{Result, TubecastError};
