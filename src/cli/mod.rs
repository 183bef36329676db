//! CLI module for Tubecast.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Tubecast - YouTube to Podcast Converter
///
/// Turns a YouTube video into podcast episode copy: description, key topics,
/// show notes and an enhanced transcript.
#[derive(Parser, Debug)]
#[command(name = "tubecast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (form UI and conversion API)
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(long, env = "TUBECAST_HOST")]
        host: Option<String>,

        /// Port to bind to (defaults to the configured port)
        #[arg(short, long, env = "TUBECAST_PORT")]
        port: Option<u16>,
    },

    /// Convert a single video and print the result
    Convert {
        /// YouTube URL or video ID
        url: String,

        /// Print the raw JSON result instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Check API keys and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the current configuration to the config file
    Init,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["tubecast", "-vv", "serve", "--port", "8080"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Serve { port, .. } => assert_eq!(port, Some(8080)),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from(["tubecast", "convert", "https://youtu.be/dQw4w9WgXcQ", "--json"])
            .unwrap();
        match cli.command {
            Commands::Convert { url, json } => {
                assert_eq!(url, "https://youtu.be/dQw4w9WgXcQ");
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
