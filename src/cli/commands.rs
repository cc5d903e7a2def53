//! CLI commands and argument parsing

use crate::types::Language;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Readify command-line client
#[derive(Parser, Debug)]
#[command(name = "readify")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Content language (en or ru); overrides the stored setting
    #[arg(short, long, global = true, value_parser = parse_language)]
    pub language: Option<Language>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse an article body file and print its parts
    Render {
        /// File holding `+++`-delimited article text
        file: PathBuf,
    },

    /// Load the feed: featured articles plus regular batches
    Feed {
        /// Number of regular batches to load
        #[arg(long, default_value = "1")]
        pages: usize,
    },

    /// Open one article
    Article {
        /// Article id
        id: String,

        /// Toggle the like on this article
        #[arg(long)]
        like: bool,

        /// Keep the article open until the read countdown finishes
        #[arg(long)]
        read: bool,

        /// Download the article image through the cache
        #[arg(long)]
        image: bool,
    },

    /// List the signed-in user's liked articles
    Liked,

    /// Inspect or clear the image cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

/// Image cache actions
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAction {
    /// Print the cache size in megabytes
    Size,
    /// Remove cached images, keeping settings
    Clear,
    /// Store the `--language` value as the default
    SetLanguage,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Pretty-printed JSON
    Pretty,
    /// Human-readable text
    Text,
}

fn parse_language(raw: &str) -> Result<Language, String> {
    match raw.to_ascii_lowercase().as_str() {
        "en" => Ok(Language::En),
        "ru" => Ok(Language::Ru),
        other => Err(format!("unsupported language '{other}' (expected en or ru)")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from(["readify", "render", "body.txt"]).unwrap();
        assert!(matches!(cli.command, Commands::Render { ref file } if file.to_str() == Some("body.txt")));
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "readify", "feed", "--pages", "3", "-c", "readify.yaml", "--language", "RU", "-f", "text",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Feed { pages: 3 }));
        assert_eq!(cli.language, Some(Language::Ru));
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(cli.config.is_some());
    }

    #[test]
    fn test_parse_article_flags() {
        let cli = Cli::try_parse_from(["readify", "article", "7", "--like", "--image"]).unwrap();
        match cli.command {
            Commands::Article { id, like, read, image } => {
                assert_eq!(id, "7");
                assert!(like && image && !read);
            }
            other => panic!("Expected Article, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_cache_action() {
        let cli = Cli::try_parse_from(["readify", "cache", "clear"]).unwrap();
        assert!(matches!(cli.command, Commands::Cache { action: CacheAction::Clear }));
    }

    #[test]
    fn test_rejects_unknown_language() {
        assert!(Cli::try_parse_from(["readify", "liked", "--language", "de"]).is_err());
    }
}
