//! CLI module
//!
//! Command-line interface over the document store.
//!
//! # Commands
//!
//! - `render` - Parse an article body file
//! - `feed` - Load featured articles and regular batches
//! - `article` - Open one article, optionally liking or reading it
//! - `liked` - List the signed-in user's liked articles
//! - `cache` - Inspect or clear the image cache

mod commands;
mod runner;

pub use commands::{CacheAction, Cli, Commands, OutputFormat};
pub use runner::Runner;
