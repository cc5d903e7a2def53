// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Readify core
//!
//! Client-side core of the Readify article reader: most-recent-first feed
//! pagination over ordinal article ids, the `+++` article markup parser and
//! the reading session around one open article.
//!
//! ## Features
//!
//! - **Feed pagination**: fixed-step batches that skip featured articles
//! - **Two-stage handshake**: featured ids, then featured articles, then the first batch
//! - **Markup parsing**: title, subtitle, bold, bullet and plain blocks
//! - **Reading sessions**: likes, read countdown, relative dates in English and Russian
//! - **Image cache**: file-backed base64 store next to the language setting
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use readify_core::feed::FeedSession;
//! use readify_core::repository::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> readify_core::Result<()> {
//!     let store = MemoryStore::with_articles(30);
//!     let mut session = FeedSession::new(store);
//!
//!     session.start().await?;
//!     session.load_more().await?;
//!
//!     for article in &session.view().articles {
//!         println!("{}", article.id);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                FeedSession          ReadSession                 │
//! │  start → featured ids → featured → batch     like / read / close│
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──┬──────────────┬───────────────┐
//! │  Pagination  │    Repository    │    Markup    │     Cache     │
//! ├──────────────┼──────────────────┼──────────────┼───────────────┤
//! │ Cursor       │ ArticleRepository│ +++ blocks   │ base64 images │
//! │ Featured set │ UserRepository   │ *** ** * -   │ language      │
//! │ Fail-fast    │ Http / Memory    │              │ atomic writes │
//! └──────────────┴──────────────────┴──────────────┴───────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Article, user and id types
pub mod types;

/// Credentials and the signed-in session
pub mod auth;

/// HTTP client with rate limiting
pub mod http;

/// Article body markup
pub mod markup;

/// Most-recent-first paging
pub mod pagination;

/// Document store seams and implementations
pub mod repository;

/// Feed session and handshake
pub mod feed;

/// Reading session, dates and count words
pub mod reading;

/// Image cache and language setting
pub mod cache;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorNotice, Result};
pub use types::*;

// Re-export commonly used types
pub use config::ReadifyConfig;
pub use feed::{FeedSession, FeedView};
pub use markup::{parse, PartKind, TextPart};
pub use pagination::FeedPaginator;
pub use reading::ReadSession;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
