//! Feed types
//!
//! Session configuration, the view snapshot and the events published to a
//! presentation layer.

use crate::error::ErrorNotice;
use crate::pagination::{DEFAULT_BATCH_SIZE, FEATURED_THRESHOLD};
use crate::types::{Article, ArticleId};

/// Configuration for a feed session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    /// Cursor steps per batch
    pub batch_size: usize,
    /// Featured count that advances the handshake
    pub featured_threshold: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            featured_threshold: FEATURED_THRESHOLD,
        }
    }
}

impl FeedConfig {
    /// Create a new feed config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set batch size
    #[must_use]
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Set featured threshold
    #[must_use]
    pub fn with_featured_threshold(mut self, threshold: usize) -> Self {
        self.featured_threshold = threshold;
        self
    }
}

/// What the feed currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedView {
    /// Featured ids as fetched
    pub featured_ids: Vec<ArticleId>,
    /// Resolved featured articles
    pub featured: Vec<Article>,
    /// Regular articles, newest first
    pub articles: Vec<Article>,
    /// Last error shown to the user
    pub notice: ErrorNotice,
}

/// State change published by a feed session
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// Paginator initialised from the store's max index
    MaxIndexLoaded(i64),
    /// Featured ids replaced
    FeaturedIdsLoaded(Vec<ArticleId>),
    /// Featured articles replaced
    FeaturedLoaded(Vec<Article>),
    /// Regular articles appended
    ArticlesAppended(Vec<Article>),
    /// An error notice became visible
    Error(ErrorNotice),
    /// The whole view was cleared
    Reset,
}

impl FeedEvent {
    /// Check if this is an error event
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Check if this event added regular articles
    pub fn is_articles(&self) -> bool {
        matches!(self, Self::ArticlesAppended(_))
    }
}
