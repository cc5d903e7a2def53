//! Pagination types
//!
//! Cursor state, the featured exclusion list and batch results.

use crate::error::{Error, ErrorNotice};
use crate::types::{Article, ArticleId};

/// Cursor steps performed by one batch
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Featured count that triggers the next loading stage
pub const FEATURED_THRESHOLD: usize = 5;

/// Ordered list of featured ids excluded from regular paging.
///
/// Duplicates are kept as given; the store is responsible for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeaturedSet {
    ids: Vec<ArticleId>,
}

impl FeaturedSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the id is featured
    pub fn contains(&self, id: &ArticleId) -> bool {
        self.ids.contains(id)
    }

    /// Whether the ordinal's id is featured
    pub fn contains_index(&self, index: u64) -> bool {
        self.contains(&ArticleId::from_index(index))
    }

    /// Append an id
    pub fn push(&mut self, id: ArticleId) {
        self.ids.push(id);
    }

    /// Number of ids
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in insertion order
    pub fn ids(&self) -> &[ArticleId] {
        &self.ids
    }
}

impl From<Vec<ArticleId>> for FeaturedSet {
    fn from(ids: Vec<ArticleId>) -> Self {
        Self { ids }
    }
}

impl FromIterator<ArticleId> for FeaturedSet {
    fn from_iter<I: IntoIterator<Item = ArticleId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Cursor state of one feed session.
///
/// `from_index` is `-1` both before initialisation and once every ordinal
/// has been visited; it never goes lower.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    /// Next ordinal to visit
    pub from_index: i64,
    /// Upper bound fixed at initialisation
    pub max_index: Option<i64>,
    /// Ids excluded from paging
    pub featured: FeaturedSet,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            from_index: -1,
            max_index: None,
            featured: FeaturedSet::new(),
        }
    }
}

impl PaginationState {
    /// Create an uninitialised state
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `initialize` has run
    pub fn is_initialized(&self) -> bool {
        self.max_index.is_some()
    }

    /// Whether any ordinal is left to visit
    pub fn has_more(&self) -> bool {
        self.from_index >= 0
    }
}

/// Result of one tolerant batch
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Resolved articles, highest ordinal first
    pub articles: Vec<Article>,
    /// Ids that could not be resolved
    pub missing: Vec<ArticleId>,
    /// Ids the batch attempted, in order
    pub requested: Vec<ArticleId>,
}

impl BatchOutcome {
    /// Whether some requested articles were skipped
    pub fn is_partial(&self) -> bool {
        !self.missing.is_empty()
    }

    /// The aggregate failure, reported once per batch
    pub fn error(&self) -> Option<Error> {
        self.is_partial().then(|| Error::PartialBatchFailure {
            missing: self.missing.len(),
        })
    }

    /// Display form of [`BatchOutcome::error`]
    pub fn notice(&self) -> Option<ErrorNotice> {
        self.error().map(|e| ErrorNotice::from_error(&e))
    }
}
