//! Feed paginator
//!
//! Selection is plain arithmetic over [`PaginationState`]; resolution goes
//! through the injected [`ArticleRepository`].

use super::types::{BatchOutcome, FeaturedSet, PaginationState};
use crate::error::{Error, Result};
use crate::repository::ArticleRepository;
use crate::types::{Article, ArticleId};
use futures::future::try_join_all;
use tracing::{debug, warn};

/// Pages backward through article ordinals, skipping featured ids
#[derive(Debug)]
pub struct FeedPaginator<R> {
    repo: R,
    state: PaginationState,
}

impl<R: ArticleRepository> FeedPaginator<R> {
    /// Create an uninitialised paginator over a repository
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            state: PaginationState::new(),
        }
    }

    /// Get the repository
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Current cursor state
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Replace cursor and featured set in one step
    pub fn replace_state(&mut self, state: PaginationState) {
        self.state = state;
    }

    /// Start paging from `max_index`, highest ordinal first
    pub fn initialize(&mut self, max_index: i64) {
        let max_index = max_index.max(-1);
        debug!(max_index, "Paginator initialised");
        self.state.max_index = Some(max_index);
        self.state.from_index = max_index;
    }

    /// Set the ids excluded from paging
    pub fn set_featured(&mut self, featured: FeaturedSet) {
        self.state.featured = featured;
    }

    /// Whether another batch can yield anything
    pub fn has_more(&self) -> bool {
        self.state.has_more()
    }

    /// Ids the next `batch_size` steps would request, without moving
    pub fn peek(&self, batch_size: usize) -> Vec<ArticleId> {
        select(&self.state, batch_size)
    }

    /// Perform `batch_size` cursor steps and return the ids to request.
    ///
    /// The cursor stops at `-1`; steps past it select nothing.
    pub fn advance(&mut self, batch_size: usize) -> Vec<ArticleId> {
        let ids = select(&self.state, batch_size);
        let steps = i64::try_from(batch_size).unwrap_or(i64::MAX);
        self.state.from_index = self.state.from_index.saturating_sub(steps).max(-1);
        ids
    }

    /// Load the next batch, skipping articles that fail to resolve.
    ///
    /// Ids are requested one at a time in cursor order. Failures are
    /// collected into [`BatchOutcome::missing`] rather than returned.
    pub async fn next_batch(&mut self, batch_size: usize) -> BatchOutcome {
        let requested = self.advance(batch_size);
        let mut outcome = BatchOutcome {
            requested: requested.clone(),
            ..Default::default()
        };

        for id in requested {
            match self.repo.fetch_by_id(&id).await {
                Ok(article) => outcome.articles.push(article),
                Err(e) => {
                    debug!(%id, error = %e, "Skipping article");
                    outcome.missing.push(id);
                }
            }
        }

        if outcome.is_partial() {
            warn!(
                missing = outcome.missing.len(),
                "Some articles were not found"
            );
        }
        debug!(
            loaded = outcome.articles.len(),
            from_index = self.state.from_index,
            "Batch loaded"
        );
        outcome
    }

    /// Resolve featured ids, failing on the first error.
    ///
    /// Lookups run concurrently; the result keeps the order of `ids`.
    pub async fn load_featured(&self, ids: &[ArticleId]) -> Result<Vec<Article>> {
        resolve_all(&self.repo, ids).await
    }
}

/// Resolve every id concurrently, keeping input order.
///
/// The first failure wins and is wrapped in `FailFastBatchFailure`.
pub async fn resolve_all<R>(repo: &R, ids: &[ArticleId]) -> Result<Vec<Article>>
where
    R: ArticleRepository + ?Sized,
{
    let lookups = ids.iter().map(|id| async move {
        repo.fetch_by_id(id)
            .await
            .map_err(|e| Error::fail_fast(id.as_str(), e))
    });

    try_join_all(lookups).await
}

/// Ids selected by `batch_size` steps from the current cursor
fn select(state: &PaginationState, batch_size: usize) -> Vec<ArticleId> {
    let mut ids = Vec::new();
    let mut index = state.from_index;

    for _ in 0..batch_size {
        if index < 0 {
            break;
        }
        let id = ArticleId::from_index(index as u64);
        if !state.featured.contains(&id) {
            ids.push(id);
        }
        index -= 1;
    }
    ids
}
