//! Repository module
//!
//! Async seams over the document store. The feed and reading sessions take
//! these traits by constructor injection so tests can substitute fakes.
//!
//! # Implementations
//!
//! - `MemoryStore` - in-process store, used by tests and demos
//! - `HttpStore` - REST document store reached through `HttpClient`

mod http;
mod memory;

pub use http::{HttpStore, IMAGE_TIMEOUT, LIKED_POSTS_ATTEMPTS, MAX_IMAGE_BYTES};
pub use memory::MemoryStore;

use crate::error::Result;
use crate::types::{Article, ArticleId, User};
use async_trait::async_trait;
use std::sync::Arc;

/// Max index used when the store has none or it does not parse
pub const DEFAULT_MAX_INDEX: i64 = 10;

/// Read and update access to article documents
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Fetch one article; `NotFound` when it does not exist
    async fn fetch_by_id(&self, id: &ArticleId) -> Result<Article>;

    /// Highest article ordinal currently published
    async fn fetch_max_index(&self) -> Result<i64>;

    /// Ids of the featured articles, in display order
    async fn fetch_top_indexes(&self) -> Result<Vec<ArticleId>>;

    /// Overwrite an article's likes count
    async fn update_likes(&self, id: &ArticleId, likes_count: i64) -> Result<()>;
}

/// Read and update access to the signed-in user's document
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the signed-in user; `Unauthenticated` without a session
    async fn fetch_current_user(&self) -> Result<User>;

    /// Store `prior_count + 1` as the user's read count
    async fn increment_articles_read(&self, user_id: &str, prior_count: i64) -> Result<()>;

    /// Add an article to the user's liked posts (set union).
    ///
    /// Concurrent writers must not drop each other's changes.
    async fn add_liked_post(&self, user_id: &str, article_id: &ArticleId) -> Result<()>;

    /// Remove an article from the user's liked posts
    async fn remove_liked_post(&self, user_id: &str, article_id: &ArticleId) -> Result<()>;

    /// Change the user's display name
    async fn change_name(&self, user_id: &str, name: &str) -> Result<()>;
}

/// Blob access for article images
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Fetch the image bytes for an article
    async fn fetch_image(&self, id: &ArticleId) -> Result<Vec<u8>>;
}

/// Parse the stored max index, falling back to [`DEFAULT_MAX_INDEX`]
pub fn parse_max_index(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|index| *index >= 0)
        .unwrap_or(DEFAULT_MAX_INDEX)
}

/// Featured ids, falling back to the single article `"0"`
pub fn top_indexes_or_default(ids: Option<Vec<ArticleId>>) -> Vec<ArticleId> {
    ids.unwrap_or_else(|| vec![ArticleId::from_index(0)])
}

#[async_trait]
impl<T: ArticleRepository + ?Sized> ArticleRepository for Arc<T> {
    async fn fetch_by_id(&self, id: &ArticleId) -> Result<Article> {
        (**self).fetch_by_id(id).await
    }

    async fn fetch_max_index(&self) -> Result<i64> {
        (**self).fetch_max_index().await
    }

    async fn fetch_top_indexes(&self) -> Result<Vec<ArticleId>> {
        (**self).fetch_top_indexes().await
    }

    async fn update_likes(&self, id: &ArticleId, likes_count: i64) -> Result<()> {
        (**self).update_likes(id, likes_count).await
    }
}

#[async_trait]
impl<T: UserRepository + ?Sized> UserRepository for Arc<T> {
    async fn fetch_current_user(&self) -> Result<User> {
        (**self).fetch_current_user().await
    }

    async fn increment_articles_read(&self, user_id: &str, prior_count: i64) -> Result<()> {
        (**self).increment_articles_read(user_id, prior_count).await
    }

    async fn add_liked_post(&self, user_id: &str, article_id: &ArticleId) -> Result<()> {
        (**self).add_liked_post(user_id, article_id).await
    }

    async fn remove_liked_post(&self, user_id: &str, article_id: &ArticleId) -> Result<()> {
        (**self).remove_liked_post(user_id, article_id).await
    }

    async fn change_name(&self, user_id: &str, name: &str) -> Result<()> {
        (**self).change_name(user_id, name).await
    }
}

#[async_trait]
impl<T: ImageRepository + ?Sized> ImageRepository for Arc<T> {
    async fn fetch_image(&self, id: &ArticleId) -> Result<Vec<u8>> {
        (**self).fetch_image(id).await
    }
}

#[cfg(test)]
mod tests;
