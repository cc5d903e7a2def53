//! REST document store
//!
//! Collections map to paths under the store root:
//!
//! ```text
//! GET   articles/{id}            article document
//! PATCH articles/{id}            {"likes_count": n}
//! GET   maxIndex/0               {"max_index": "41"}
//! GET   topArticlesIndexes/0     {"top_articles_indexes": ["3", "7", ...]}
//! GET   users/{uid}              user document
//! PATCH users/{uid}              partial user document
//! GET   images/{id}.jpg          image bytes
//! ```

use super::{
    parse_max_index, top_indexes_or_default, ArticleRepository, ImageRepository, UserRepository,
};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::{Article, ArticleId, User};
use async_trait::async_trait;
use reqwest::header::{ETAG, IF_MATCH};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Largest image the store will download
pub const MAX_IMAGE_BYTES: u64 = 25 * 1024 * 1024;

/// Per-request timeout for image downloads
pub const IMAGE_TIMEOUT: Duration = Duration::from_secs(60);

/// Conditional liked-posts writes attempted before a conflict is returned
pub const LIKED_POSTS_ATTEMPTS: usize = 3;

#[derive(Debug, Deserialize)]
struct MaxIndexDoc {
    #[serde(default)]
    max_index: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TopIndexesDoc {
    #[serde(default)]
    top_articles_indexes: Option<Vec<ArticleId>>,
}

/// Repository backed by the REST document store
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: HttpClient,
}

impl HttpStore {
    /// Create a store over a configured client
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Get the underlying client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    async fn user_document(&self, user_id: &str) -> Result<User> {
        self.client.get_json(&format!("users/{user_id}")).await
    }

    async fn patch_user(&self, user_id: &str, fields: serde_json::Value) -> Result<()> {
        self.client
            .patch(&format!("users/{user_id}"), fields)
            .await?;
        Ok(())
    }

    /// Write the liked-posts array back after applying `update`.
    ///
    /// The store has no array operators, so this is a read-modify-write
    /// made conditional on the document's `ETag`. A `412` means another
    /// writer got in between; the read and the update are repeated up to
    /// [`LIKED_POSTS_ATTEMPTS`] times. A store that sends no `ETag` gets an
    /// unconditional write.
    async fn update_liked_posts<F>(&self, user_id: &str, update: F) -> Result<()>
    where
        F: Fn(&mut Vec<ArticleId>) + Send + Sync,
    {
        let path = format!("users/{user_id}");
        let mut attempt = 0;
        loop {
            attempt += 1;
            let response = self.client.get(&path).await?;
            let etag = response
                .headers()
                .get(ETAG)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let user: User = response.json().await?;

            let mut liked = user.liked_posts.unwrap_or_default();
            update(&mut liked);

            let mut request = RequestConfig::new().json(json!({ "liked_posts": liked }));
            if let Some(etag) = etag {
                request = request.header(IF_MATCH.as_str(), etag);
            }

            match self.client.request(Method::PATCH, &path, request).await {
                Ok(_) => return Ok(()),
                Err(Error::HttpStatus { status, .. })
                    if status == StatusCode::PRECONDITION_FAILED.as_u16()
                        && attempt < LIKED_POSTS_ATTEMPTS =>
                {
                    debug!(user_id, attempt, "Liked posts changed underneath, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Map a 404 from the store into `NotFound` for the requested id
fn not_found_as(id: &str, err: Error) -> Error {
    if err.is_not_found() {
        Error::not_found(id)
    } else {
        err
    }
}

#[async_trait]
impl ArticleRepository for HttpStore {
    async fn fetch_by_id(&self, id: &ArticleId) -> Result<Article> {
        debug!(%id, "Fetching article");
        self.client
            .get_json(&format!("articles/{id}"))
            .await
            .map_err(|e| not_found_as(id.as_str(), e))
    }

    async fn fetch_max_index(&self) -> Result<i64> {
        let doc: MaxIndexDoc = self.client.get_json("maxIndex/0").await?;
        Ok(parse_max_index(doc.max_index.as_deref()))
    }

    async fn fetch_top_indexes(&self) -> Result<Vec<ArticleId>> {
        let doc: TopIndexesDoc = self.client.get_json("topArticlesIndexes/0").await?;
        Ok(top_indexes_or_default(doc.top_articles_indexes))
    }

    async fn update_likes(&self, id: &ArticleId, likes_count: i64) -> Result<()> {
        self.client
            .patch(
                &format!("articles/{id}"),
                json!({ "likes_count": likes_count }),
            )
            .await
            .map_err(|e| not_found_as(id.as_str(), e))?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for HttpStore {
    async fn fetch_current_user(&self) -> Result<User> {
        let session = self.client.authenticator().current_session().await?;
        self.user_document(&session.uid).await
    }

    async fn increment_articles_read(&self, user_id: &str, prior_count: i64) -> Result<()> {
        self.patch_user(user_id, json!({ "articles_read": prior_count + 1 }))
            .await
    }

    async fn add_liked_post(&self, user_id: &str, article_id: &ArticleId) -> Result<()> {
        self.update_liked_posts(user_id, |liked| {
            if !liked.contains(article_id) {
                liked.push(article_id.clone());
            }
        })
        .await
    }

    async fn remove_liked_post(&self, user_id: &str, article_id: &ArticleId) -> Result<()> {
        self.update_liked_posts(user_id, |liked| liked.retain(|id| id != article_id))
            .await
    }

    async fn change_name(&self, user_id: &str, name: &str) -> Result<()> {
        self.patch_user(user_id, json!({ "name": name })).await
    }
}

#[async_trait]
impl ImageRepository for HttpStore {
    async fn fetch_image(&self, id: &ArticleId) -> Result<Vec<u8>> {
        let path = format!("images/{id}.jpg");
        self.client
            .get_bytes(
                &path,
                MAX_IMAGE_BYTES,
                RequestConfig::new().timeout(IMAGE_TIMEOUT),
            )
            .await
            .map_err(|e| not_found_as(id.as_str(), e))
    }
}
