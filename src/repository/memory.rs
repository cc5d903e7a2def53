//! In-memory document store

use super::{
    parse_max_index, top_indexes_or_default, ArticleRepository, ImageRepository, UserRepository,
};
use crate::error::{Error, Result};
use crate::types::{Article, ArticleId, User};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Documents {
    articles: HashMap<ArticleId, Article>,
    images: HashMap<ArticleId, Vec<u8>>,
    max_index: Option<String>,
    top_indexes: Option<Vec<ArticleId>>,
    users: HashMap<String, User>,
    current_uid: Option<String>,
    broken: HashSet<ArticleId>,
    fetch_log: Vec<ArticleId>,
}

/// Store holding every collection in memory.
///
/// Records the id of every `fetch_by_id` call so callers can assert on
/// the exact requests a component made.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<Documents>,
    latency: Option<Duration>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with articles `0..=max_index` and a stored max index
    pub fn with_articles(max_index: u64) -> Self {
        let mut docs = Documents::default();
        for index in 0..=max_index {
            let id = ArticleId::from_index(index);
            let article = Article::new(id.clone()).with_en_title(format!("Article {index}"));
            docs.articles.insert(id, article);
        }
        docs.max_index = Some(max_index.to_string());

        Self {
            docs: RwLock::new(docs),
            latency: None,
        }
    }

    /// Delay every call by `latency`
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Insert or replace an article
    pub async fn insert_article(&self, article: Article) {
        self.docs
            .write()
            .await
            .articles
            .insert(article.id.clone(), article);
    }

    /// Remove an article so lookups report `NotFound`
    pub async fn remove_article(&self, id: &ArticleId) {
        self.docs.write().await.articles.remove(id);
    }

    /// Make lookups of an existing article fail with a server error
    pub async fn break_article(&self, id: &ArticleId) {
        self.docs.write().await.broken.insert(id.clone());
    }

    /// Store an image blob
    pub async fn insert_image(&self, id: &ArticleId, bytes: Vec<u8>) {
        self.docs.write().await.images.insert(id.clone(), bytes);
    }

    /// Set the raw max index document value
    pub async fn set_max_index(&self, raw: Option<&str>) {
        self.docs.write().await.max_index = raw.map(String::from);
    }

    /// Set the featured ids document
    pub async fn set_top_indexes(&self, ids: Option<Vec<ArticleId>>) {
        self.docs.write().await.top_indexes = ids;
    }

    /// Insert a user and mark them as signed in
    pub async fn sign_in(&self, user: User) {
        let mut docs = self.docs.write().await;
        docs.current_uid = Some(user.id.clone());
        docs.users.insert(user.id.clone(), user);
    }

    /// Forget the signed-in user
    pub async fn sign_out(&self) {
        self.docs.write().await.current_uid = None;
    }

    /// Look up a user document
    pub async fn user(&self, user_id: &str) -> Option<User> {
        self.docs.read().await.users.get(user_id).cloned()
    }

    /// Look up an article document
    pub async fn article(&self, id: &ArticleId) -> Option<Article> {
        self.docs.read().await.articles.get(id).cloned()
    }

    /// Ids passed to `fetch_by_id`, in call order
    pub async fn fetch_log(&self) -> Vec<ArticleId> {
        self.docs.read().await.fetch_log.clone()
    }

    /// Clear the fetch log
    pub async fn clear_fetch_log(&self) {
        self.docs.write().await.fetch_log.clear();
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    async fn update_user<F>(&self, user_id: &str, update: F) -> Result<()>
    where
        F: FnOnce(&mut User) + Send,
    {
        self.simulate_latency().await;
        let mut docs = self.docs.write().await;
        let user = docs
            .users
            .get_mut(user_id)
            .ok_or_else(|| Error::Other(format!("User '{user_id}' not found")))?;
        update(user);
        Ok(())
    }
}

#[async_trait]
impl ArticleRepository for MemoryStore {
    async fn fetch_by_id(&self, id: &ArticleId) -> Result<Article> {
        self.simulate_latency().await;
        let mut docs = self.docs.write().await;
        docs.fetch_log.push(id.clone());

        if docs.broken.contains(id) {
            return Err(Error::http_status(500, format!("article {id} unavailable")));
        }
        docs.articles
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found(id.as_str()))
    }

    async fn fetch_max_index(&self) -> Result<i64> {
        self.simulate_latency().await;
        let docs = self.docs.read().await;
        Ok(parse_max_index(docs.max_index.as_deref()))
    }

    async fn fetch_top_indexes(&self) -> Result<Vec<ArticleId>> {
        self.simulate_latency().await;
        let docs = self.docs.read().await;
        Ok(top_indexes_or_default(docs.top_indexes.clone()))
    }

    async fn update_likes(&self, id: &ArticleId, likes_count: i64) -> Result<()> {
        self.simulate_latency().await;
        let mut docs = self.docs.write().await;
        let article = docs
            .articles
            .get_mut(id)
            .ok_or_else(|| Error::not_found(id.as_str()))?;
        article.likes_count = Some(likes_count);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn fetch_current_user(&self) -> Result<User> {
        self.simulate_latency().await;
        let docs = self.docs.read().await;
        let uid = docs.current_uid.as_ref().ok_or(Error::Unauthenticated)?;
        docs.users
            .get(uid)
            .cloned()
            .ok_or_else(|| Error::Other(format!("User '{uid}' not found")))
    }

    async fn increment_articles_read(&self, user_id: &str, prior_count: i64) -> Result<()> {
        self.update_user(user_id, |user| {
            user.articles_read = Some(prior_count + 1);
        })
        .await
    }

    async fn add_liked_post(&self, user_id: &str, article_id: &ArticleId) -> Result<()> {
        let article_id = article_id.clone();
        self.update_user(user_id, move |user| {
            let liked = user.liked_posts.get_or_insert_with(Vec::new);
            if !liked.contains(&article_id) {
                liked.push(article_id);
            }
        })
        .await
    }

    async fn remove_liked_post(&self, user_id: &str, article_id: &ArticleId) -> Result<()> {
        self.update_user(user_id, |user| {
            if let Some(liked) = user.liked_posts.as_mut() {
                liked.retain(|id| id != article_id);
            }
        })
        .await
    }

    async fn change_name(&self, user_id: &str, name: &str) -> Result<()> {
        self.update_user(user_id, |user| {
            user.name = Some(name.to_string());
        })
        .await
    }
}

#[async_trait]
impl ImageRepository for MemoryStore {
    async fn fetch_image(&self, id: &ArticleId) -> Result<Vec<u8>> {
        self.simulate_latency().await;
        self.docs
            .read()
            .await
            .images
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("images/{id}.jpg")))
    }
}
