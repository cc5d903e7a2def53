//! Reading session
//!
//! State for one open article: like toggle, likes count and the read
//! countdown that credits the user when the article is closed.

use crate::error::{Error, ErrorNotice, Result};
use crate::markup::{self, TextPart};
use crate::pagination::resolve_all;
use crate::repository::{ArticleRepository, UserRepository};
use crate::types::{Article, ArticleId, Language, User};
use tracing::{debug, info, warn};

/// Seconds an article must stay open to count as read
pub const DEFAULT_READ_SECONDS: u32 = 60;

/// One open article
#[derive(Debug)]
pub struct ReadSession<R> {
    repo: R,
    article: Article,
    liked_posts: Vec<ArticleId>,
    user: Option<User>,
    liked: bool,
    likes_count: i64,
    time_left: u32,
    notice: ErrorNotice,
}

impl<R> ReadSession<R>
where
    R: ArticleRepository + UserRepository,
{
    /// Open an article with the caller's liked-posts list
    pub fn open(repo: R, article: Article, liked_posts: Vec<ArticleId>, user: Option<User>) -> Self {
        let liked = liked_posts.contains(&article.id);
        let likes_count = article.likes();
        debug!(id = %article.id, liked, likes_count, "Article opened");

        Self {
            repo,
            article,
            liked_posts,
            user,
            liked,
            likes_count,
            time_left: DEFAULT_READ_SECONDS,
            notice: ErrorNotice::default(),
        }
    }

    /// Set the countdown length
    #[must_use]
    pub fn with_read_seconds(mut self, seconds: u32) -> Self {
        self.time_left = seconds;
        self
    }

    /// Load the signed-in user if none was given.
    ///
    /// Without a session the article stays readable and nothing is
    /// credited.
    pub async fn load_user(&mut self) {
        if self.user.is_some() {
            return;
        }
        match self.repo.fetch_current_user().await {
            Ok(user) => self.user = Some(user),
            Err(e) => debug!(error = %e, "Reading without a user"),
        }
    }

    /// The open article
    pub fn article(&self) -> &Article {
        &self.article
    }

    /// The reader, when known
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Liked posts including local toggles
    pub fn liked_posts(&self) -> &[ArticleId] {
        &self.liked_posts
    }

    /// Whether the reader likes this article
    pub fn is_liked(&self) -> bool {
        self.liked
    }

    /// Likes count including local toggles
    pub fn likes_count(&self) -> i64 {
        self.likes_count
    }

    /// Seconds left on the countdown
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Last error shown to the reader
    pub fn notice(&self) -> &ErrorNotice {
        &self.notice
    }

    /// Hide the current error notice
    pub fn dismiss_error(&mut self) {
        self.notice.dismiss();
    }

    /// Body text split into styled parts
    pub fn parts(&self, language: Language) -> Vec<TextPart> {
        markup::parse(self.article.text(language))
    }

    /// Count one second down, stopping at zero
    pub fn tick(&mut self) -> u32 {
        self.time_left = self.time_left.saturating_sub(1);
        self.time_left
    }

    /// Flip the like and write it through.
    ///
    /// Local state changes first and stays changed when the store rejects
    /// the update; the failure becomes the current notice.
    pub async fn toggle_like(&mut self) -> bool {
        self.liked = !self.liked;
        let id = self.article.id.clone();
        if self.liked {
            self.likes_count += 1;
            if !self.liked_posts.contains(&id) {
                self.liked_posts.push(id.clone());
            }
        } else {
            self.likes_count -= 1;
            self.liked_posts.retain(|liked| *liked != id);
        }

        if let Err(e) = self.write_like(&id).await {
            warn!(%id, error = %e, "Failed to store like");
            self.notice = ErrorNotice::from_error(&e);
        }
        self.liked
    }

    async fn write_like(&self, id: &ArticleId) -> Result<()> {
        let user = self.user.as_ref().ok_or(Error::Unauthenticated)?;
        if self.liked {
            self.repo.add_liked_post(&user.id, id).await?;
        } else {
            self.repo.remove_liked_post(&user.id, id).await?;
        }
        self.repo.update_likes(id, self.likes_count).await
    }

    /// Close the article, crediting the read when the countdown finished.
    ///
    /// Returns whether a read was credited.
    pub async fn close(self) -> Result<bool> {
        if self.time_left > 0 {
            debug!(id = %self.article.id, time_left = self.time_left, "Closed before countdown");
            return Ok(false);
        }
        let Some(user) = self.user.as_ref() else {
            return Ok(false);
        };
        let Some(prior) = user.articles_read else {
            return Ok(false);
        };

        self.repo.increment_articles_read(&user.id, prior).await?;
        info!(user = %user.id, read = prior + 1, "Article read");
        Ok(true)
    }
}

/// Resolve a user's liked posts in order, failing on the first miss
pub async fn load_liked_articles<R>(repo: &R, ids: &[ArticleId]) -> Result<Vec<Article>>
where
    R: ArticleRepository + ?Sized,
{
    resolve_all(repo, ids).await
}
