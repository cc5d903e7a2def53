//! CLI runner - executes commands

use crate::cache::ImageCache;
use crate::cli::commands::{CacheAction, Cli, Commands, OutputFormat};
use crate::config::ReadifyConfig;
use crate::error::{Error, Result};
use crate::feed::FeedSession;
use crate::markup;
use crate::reading::{load_liked_articles, relative_date, ReadSession};
use crate::repository::{ArticleRepository, HttpStore, UserRepository};
use crate::types::{Article, ArticleId, Language};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Render { file } => self.render(file),
            Commands::Feed { pages } => self.feed(*pages).await,
            Commands::Article {
                id,
                like,
                read,
                image,
            } => self.article(id, *like, *read, *image).await,
            Commands::Liked => self.liked().await,
            Commands::Cache { action } => self.cache(*action).await,
        }
    }

    /// Load configuration, falling back to defaults without `-c`
    fn load_config(&self) -> Result<ReadifyConfig> {
        match &self.cli.config {
            Some(path) => ReadifyConfig::from_file(path),
            None => Ok(ReadifyConfig::default()),
        }
    }

    /// `--language`, then the stored setting, then the config file
    async fn language(&self, config: &ReadifyConfig, cache: &ImageCache) -> Language {
        match self.cli.language {
            Some(language) => language,
            None => cache.stored_language().await.unwrap_or(config.language),
        }
    }

    /// Print article body parts
    fn render(&self, file: &Path) -> Result<()> {
        if !file.exists() {
            return Err(Error::FileNotFound {
                path: file.display().to_string(),
            });
        }
        let text = fs::read_to_string(file)?;

        for part in markup::parse(&text) {
            self.output(
                &json!({
                    "type": "part",
                    "kind": part.kind,
                    "content": &part.content,
                }),
                &part.to_string(),
            );
        }
        Ok(())
    }

    /// Load featured articles and `pages` regular batches
    async fn feed(&self, pages: usize) -> Result<()> {
        let config = self.load_config()?;
        let cache = config.image_cache()?;
        let language = self.language(&config, &cache).await;
        let store = config.http_store()?;

        let mut session = FeedSession::with_config(store, config.feed_config());
        let handle = session.shutdown_handle();
        let ctrl_c = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                handle.shutdown();
            }
        });

        let loaded = Self::load_feed(&mut session, pages).await;
        ctrl_c.abort();
        loaded?;

        let now = Utc::now();
        let view = session.view();
        for article in &view.featured {
            self.output_article(article, language, true, now);
        }
        for article in &view.articles {
            self.output_article(article, language, false, now);
        }
        if view.notice.visible {
            self.output_error(&view.notice.message);
        }

        self.output(
            &json!({
                "type": "feed",
                "featured": view.featured.len(),
                "articles": view.articles.len(),
                "from_index": session.pagination().from_index,
                "has_more": session.can_load_more(),
            }),
            &format!(
                "{} featured, {} articles, more: {}",
                view.featured.len(),
                view.articles.len(),
                session.can_load_more()
            ),
        );
        Ok(())
    }

    async fn load_feed<R: ArticleRepository>(
        session: &mut FeedSession<R>,
        pages: usize,
    ) -> Result<()> {
        session.start().await?;
        for _ in 1..pages {
            if !session.can_load_more() {
                break;
            }
            session.load_more().await?;
        }
        Ok(())
    }

    /// Open one article, optionally liking it and reading it to the end
    async fn article(&self, id: &str, like: bool, read: bool, image: bool) -> Result<()> {
        let config = self.load_config()?;
        let cache = config.image_cache()?;
        let language = self.language(&config, &cache).await;
        let store = Arc::new(config.http_store()?);

        let id = ArticleId::new(id);
        let article = store.fetch_by_id(&id).await?;
        let user = match store.fetch_current_user().await {
            Ok(user) => Some(user),
            Err(e) => {
                debug!(error = %e, "Opening article without a user");
                None
            }
        };
        let liked_posts = user.as_ref().map(|u| u.liked().to_vec()).unwrap_or_default();

        let mut session = ReadSession::open(Arc::clone(&store), article, liked_posts, user)
            .with_read_seconds(config.reading.read_seconds);

        self.output_article(session.article(), language, false, Utc::now());
        for part in session.parts(language) {
            self.output(
                &json!({
                    "type": "part",
                    "kind": part.kind,
                    "content": &part.content,
                }),
                &part.to_string(),
            );
        }

        if image {
            match cache.image_or_fetch(&id, &*store).await {
                Ok(bytes) => self.output(
                    &json!({"type": "image", "id": id, "bytes": bytes.len()}),
                    &format!("image: {} bytes", bytes.len()),
                ),
                Err(e) => self.output_error(&e.to_string()),
            }
        }

        if like {
            let liked = session.toggle_like().await;
            self.output(
                &json!({"type": "like", "liked": liked, "likes": session.likes_count()}),
                &format!("liked: {liked} ({} likes)", session.likes_count()),
            );
            if session.notice().visible {
                self.output_error(&session.notice().message);
            }
        }

        if read {
            let mut ticker = tokio::time::interval(Duration::from_secs(1));
            ticker.tick().await;
            while session.time_left() > 0 {
                ticker.tick().await;
                session.tick();
            }
        }

        let credited = session.close().await?;
        self.output(
            &json!({"type": "read", "credited": credited}),
            &format!("read credited: {credited}"),
        );
        Ok(())
    }

    /// List the signed-in user's liked articles
    async fn liked(&self) -> Result<()> {
        let config = self.load_config()?;
        let cache = config.image_cache()?;
        let language = self.language(&config, &cache).await;
        let store: HttpStore = config.http_store()?;

        let user = store.fetch_current_user().await?;
        let articles = load_liked_articles(&store, user.liked()).await?;

        let now = Utc::now();
        for article in &articles {
            self.output_article(article, language, false, now);
        }
        Ok(())
    }

    /// Image cache maintenance
    async fn cache(&self, action: CacheAction) -> Result<()> {
        let config = self.load_config()?;
        let cache = config.image_cache()?;

        match action {
            CacheAction::Size => {
                let size_mb = cache.size_mb().await;
                let images = cache.image_count().await;
                self.output(
                    &json!({"type": "cache", "size_mb": size_mb, "images": images}),
                    &format!("{size_mb:.2} MB in {images} images"),
                );
            }
            CacheAction::Clear => {
                cache.clear().await?;
                self.output(&json!({"type": "cache", "cleared": true}), "cache cleared");
            }
            CacheAction::SetLanguage => {
                let language = self
                    .cli
                    .language
                    .ok_or_else(|| Error::config("cache set-language requires --language"))?;
                cache.set_language(language).await?;
                self.output(
                    &json!({"type": "cache", "language": language.code()}),
                    &format!("language set to {}", language.code()),
                );
            }
        }
        Ok(())
    }

    fn output_article(&self, article: &Article, language: Language, featured: bool, now: DateTime<Utc>) {
        let date = article
            .date_created
            .map(|created| relative_date(created, now, language));
        let title = article.title(language);

        self.output(
            &json!({
                "type": "article",
                "id": article.id,
                "title": title,
                "description": article.description(language),
                "likes": article.likes(),
                "premium": article.is_premium.unwrap_or(false),
                "featured": featured,
                "date": &date,
            }),
            &format!(
                "{}[{}] {} ({} likes{})",
                if featured { "* " } else { "" },
                article.id,
                title,
                article.likes(),
                date.as_deref().map(|d| format!(", {d}")).unwrap_or_default()
            ),
        );
    }

    fn output_error(&self, message: &str) {
        self.output(
            &json!({"type": "error", "message": message}),
            &format!("error: {message}"),
        );
    }

    /// Output a message in the selected format
    fn output(&self, msg: &Value, text: &str) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
            OutputFormat::Text => println!("{text}"),
        }
    }
}
