//! Feed session
//!
//! Owns the paginator and the view for one feed screen. Every operation
//! takes `&mut self`, so a reset can never interleave with a load of the
//! same session.

use super::types::{FeedConfig, FeedEvent, FeedView};
use crate::error::{Error, ErrorNotice, Result};
use crate::pagination::{FeaturedSet, FeedPaginator, PaginationState};
use crate::repository::ArticleRepository;
use crate::types::{Article, ArticleId};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Tears a session down from another task.
///
/// Repository calls in flight when `shutdown` fires are abandoned and
/// their results dropped.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownHandle {
    /// Signal the session to stop
    pub fn shutdown(&self) {
        self.tx.send_replace(true);
    }

    /// Whether shutdown was signalled
    pub fn is_shutdown(&self) -> bool {
        *self.tx.borrow()
    }
}

/// One feed view's loading state
#[derive(Debug)]
pub struct FeedSession<R> {
    paginator: FeedPaginator<R>,
    view: FeedView,
    config: FeedConfig,
    events: Option<mpsc::UnboundedSender<FeedEvent>>,
    shutdown: ShutdownHandle,
    shutdown_rx: watch::Receiver<bool>,
}

impl<R: ArticleRepository> FeedSession<R> {
    /// Create a session with the default config
    pub fn new(repo: R) -> Self {
        Self::with_config(repo, FeedConfig::default())
    }

    /// Create a session with a custom config
    pub fn with_config(repo: R, config: FeedConfig) -> Self {
        let (tx, shutdown_rx) = watch::channel(false);
        Self {
            paginator: FeedPaginator::new(repo),
            view: FeedView::default(),
            config,
            events: None,
            shutdown: ShutdownHandle { tx: Arc::new(tx) },
            shutdown_rx,
        }
    }

    /// Receive state changes from now on; replaces any earlier subscriber
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<FeedEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        rx
    }

    /// Handle for tearing the session down
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Tear the session down
    pub fn shutdown(&self) {
        self.shutdown.shutdown();
    }

    /// What the feed currently shows
    pub fn view(&self) -> &FeedView {
        &self.view
    }

    /// Cursor state
    pub fn pagination(&self) -> &PaginationState {
        self.paginator.state()
    }

    /// Session config
    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Hide the current error notice
    pub fn dismiss_error(&mut self) {
        self.view.notice.dismiss();
    }

    /// Whether "load more" should be offered
    pub fn can_load_more(&self) -> bool {
        !self.view.articles.is_empty() && self.paginator.has_more()
    }

    /// Fetch the max index and featured ids, then run the handshake.
    ///
    /// Both lookups run together; a failure of either becomes a notice
    /// and the other still applies. Once the max index is known the session
    /// is running and this does nothing; use [`refresh`](Self::refresh).
    pub async fn start(&mut self) -> Result<()> {
        if self.paginator.state().is_initialized() {
            debug!("Feed already started");
            return Ok(());
        }

        let repo = self.paginator.repository();
        let (max_index, top_indexes) = self
            .guard(async { tokio::join!(repo.fetch_max_index(), repo.fetch_top_indexes()) })
            .await?;

        match max_index {
            Ok(max_index) => {
                self.paginator.initialize(max_index);
                self.emit(FeedEvent::MaxIndexLoaded(max_index));
            }
            Err(e) => self.report(&e),
        }

        match top_indexes {
            Ok(ids) => self.set_featured_ids(ids).await,
            Err(e) => {
                self.report(&e);
                Ok(())
            }
        }
    }

    /// Stage one: record featured ids; loads them once the threshold is hit
    pub async fn set_featured_ids(&mut self, ids: Vec<ArticleId>) -> Result<()> {
        self.paginator.set_featured(FeaturedSet::from(ids.clone()));
        self.view.featured_ids = ids.clone();
        self.emit(FeedEvent::FeaturedIdsLoaded(ids.clone()));

        if ids.len() != self.config.featured_threshold {
            debug!(
                count = ids.len(),
                threshold = self.config.featured_threshold,
                "Featured ids below threshold, waiting"
            );
            return Ok(());
        }

        let loaded = self.guard(self.paginator.load_featured(&ids)).await?;
        match loaded {
            Ok(articles) => self.set_featured_articles(articles).await,
            Err(e) => {
                self.report(&e);
                Ok(())
            }
        }
    }

    /// Stage two: record featured articles; loads the first regular batch
    /// once the threshold is hit
    pub async fn set_featured_articles(&mut self, articles: Vec<Article>) -> Result<()> {
        let count = articles.len();
        self.view.featured = articles.clone();
        self.emit(FeedEvent::FeaturedLoaded(articles));

        if count == self.config.featured_threshold {
            self.load_batch().await
        } else {
            Ok(())
        }
    }

    /// Load one more batch if the view offers "load more"
    pub async fn load_more(&mut self) -> Result<()> {
        if !self.can_load_more() {
            debug!("Nothing more to load");
            return Ok(());
        }
        self.load_batch().await
    }

    /// Clear cursor, featured state and articles together, then start over
    pub async fn refresh(&mut self) -> Result<()> {
        info!("Refreshing feed");
        self.paginator.replace_state(PaginationState::new());
        self.view = FeedView::default();
        self.emit(FeedEvent::Reset);
        self.start().await
    }

    async fn load_batch(&mut self) -> Result<()> {
        let batch_size = self.config.batch_size;
        let mut shutdown = self.shutdown_rx.clone();
        let outcome = cancellable(&mut shutdown, self.paginator.next_batch(batch_size)).await?;

        if !outcome.articles.is_empty() {
            self.view.articles.extend(outcome.articles.iter().cloned());
            self.emit(FeedEvent::ArticlesAppended(outcome.articles.clone()));
        }
        if let Some(err) = outcome.error() {
            self.report(&err);
        }
        Ok(())
    }

    async fn guard<T>(&self, fut: impl Future<Output = T>) -> Result<T> {
        let mut shutdown = self.shutdown_rx.clone();
        cancellable(&mut shutdown, fut).await
    }

    fn report(&mut self, err: &Error) {
        warn!(error = %err, "Feed error");
        let notice = ErrorNotice::from_error(err);
        self.view.notice = notice.clone();
        self.emit(FeedEvent::Error(notice));
    }

    fn emit(&self, event: FeedEvent) {
        if let Some(tx) = &self.events {
            // A dropped receiver only means nobody is watching
            let _ = tx.send(event);
        }
    }
}

/// Run `fut` unless the session is shut down first
async fn cancellable<T>(
    shutdown: &mut watch::Receiver<bool>,
    fut: impl Future<Output = T>,
) -> Result<T> {
    if *shutdown.borrow() {
        return Err(Error::Cancelled);
    }

    tokio::select! {
        out = fut => Ok(out),
        _ = shutdown.wait_for(|stopped| *stopped) => Err(Error::Cancelled),
    }
}
