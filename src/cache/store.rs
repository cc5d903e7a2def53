//! Image cache implementation
//!
//! Provides file-backed persistence with atomic writes.

use super::types::{CacheEntries, LANGUAGE_KEY};
use crate::error::{Error, Result};
use crate::repository::ImageRepository;
use crate::types::{ArticleId, Language};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Key-value cache for article images and the language setting
#[derive(Debug)]
pub struct ImageCache {
    /// Path to the cache file
    path: PathBuf,
    /// Current entries
    entries: Arc<RwLock<CacheEntries>>,
}

impl ImageCache {
    /// Create an empty cache that saves to `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            entries: Arc::new(RwLock::new(CacheEntries::new())),
        }
    }

    /// Create an in-memory cache (no file persistence)
    pub fn in_memory() -> Self {
        Self::new(PathBuf::new())
    }

    /// Create a cache from a file, loading existing entries if present
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| Error::cache(format!("Failed to read cache file: {e}")))?;
            parse(&contents)?
        } else {
            CacheEntries::new()
        };

        Ok(Self {
            path,
            entries: Arc::new(RwLock::new(entries)),
        })
    }

    /// Reload entries from the file
    pub async fn load(&self) -> Result<()> {
        if self.is_in_memory() || !self.path.exists() {
            return Ok(());
        }

        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::cache(format!("Failed to read cache file: {e}")))?;
        let loaded = parse(&contents)?;

        *self.entries.write().await = loaded;
        Ok(())
    }

    /// Write entries to the file
    pub async fn save(&self) -> Result<()> {
        if self.is_in_memory() {
            return Ok(());
        }

        let contents = {
            let entries = self.entries.read().await;
            serde_json::to_string(&*entries)
                .map_err(|e| Error::cache(format!("Failed to serialize cache: {e}")))?
        };

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::cache(format!("Failed to write cache file: {e}")))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| Error::cache(format!("Failed to rename cache file: {e}")))?;

        Ok(())
    }

    /// Cached image bytes for an article
    pub async fn get_image(&self, id: &ArticleId) -> Result<Option<Vec<u8>>> {
        let entries = self.entries.read().await;
        let Some(encoded) = entries.get(id.as_str()) else {
            return Ok(None);
        };

        STANDARD
            .decode(encoded)
            .map(Some)
            .map_err(|e| Error::cache(format!("Corrupt image entry '{id}': {e}")))
    }

    /// Store image bytes for an article
    pub async fn save_image(&self, id: &ArticleId, bytes: &[u8]) -> Result<()> {
        {
            let mut entries = self.entries.write().await;
            entries.insert(id.as_str(), STANDARD.encode(bytes));
        }
        debug!(%id, bytes = bytes.len(), "Image cached");
        self.save().await
    }

    /// Cached image, or fetch it from the store and cache it
    pub async fn image_or_fetch<R>(&self, id: &ArticleId, repo: &R) -> Result<Vec<u8>>
    where
        R: ImageRepository + ?Sized,
    {
        if let Some(bytes) = self.get_image(id).await? {
            return Ok(bytes);
        }

        let bytes = repo.fetch_image(id).await?;
        self.save_image(id, &bytes).await?;
        Ok(bytes)
    }

    /// Size of all entries in megabytes
    pub async fn size_mb(&self) -> f64 {
        self.entries.read().await.size_bytes() as f64 / BYTES_PER_MB
    }

    /// Number of cached images
    pub async fn image_count(&self) -> usize {
        self.entries.read().await.image_count()
    }

    /// Remove every image, keeping the language setting
    pub async fn clear(&self) -> Result<()> {
        {
            let mut entries = self.entries.write().await;
            entries.clear_images();
        }
        debug!("Image cache cleared");
        self.save().await
    }

    /// Stored language, English when unset
    pub async fn language(&self) -> Language {
        self.stored_language().await.unwrap_or_default()
    }

    /// Stored language, if any
    pub async fn stored_language(&self) -> Option<Language> {
        self.entries
            .read()
            .await
            .get(LANGUAGE_KEY)
            .map(Language::from_code)
    }

    /// Store the language setting
    pub async fn set_language(&self, language: Language) -> Result<()> {
        {
            let mut entries = self.entries.write().await;
            entries.insert(LANGUAGE_KEY, language.code());
        }
        self.save().await
    }

    /// Get the cache file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if using in-memory mode
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str().is_empty()
    }
}

impl Clone for ImageCache {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            entries: Arc::clone(&self.entries),
        }
    }
}

fn parse(contents: &str) -> Result<CacheEntries> {
    serde_json::from_str(contents)
        .map_err(|e| Error::cache(format!("Failed to parse cache file: {e}")))
}
