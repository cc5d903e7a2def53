//! Cache document
//!
//! A flat JSON object. Image entries map an article id to base64 bytes;
//! the `language` key holds the client language code.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key of the language setting
pub const LANGUAGE_KEY: &str = "language";

/// All cache entries, keyed as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheEntries {
    entries: BTreeMap<String, String>,
}

impl CacheEntries {
    /// Create an empty cache document
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a raw entry
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Set a raw entry
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Remove a raw entry
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Drop every image, keeping settings
    pub fn clear_images(&mut self) {
        self.entries.retain(|key, _| key == LANGUAGE_KEY);
    }

    /// Number of cached images
    pub fn image_count(&self) -> usize {
        self.entries
            .keys()
            .filter(|key| key.as_str() != LANGUAGE_KEY)
            .count()
    }

    /// Bytes held by keys and values
    pub fn size_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Number of entries including settings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
