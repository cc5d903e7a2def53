//! Client configuration
//!
//! The `readify` binary reads one YAML file describing the document store,
//! feed tuning and local settings. Every section is optional.

use crate::auth::{AuthConfig, AuthSession, Authenticator};
use crate::cache::ImageCache;
use crate::error::{Error, Result, ResultExt};
use crate::feed::FeedConfig;
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig};
use crate::pagination::{DEFAULT_BATCH_SIZE, FEATURED_THRESHOLD};
use crate::reading::DEFAULT_READ_SECONDS;
use crate::repository::HttpStore;
use crate::types::Language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration loaded from YAML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadifyConfig {
    /// Document store connection
    #[serde(default)]
    pub backend: BackendConfig,

    /// Feed tuning
    #[serde(default)]
    pub feed: FeedSettings,

    /// Reading session tuning
    #[serde(default)]
    pub reading: ReadingSettings,

    /// Language used when the cache has none stored
    #[serde(default)]
    pub language: Language,

    /// Image cache file; in-memory when unset
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
}

impl ReadifyConfig {
    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Load a config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.feed.batch_size == 0 {
            return Err(Error::invalid_value("feed.batch_size", "must be at least 1"));
        }
        if self.feed.featured_threshold == 0 {
            return Err(Error::invalid_value(
                "feed.featured_threshold",
                "must be at least 1",
            ));
        }
        if let Some(base_url) = &self.backend.base_url {
            url::Url::parse(base_url)
                .map_err(|e| Error::invalid_value("backend.base_url", e.to_string()))?;
        }
        if self.backend.timeout_seconds == 0 {
            return Err(Error::invalid_value(
                "backend.timeout_seconds",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Feed session settings
    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig::new()
            .with_batch_size(self.feed.batch_size)
            .with_featured_threshold(self.feed.featured_threshold)
    }

    /// HTTP client settings for the document store
    pub fn http_config(&self) -> Result<HttpClientConfig> {
        let base_url = self
            .backend
            .base_url
            .as_deref()
            .ok_or_else(|| Error::config("backend.base_url is not set"))?;

        let mut builder = HttpClientConfig::builder()
            .base_url(base_url)
            .timeout(Duration::from_secs(self.backend.timeout_seconds));
        builder = match &self.backend.rate_limit {
            Some(rate_limit) => builder.rate_limit(rate_limit.clone()),
            None => builder.no_rate_limit(),
        };
        Ok(builder.build())
    }

    /// Authenticator with the configured credentials and session
    pub fn authenticator(&self) -> Authenticator {
        match &self.backend.session {
            Some(session) => Authenticator::with_session(self.backend.auth.clone(), session.clone()),
            None => Authenticator::new(self.backend.auth.clone()),
        }
    }

    /// Document store client
    pub fn http_store(&self) -> Result<HttpStore> {
        let client = HttpClient::with_auth(self.http_config()?, self.authenticator())?;
        Ok(HttpStore::new(client))
    }

    /// Image cache at the configured path
    pub fn image_cache(&self) -> Result<ImageCache> {
        match &self.cache_path {
            Some(path) => ImageCache::from_file(path),
            None => Ok(ImageCache::in_memory()),
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Document store connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Store root, e.g. `https://store.example.com/v1/`
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Client-side rate limit; unlimited when null
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Static credentials
    #[serde(default)]
    pub auth: AuthConfig,

    /// Signed-in user
    #[serde(default)]
    pub session: Option<AuthSession>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_seconds: default_timeout(),
            rate_limit: default_rate_limit(),
            auth: AuthConfig::default(),
            session: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::default())
}

/// Feed tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSettings {
    /// Cursor steps per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Featured count that advances the handshake
    #[serde(default = "default_featured_threshold")]
    pub featured_threshold: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            featured_threshold: default_featured_threshold(),
        }
    }
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_featured_threshold() -> usize {
    FEATURED_THRESHOLD
}

/// Reading session tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingSettings {
    /// Seconds an article must stay open to count as read
    #[serde(default = "default_read_seconds")]
    pub read_seconds: u32,
}

impl Default for ReadingSettings {
    fn default() -> Self {
        Self {
            read_seconds: default_read_seconds(),
        }
    }
}

fn default_read_seconds() -> u32 {
    DEFAULT_READ_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ReadifyConfig::from_yaml("{}").unwrap();
        assert_eq!(config.feed.batch_size, 10);
        assert_eq!(config.feed.featured_threshold, 5);
        assert_eq!(config.reading.read_seconds, 60);
        assert_eq!(config.language, Language::En);
        assert_eq!(config.backend.timeout_seconds, 30);
        assert!(config.backend.rate_limit.is_some());
        assert!(config.cache_path.is_none());
        assert_eq!(config, ReadifyConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
backend:
  base_url: "https://store.example.com/v1/"
  timeout_seconds: 5
  rate_limit: null
  auth:
    type: api_key
    location: query
    query_param: key
    value: "abc"
  session:
    uid: u1
    token: "tok"
feed:
  batch_size: 4
  featured_threshold: 3
reading:
  read_seconds: 10
language: ru
cache_path: /tmp/readify.json
"#;

        let config = ReadifyConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.feed_config(), FeedConfig::new().with_batch_size(4).with_featured_threshold(3));
        assert_eq!(config.reading.read_seconds, 10);
        assert_eq!(config.language, Language::Ru);
        assert!(config.backend.rate_limit.is_none());
        assert!(matches!(config.backend.auth, AuthConfig::ApiKey { .. }));
        assert_eq!(config.backend.session.as_ref().map(|s| s.uid.as_str()), Some("u1"));

        let http = config.http_config().unwrap();
        assert_eq!(http.timeout, Duration::from_secs(5));
        assert!(http.rate_limit.is_none());
        assert_eq!(http.base_url.as_deref(), Some("https://store.example.com/v1/"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let err = ReadifyConfig::from_yaml("feed:\n  batch_size: 0\n").unwrap_err();
        assert!(err.to_string().contains("feed.batch_size"));

        let err = ReadifyConfig::from_yaml("feed:\n  featured_threshold: 0\n").unwrap_err();
        assert!(err.to_string().contains("feed.featured_threshold"));

        let err = ReadifyConfig::from_yaml("backend:\n  base_url: \"not a url\"\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "backend.base_url"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ReadifyConfig::from_yaml("feed: [").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_http_config_requires_base_url() {
        let err = ReadifyConfig::default().http_config().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("readify.yaml");
        std::fs::write(&path, "language: ru\n").unwrap();

        assert_eq!(ReadifyConfig::from_file(&path).unwrap().language, Language::Ru);

        let err = ReadifyConfig::from_file(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_from_file_unreadable_names_path() {
        let dir = tempdir().unwrap();

        let err = ReadifyConfig::from_file(dir.path()).unwrap_err();
        match err {
            Error::Other(message) => {
                assert!(message.starts_with("Failed to read config"));
                assert!(message.contains(&dir.path().display().to_string()));
            }
            other => panic!("Expected Other, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_authenticator_carries_session() {
        let config = ReadifyConfig::from_yaml("backend:\n  session:\n    uid: u9\n").unwrap();
        let session = config.authenticator().current_session().await.unwrap();
        assert_eq!(session.uid, "u9");

        assert!(ReadifyConfig::default()
            .authenticator()
            .current_session()
            .await
            .is_err());
    }

    #[test]
    fn test_image_cache_mode() {
        assert!(ReadifyConfig::default().image_cache().unwrap().is_in_memory());

        let dir = tempdir().unwrap();
        let config = ReadifyConfig {
            cache_path: Some(dir.path().join("cache.json")),
            ..Default::default()
        };
        assert!(!config.image_cache().unwrap().is_in_memory());
    }
}
