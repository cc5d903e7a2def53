//! Common types used throughout Readify core
//!
//! This module contains the shared document types (articles, users) and
//! the small value types used across multiple modules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Article Identifiers
// ============================================================================

/// Identifier of an article document.
///
/// Ids are strings on the wire but the feed treats them as non-negative
/// ordinals (`"0"`, `"1"`, ...). Featured lists may carry arbitrary strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(String);

impl ArticleId {
    /// Create an id from any string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create the id for a feed ordinal
    pub fn from_index(index: u64) -> Self {
        Self(index.to_string())
    }

    /// The ordinal this id names, if it is numeric
    pub fn as_index(&self) -> Option<u64> {
        self.0.parse().ok()
    }

    /// Borrow the raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArticleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ArticleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ArticleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Language
// ============================================================================

/// Content language of the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Russian
    Ru,
}

impl Language {
    /// Short code as stored in settings
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
        }
    }

    /// Parse a stored code; anything other than `ru` is English
    pub fn from_code(code: &str) -> Self {
        if code.eq_ignore_ascii_case("ru") {
            Self::Ru
        } else {
            Self::En
        }
    }
}

// ============================================================================
// Documents
// ============================================================================

/// Article document as stored in the `articles` collection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub en_title: Option<String>,
    #[serde(default)]
    pub en_text: Option<String>,
    #[serde(default)]
    pub en_description: Option<String>,
    #[serde(default)]
    pub ru_title: Option<String>,
    #[serde(default)]
    pub ru_text: Option<String>,
    #[serde(default)]
    pub ru_description: Option<String>,
    #[serde(default)]
    pub likes_count: Option<i64>,
    #[serde(default)]
    pub is_premium: Option<bool>,
}

impl Article {
    /// Create an empty article with the given id
    pub fn new(id: impl Into<ArticleId>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the English title
    #[must_use]
    pub fn with_en_title(mut self, title: impl Into<String>) -> Self {
        self.en_title = Some(title.into());
        self
    }

    /// Set the English body text
    #[must_use]
    pub fn with_en_text(mut self, text: impl Into<String>) -> Self {
        self.en_text = Some(text.into());
        self
    }

    /// Set the likes count
    #[must_use]
    pub fn with_likes(mut self, likes: i64) -> Self {
        self.likes_count = Some(likes);
        self
    }

    /// Title in the given language, empty when missing
    pub fn title(&self, language: Language) -> &str {
        match language {
            Language::En => self.en_title.as_deref(),
            Language::Ru => self.ru_title.as_deref(),
        }
        .unwrap_or_default()
    }

    /// Body text in the given language, empty when missing
    pub fn text(&self, language: Language) -> &str {
        match language {
            Language::En => self.en_text.as_deref(),
            Language::Ru => self.ru_text.as_deref(),
        }
        .unwrap_or_default()
    }

    /// Description in the given language, empty when missing
    pub fn description(&self, language: Language) -> &str {
        match language {
            Language::En => self.en_description.as_deref(),
            Language::Ru => self.ru_description.as_deref(),
        }
        .unwrap_or_default()
    }

    /// Likes count, zero when missing
    pub fn likes(&self) -> i64 {
        self.likes_count.unwrap_or(0)
    }
}

/// User document as stored in the `users` collection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub liked_posts: Option<Vec<ArticleId>>,
    #[serde(default)]
    pub articles_read: Option<i64>,
}

impl User {
    /// Create a user with an empty name and no history
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(String::new()),
            liked_posts: Some(Vec::new()),
            articles_read: Some(0),
            ..Default::default()
        }
    }

    /// Liked post ids, empty when missing
    pub fn liked(&self) -> &[ArticleId] {
        self.liked_posts.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_article_id_index() {
        assert_eq!(ArticleId::from_index(12).as_str(), "12");
        assert_eq!(ArticleId::new("12").as_index(), Some(12));
        assert_eq!(ArticleId::new("-1").as_index(), None);
        assert_eq!(ArticleId::new("intro").as_index(), None);
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::from_code("ru"), Language::Ru);
        assert_eq!(Language::from_code("RU"), Language::Ru);
        assert_eq!(Language::from_code(""), Language::En);
        assert_eq!(Language::Ru.code(), "ru");
    }

    #[test]
    fn test_article_deserialize_partial() {
        let article: Article = serde_json::from_value(json!({
            "id": "3",
            "en_title": "Rust",
            "likes_count": 4
        }))
        .unwrap();

        assert_eq!(article.id, ArticleId::new("3"));
        assert_eq!(article.title(Language::En), "Rust");
        assert_eq!(article.title(Language::Ru), "");
        assert_eq!(article.likes(), 4);
        assert!(article.date_created.is_none());
    }

    #[test]
    fn test_article_defaults() {
        let article = Article::default();
        assert_eq!(article.id, ArticleId::default());
        assert_eq!(article.id.as_str(), "");

        let article = Article::new(ArticleId::new("5"));
        assert_eq!(article.id.as_str(), "5");
        assert_eq!(article.likes(), 0);
        assert!(article.is_premium.is_none());
    }

    #[test]
    fn test_user_liked_defaults() {
        let user: User = serde_json::from_value(json!({"id": "u1"})).unwrap();
        assert!(user.liked().is_empty());

        let user = User::new("u2");
        assert_eq!(user.articles_read, Some(0));
        assert_eq!(user.name.as_deref(), Some(""));
    }
}
