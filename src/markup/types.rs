//! Markup output types

use serde::Serialize;
use std::fmt;

/// Display kind of a parsed block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartKind {
    /// `***` block
    Title,
    /// `**` block
    Subtitle,
    /// `*` block
    Bold,
    /// `-` block
    BulletPoint,
    /// Unmarked block
    RegularText,
}

impl PartKind {
    /// Marker that selects this kind, if any
    pub fn marker(self) -> Option<&'static str> {
        match self {
            Self::Title => Some("***"),
            Self::Subtitle => Some("**"),
            Self::Bold => Some("*"),
            Self::BulletPoint => Some("-"),
            Self::RegularText => None,
        }
    }
}

/// One classified block of article text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TextPart {
    /// Block content with markers stripped
    pub content: String,
    /// How the block is displayed
    pub kind: PartKind,
}

impl TextPart {
    /// Create a text part
    pub fn new(content: impl Into<String>, kind: PartKind) -> Self {
        Self {
            content: content.into(),
            kind,
        }
    }
}

impl fmt::Display for TextPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PartKind::Title => write!(f, "# {}", self.content),
            PartKind::Subtitle => write!(f, "## {}", self.content),
            PartKind::Bold => write!(f, "**{}**", self.content),
            PartKind::BulletPoint => write!(f, "\u{2022} {}", self.content),
            PartKind::RegularText => f.write_str(&self.content),
        }
    }
}
