//! Reading module
//!
//! Everything that happens while one article is open: liking, the read
//! countdown, liked-post lists and the wording used for dates and counts.

mod dates;
mod session;

pub use dates::{article_word, day_word, days_since, relative_date};
pub use session::{load_liked_articles, ReadSession, DEFAULT_READ_SECONDS};
