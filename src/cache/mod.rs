//! Image cache module
//!
//! Article images are kept between runs in one JSON file next to the
//! client's language setting. Writes go to a temp file that is then
//! renamed over the original.
//!
//! # Overview
//!
//! - `ImageCache` - file-backed or in-memory store
//! - `CacheEntries` - the on-disk document

mod store;
mod types;

pub use store::ImageCache;
pub use types::{CacheEntries, LANGUAGE_KEY};
