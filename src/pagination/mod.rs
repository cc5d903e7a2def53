//! Pagination module
//!
//! Most-recent-first paging over ordinal article ids.
//!
//! # Overview
//!
//! The cursor starts at the store's max index and walks downward a fixed
//! number of steps per batch. Ids in the featured set are skipped because
//! the featured articles are shown separately. Two loading paths exist:
//!
//! - `next_batch` tolerates missing articles and reports them once
//! - `load_featured` fails on the first unresolvable id

mod paginator;
mod types;

pub use paginator::{resolve_all, FeedPaginator};
pub use types::{BatchOutcome, FeaturedSet, PaginationState, DEFAULT_BATCH_SIZE, FEATURED_THRESHOLD};
