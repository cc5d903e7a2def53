//! Feed session module
//!
//! Drives one feed view: featured articles on top, regular articles below,
//! paged backward from the newest ordinal.
//!
//! # Overview
//!
//! Loading is a two-stage handshake:
//!
//! ```text
//! start() ─┬─ fetch max index ──────────────► paginator.initialize
//!          └─ fetch top indexes ─► featured ids == threshold?
//!                                     └─► load_featured ─► featured == threshold?
//!                                                              └─► next_batch
//! ```
//!
//! Each stage can be re-entered on its own, and `refresh` resets cursor and
//! featured state together before starting over.

mod session;
mod types;

pub use session::{FeedSession, ShutdownHandle};
pub use types::{FeedConfig, FeedEvent, FeedView};
