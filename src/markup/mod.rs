//! Article markup module
//!
//! Article bodies are flat strings split into blocks by `+++`. Each block
//! is classified by its leading sigil:
//!
//! ```text
//! ***Title+++**Subtitle+++*Bold line+++-Bullet item+++Plain paragraph
//! ```
//!
//! The parse is total and recomputed on every call.

mod parser;
mod types;

pub use parser::{parse, BLOCK_DELIMITER};
pub use types::{PartKind, TextPart};

#[cfg(test)]
mod tests;
