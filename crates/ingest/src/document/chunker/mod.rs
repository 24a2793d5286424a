//! Overlapping chunking of rendered documents for embedding.
//!
//! Text is cut on the coarsest separator that occurs (paragraph, line,
//! sentence end), recursing to finer separators only for pieces that are
//! still too large, then pieces are packed greedily into size-bounded windows.

mod helpers;
mod splitter;
mod types;

pub use splitter::TextSplitter;
pub use types::Chunk;
