//! Chunk output type.

use serde::Serialize;

/// A bounded window over a rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// 1-based position within the document.
    pub index: usize,
    /// The chunk text, including the overlap prefix.
    pub text: String,
    /// Leading characters shared with the previous chunk (0 for the first).
    pub overlap: usize,
    /// Character offset in the document where this chunk's new content starts.
    pub char_offset: usize,
}

impl Chunk {
    /// Length in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// The part of the chunk not repeated from the previous one.
    pub fn fresh_text(&self) -> &str {
        match self.text.char_indices().nth(self.overlap) {
            Some((byte, _)) => &self.text[byte..],
            None if self.overlap == 0 => self.text.as_str(),
            None => "",
        }
    }
}
