//! Recursive, separator-aware splitting of a rendered document.

use paperdown_core::{ChunkingConfig, PaperdownError};

use super::helpers::{char_len, overlap_start, split_pieces};
use super::types::Chunk;

/// Splits text into overlapping chunks bounded by `target_chunk_size`.
#[derive(Debug, Clone)]
pub struct TextSplitter {
    config: ChunkingConfig,
}

impl TextSplitter {
    pub fn new(config: ChunkingConfig) -> Result<Self, PaperdownError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Split `text` into 1-indexed chunks.
    ///
    /// Every chunk after the first starts with the `chunk_overlap` characters
    /// that precede its new content (fewer only when the document has not
    /// got that far yet), so dropping each chunk's `overlap` prefix and
    /// concatenating gives back `text` exactly. A piece no separator can cut
    /// below `target_chunk_size - chunk_overlap` is emitted as its own chunk,
    /// behind its overlap prefix, even when that exceeds the target.
    pub fn split_text(&self, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }
        let target = self.config.target_chunk_size;
        if char_len(text) <= target {
            return vec![Chunk {
                index: 1,
                text: text.to_string(),
                overlap: 0,
                char_offset: 0,
            }];
        }

        // Pieces are sized so that any one of them fits behind a full overlap prefix.
        let budget = target - self.config.chunk_overlap;
        let mut pieces = Vec::new();
        split_pieces(text, &self.config.separator_priority, budget, &mut pieces);
        self.merge_pieces(text, &pieces, budget)
    }

    /// Greedily pack contiguous pieces into chunks, carrying the overlap
    /// prefix from the source text in front of each chunk after the first.
    fn merge_pieces(&self, text: &str, pieces: &[&str], budget: usize) -> Vec<Chunk> {
        let target = self.config.target_chunk_size;
        let overlap = self.config.chunk_overlap;
        let lens: Vec<usize> = pieces.iter().map(|p| char_len(p)).collect();

        let mut chunks: Vec<Chunk> = Vec::new();
        let mut byte_pos = 0usize;
        let mut char_pos = 0usize;
        let mut i = 0usize;

        while i < pieces.len() {
            let start = if chunks.is_empty() {
                byte_pos
            } else {
                overlap_start(text, byte_pos, overlap)
            };
            let prefix_len = char_len(&text[start..byte_pos]);

            let mut end = byte_pos;
            let mut len = prefix_len;
            while i < pieces.len() {
                // Indivisible pieces over budget never share a chunk.
                let alone = lens[i] > budget;
                if end > byte_pos && (alone || len + lens[i] > target) {
                    break;
                }
                end += pieces[i].len();
                len += lens[i];
                i += 1;
                if alone {
                    break;
                }
            }

            if len > target {
                tracing::debug!(
                    chunk = chunks.len() + 1,
                    chars = len,
                    target,
                    "emitting oversized indivisible chunk"
                );
            }

            chunks.push(Chunk {
                index: chunks.len() + 1,
                text: text[start..end].to_string(),
                overlap: prefix_len,
                char_offset: char_pos,
            });
            char_pos += len - prefix_len;
            byte_pos = end;
        }

        chunks
    }
}
