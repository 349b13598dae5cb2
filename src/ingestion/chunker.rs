//! Text chunking with fixed size and overlap

use crate::types::{Chunk, Document};

/// Splits document text into overlapping fixed-size chunks
///
/// Windows are measured in characters and advance by `chunk_size - overlap`,
/// so adjacent chunks from the same document share exactly `overlap`
/// characters. Chunk boundaries do not respect word or sentence breaks; the
/// text is kept verbatim so the original document can be reconstructed by
/// stripping overlap regions and concatenating in order.
pub struct TextChunker {
    /// Maximum chunk size in characters
    chunk_size: usize,
    /// Overlap between adjacent chunks
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker. `overlap` must be smaller than `chunk_size`;
    /// the step is clamped to one character so splitting always terminates.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            overlap,
        }
    }

    /// Split a batch of documents, preserving document order and
    /// intra-document position order. Chunks from different documents are
    /// never merged.
    pub fn split_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        let mut chunks = Vec::new();

        for doc in documents {
            for (index, piece) in self.split_text(&doc.content).into_iter().enumerate() {
                chunks.push(Chunk::new(doc.id, doc.source.clone(), piece, index as u32));
            }
        }

        chunks
    }

    /// Split one text into overlapping windows. Empty text yields no chunks;
    /// text shorter than the chunk size yields exactly one.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = text.chars().collect();
        let step = self.chunk_size.saturating_sub(self.overlap).max(1);

        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + self.chunk_size).min(chars.len());
            chunks.push(chars[start..end].iter().collect());
            if end == chars.len() {
                break;
            }
            start += step;
        }

        chunks
    }
}
