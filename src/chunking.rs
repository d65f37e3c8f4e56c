//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`FixedSizeChunker`], which
//! splits by character count with configurable overlap. Character-count
//! splitting with overlap is the documented default strategy; no sentence or
//! paragraph awareness is applied.

use crate::document::{Chunk, Document};

/// A strategy for splitting documents into chunks.
///
/// Implementations produce [`Chunk`]s with text and metadata but no embeddings.
/// Embeddings are attached later by the pipeline. Chunks that would be empty
/// must be discarded, never returned.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks.
    ///
    /// Returns an empty `Vec` if the document has empty text.
    /// Each returned chunk has an empty embedding vector.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// Splits text into fixed-size windows by character count with overlap.
///
/// Consecutive windows share exactly `chunk_overlap` characters, so context
/// spanning a window boundary appears in both neighbors. Every character of
/// the input is covered by at least one window; the last window may be shorter
/// than `chunk_size`. Windows are measured in `char`s, not bytes, so multibyte
/// text never splits inside a code point.
///
/// Chunk IDs are generated as `{document_id}_{chunk_index}`. Each chunk
/// inherits the parent document's metadata plus a `chunk_index` field.
///
/// # Example
///
/// ```rust,ignore
/// use docchat::FixedSizeChunker;
///
/// let chunker = FixedSizeChunker::new(1000, 100);
/// let chunks = chunker.chunk(&document);
/// ```
#[derive(Debug, Clone)]
pub struct FixedSizeChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl FixedSizeChunker {
    /// Create a new `FixedSizeChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` — maximum number of characters per chunk
    /// * `chunk_overlap` — number of overlapping characters between consecutive chunks
    ///
    /// `chunk_overlap` must be less than `chunk_size`; [`ChatConfig`]
    /// validation enforces this. The chunker itself stops stepping rather
    /// than looping if handed a degenerate pair.
    ///
    /// [`ChatConfig`]: crate::config::ChatConfig
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self { chunk_size, chunk_overlap }
    }

    /// Split raw text into overlapping character windows.
    fn windows(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut windows = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            let window: String = chars[start..end].iter().collect();
            if !window.is_empty() {
                windows.push(window);
            }
            if end == chars.len() {
                break;
            }
            let step = self.chunk_size.saturating_sub(self.chunk_overlap);
            if step == 0 {
                break;
            }
            start += step;
        }

        windows
    }
}

impl Chunker for FixedSizeChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        if document.text.is_empty() {
            return Vec::new();
        }

        self.windows(&document.text)
            .into_iter()
            .enumerate()
            .map(|(chunk_index, text)| {
                let mut metadata = document.metadata.clone();
                metadata.insert("chunk_index".to_string(), chunk_index.to_string());

                Chunk {
                    id: format!("{}_{chunk_index}", document.id),
                    text,
                    embedding: Vec::new(),
                    metadata,
                    document_id: document.id.clone(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn doc(text: &str) -> Document {
        Document {
            id: "doc_1".to_string(),
            text: text.to_string(),
            metadata: HashMap::new(),
            source_uri: None,
        }
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunker = FixedSizeChunker::new(1000, 100);
        let chunks = chunker.chunk(&doc("The capstone deadline is May 1st."));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "The capstone deadline is May 1st.");
        assert_eq!(chunks[0].id, "doc_1_0");
    }

    #[test]
    fn empty_document_yields_no_chunks() {
        let chunker = FixedSizeChunker::new(1000, 100);
        assert!(chunker.chunk(&doc("")).is_empty());
    }

    #[test]
    fn consecutive_windows_share_exact_overlap() {
        let chunker = FixedSizeChunker::new(10, 3);
        let text = "abcdefghijklmnopqrstuvwxyz";
        let chunks = chunker.chunk(&doc(text));

        for pair in chunks.windows(2) {
            let prev: Vec<char> = pair[0].text.chars().collect();
            let tail: String = prev[prev.len() - 3..].iter().collect();
            assert!(pair[1].text.starts_with(&tail));
        }
    }

    #[test]
    fn every_character_is_covered() {
        let chunker = FixedSizeChunker::new(10, 3);
        let text = "abcdefghijklmnopqrstuvwxyz0123456789";
        let chunks = chunker.chunk(&doc(text));

        // Dropping the 3-char overlap from every chunk after the first
        // reconstructs the input exactly.
        let mut reconstructed: String = chunks[0].text.clone();
        for chunk in &chunks[1..] {
            reconstructed.extend(chunk.text.chars().skip(3));
        }
        assert_eq!(reconstructed, text);
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let chunker = FixedSizeChunker::new(4, 1);
        let chunks = chunker.chunk(&doc("héllo wörld ünïcode"));
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 4);
        }
    }

    #[test]
    fn chunk_metadata_carries_index() {
        let chunker = FixedSizeChunker::new(5, 1);
        let chunks = chunker.chunk(&doc("abcdefghij"));
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.metadata.get("chunk_index"), Some(&i.to_string()));
            assert_eq!(chunk.document_id, "doc_1");
        }
    }
}
