//! Property tests for fixed-size chunking.

use std::collections::HashMap;

use docchat::{Chunker, Document, FixedSizeChunker};
use proptest::prelude::*;

fn doc(text: String) -> Document {
    Document { id: "doc_1".to_string(), text, metadata: HashMap::new(), source_uri: None }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every input character is covered: dropping the overlap prefix from
    /// each window after the first reconstructs the input exactly. This also
    /// pins the exact-overlap guarantee, since reconstruction only works when
    /// consecutive windows share precisely `overlap` characters.
    #[test]
    fn windows_cover_input_and_overlap_exactly(
        text in "[a-zA-Zα-ω0-9 .,!?]{1,500}",
        chunk_size in 2usize..64,
        overlap_frac in 0usize..100,
    ) {
        let overlap = (chunk_size - 1) * overlap_frac / 100;
        prop_assume!(overlap < chunk_size);

        let chunker = FixedSizeChunker::new(chunk_size, overlap);
        let chunks = chunker.chunk(&doc(text.clone()));

        prop_assert!(!chunks.is_empty());

        let mut reconstructed: String = chunks[0].text.clone();
        for chunk in &chunks[1..] {
            reconstructed.extend(chunk.text.chars().skip(overlap));
        }
        prop_assert_eq!(reconstructed, text);
    }

    /// No window exceeds `chunk_size` characters and none is empty.
    #[test]
    fn windows_are_bounded_and_non_empty(
        text in "[a-z ]{0,300}",
        chunk_size in 1usize..32,
    ) {
        let overlap = chunk_size / 2;
        let chunker = FixedSizeChunker::new(chunk_size, overlap);

        for chunk in chunker.chunk(&doc(text.clone())) {
            let len = chunk.text.chars().count();
            prop_assert!(len > 0, "empty chunk must be discarded");
            prop_assert!(len <= chunk_size, "chunk of {len} chars exceeds {chunk_size}");
        }
    }
}
