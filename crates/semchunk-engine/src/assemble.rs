//! Chunk assembly: materialize boundaries + sentences into chunks.

use semchunk_core::{ChunkMetadata, ChunkingMethod, ElementKind, SemanticChunk};

/// Build one chunk per consecutive boundary pair.
///
/// The coherence score is the mean of the similarities strictly inside
/// the chunk's sentence range; the cross-boundary similarity is
/// excluded. Single-sentence chunks get coherence 1.0 by convention.
pub fn assemble_chunks(
    sentences: &[String],
    boundaries: &[usize],
    similarities: &[f32],
    element: ElementKind,
) -> Vec<SemanticChunk> {
    let mut chunks = Vec::with_capacity(boundaries.len().saturating_sub(1));

    for pair in boundaries.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let chunk_sentences = sentences[start..end].to_vec();
        let content = chunk_sentences.join(" ");

        let coherence = if end - start > 1 && start < similarities.len() {
            let inner = &similarities[start..(end - 1).min(similarities.len())];
            if inner.is_empty() {
                1.0
            } else {
                inner.iter().sum::<f32>() / inner.len() as f32
            }
        } else {
            1.0
        };

        let metadata = ChunkMetadata {
            num_sentences: chunk_sentences.len(),
            char_count: content.chars().count(),
            word_count: content.split_whitespace().count(),
            method: ChunkingMethod::Semantic,
            element,
        };

        chunks.push(SemanticChunk {
            content,
            sentences: chunk_sentences,
            start_idx: start,
            end_idx: end,
            coherence_score: coherence,
            metadata,
        });
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_ranges_cover_input_exactly() {
        let s = sentences(&["One fish.", "Two fish.", "Red fish.", "Blue fish."]);
        let chunks = assemble_chunks(&s, &[0, 2, 4], &[0.9, 0.1, 0.8], ElementKind::Text);

        assert_eq!(chunks.len(), 2);
        assert_eq!((chunks[0].start_idx, chunks[0].end_idx), (0, 2));
        assert_eq!((chunks[1].start_idx, chunks[1].end_idx), (2, 4));
        assert_eq!(chunks[0].content, "One fish. Two fish.");
        assert_eq!(chunks[1].sentences.len(), 2);
    }

    #[test]
    fn test_coherence_excludes_cross_boundary_similarity() {
        let s = sentences(&["a.", "b.", "c.", "d."]);
        // similarities: a-b=1.0, b-c=0.0 (boundary), c-d=0.5
        let chunks = assemble_chunks(&s, &[0, 2, 4], &[1.0, 0.0, 0.5], ElementKind::Text);

        // chunk [0,2): only a-b similarity
        assert!((chunks[0].coherence_score - 1.0).abs() < 1e-6);
        // chunk [2,4): only c-d similarity
        assert!((chunks[1].coherence_score - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_single_sentence_coherence_is_one() {
        let s = sentences(&["Lonely sentence."]);
        let chunks = assemble_chunks(&s, &[0, 1], &[], ElementKind::Text);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].coherence_score, 1.0);
        assert_eq!(chunks[0].metadata.num_sentences, 1);
    }

    #[test]
    fn test_metadata_counts() {
        let s = sentences(&["Hello world.", "Goodbye moon."]);
        let chunks = assemble_chunks(&s, &[0, 2], &[0.7], ElementKind::Text);

        let m = &chunks[0].metadata;
        assert_eq!(m.num_sentences, 2);
        assert_eq!(m.word_count, 4);
        assert_eq!(m.char_count, "Hello world. Goodbye moon.".chars().count());
        assert_eq!(m.method, ChunkingMethod::Semantic);
    }

    #[test]
    fn test_trailing_chunk_without_inner_similarity() {
        let s = sentences(&["a.", "b.", "c."]);
        // Last chunk [2,3) is single-sentence
        let chunks = assemble_chunks(&s, &[0, 2, 3], &[0.9, 0.2], ElementKind::Text);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].coherence_score, 1.0);
    }
}
