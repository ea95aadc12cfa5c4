//! Degraded character-count chunking.
//!
//! Pure, stateless, always succeeds. Used when the semantic pipeline
//! cannot run so the consumer still receives full coverage of the
//! input text, explicitly tagged as degraded.

use semchunk_core::{ChunkMetadata, ChunkingMethod, ElementKind, SemanticChunk};

/// Split raw text into fixed character windows (the last window may be
/// shorter). Each window becomes a chunk with coherence 0.0 and the
/// fallback method tag; `start_idx`/`end_idx` are character offsets.
pub fn fallback_chunks(text: &str, window_chars: usize) -> Vec<SemanticChunk> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::with_capacity(chars.len() / window_chars.max(1) + 1);

    let mut start = 0;
    while start < chars.len() {
        let end = (start + window_chars).min(chars.len());
        let content: String = chars[start..end].iter().collect();

        chunks.push(SemanticChunk {
            sentences: vec![content.clone()],
            start_idx: start,
            end_idx: end,
            coherence_score: 0.0,
            metadata: ChunkMetadata {
                num_sentences: 1,
                char_count: content.chars().count(),
                word_count: content.split_whitespace().count(),
                method: ChunkingMethod::Fallback,
                element: ElementKind::Text,
            },
            content,
        });

        start = end;
    }

    chunks
}
