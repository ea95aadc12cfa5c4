//! The semantic chunker facade.

use std::sync::Arc;

use tracing::{debug, info, warn};

use semchunk_core::{
    AdaptiveConfig, ChunkMetadata, ChunkerConfig, ChunkingMethod, DocumentElement, DocumentType,
    ElementKind, Embedder, EngineConfig, Result, SemanticChunk,
};

use crate::adaptive::{AdaptiveStats, AdaptiveThreshold};
use crate::assemble::assemble_chunks;
use crate::boundary::{detect_boundaries, ThresholdSource};
use crate::fallback::fallback_chunks;
use crate::sentence::SentenceSplitter;
use crate::similarity::SimilarityProfile;
use crate::window::WindowEmbedder;

/// Semantic chunker using embedding-based boundary detection.
///
/// Analyzes similarity between consecutive sentences to detect topic
/// boundaries, producing chunks that preserve semantic coherence
/// rather than arbitrary character counts. Provider failures degrade
/// to character-window fallback chunking; the chunker never propagates
/// a transient embedding failure to its caller.
pub struct SemanticChunker<E> {
    splitter: SentenceSplitter,
    window: WindowEmbedder<E>,
    config: ChunkerConfig,
    adaptive: Option<AdaptiveThreshold>,
}

impl<E> SemanticChunker<E>
where
    E: Embedder,
{
    /// Create a new semantic chunker.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for out-of-range parameters
    /// (e.g. `min_sentences > max_sentences`).
    pub fn new(embedder: Arc<E>, config: EngineConfig) -> Result<Self> {
        config.validate()?;

        // The learner starts at the chunker's base threshold;
        // `adaptive.initial_multiplier` applies only to a learner
        // constructed standalone.
        let adaptive = if config.chunker.use_adaptive {
            let adaptive_config = AdaptiveConfig {
                initial_multiplier: config.chunker.base_threshold,
                ..config.adaptive.clone()
            };
            Some(AdaptiveThreshold::new(adaptive_config)?)
        } else {
            None
        };

        info!(
            "SemanticChunker initialized: min_sentences={}, max_sentences={}, \
             base_threshold={}, adaptive={}",
            config.chunker.min_sentences,
            config.chunker.max_sentences,
            config.chunker.base_threshold,
            config.chunker.use_adaptive
        );

        Ok(Self {
            splitter: SentenceSplitter::new(config.chunker.min_sentence_chars),
            window: WindowEmbedder::new(
                embedder,
                config.chunker.batch_size,
                config.chunker.use_window,
            ),
            config: config.chunker,
            adaptive,
        })
    }

    /// Chunk a document using semantic boundary detection.
    ///
    /// Empty or whitespace-only text yields an empty sequence. On an
    /// embedding provider failure the semantic attempt is abandoned
    /// and the text is split into fixed character windows tagged as
    /// fallback chunks, so non-empty input always yields chunks.
    pub async fn chunk_document(&self, text: &str, doc_type: DocumentType) -> Vec<SemanticChunk> {
        if text.trim().is_empty() {
            warn!("Empty text provided to chunk_document");
            return Vec::new();
        }

        match self.chunk_semantic(text, doc_type).await {
            Ok(chunks) => chunks,
            Err(err) => {
                warn!("Semantic chunking failed ({}), using fallback chunking", err);
                fallback_chunks(text, self.config.fallback_chunk_chars)
            }
        }
    }

    /// Chunk a sequence of extracted document elements.
    ///
    /// Text elements go through the semantic pipeline; tables and
    /// image descriptions are kept whole, one chunk per element.
    pub async fn chunk_elements(
        &self,
        elements: &[DocumentElement],
        doc_type: DocumentType,
    ) -> Vec<SemanticChunk> {
        let mut chunks = Vec::new();

        for element in elements {
            match element.kind {
                ElementKind::Text => {
                    chunks.extend(self.chunk_document(&element.text, doc_type).await);
                }
                ElementKind::Table | ElementKind::Image => {
                    if !element.text.trim().is_empty() {
                        chunks.push(whole_element_chunk(element));
                    }
                }
            }
        }

        chunks
    }

    /// Provide retrieval feedback to the adaptive threshold learner.
    ///
    /// Callable at any time, any number of times, from any task; a
    /// no-op when adaptive mode is disabled.
    pub fn provide_feedback(&self, chunk_was_useful: bool, retrieval_score: f32) {
        if let Some(adaptive) = &self.adaptive {
            adaptive.update_from_feedback(chunk_was_useful, retrieval_score);
            debug!(
                "Feedback provided: useful={}, score={:.2}",
                chunk_was_useful, retrieval_score
            );
        }
    }

    /// Statistics from adaptive threshold learning, if enabled.
    pub fn adaptive_statistics(&self) -> Option<AdaptiveStats> {
        self.adaptive.as_ref().map(AdaptiveThreshold::statistics)
    }

    /// The full semantic pipeline; any error here aborts this
    /// document's semantic attempt.
    async fn chunk_semantic(&self, text: &str, doc_type: DocumentType) -> Result<Vec<SemanticChunk>> {
        let sentences = self.splitter.split(text);
        if sentences.is_empty() {
            warn!("No sentences found in text");
            return Ok(Vec::new());
        }

        info!("Split text into {} sentences", sentences.len());

        // Very short documents are emitted as a single chunk.
        if sentences.len() <= self.config.min_sentences {
            let n = sentences.len();
            return Ok(assemble_chunks(&sentences, &[0, n], &[], ElementKind::Text));
        }

        let embeddings = self.window.embed_sentences(&sentences).await?;
        let profile = SimilarityProfile::from_embeddings(&embeddings);

        let source = match &self.adaptive {
            Some(adaptive) => ThresholdSource::Adaptive(adaptive),
            None => ThresholdSource::Static {
                base: self.config.base_threshold,
            },
        };

        let boundaries =
            detect_boundaries(&profile, sentences.len(), doc_type, &self.config, &source);

        let chunks = assemble_chunks(
            &sentences,
            &boundaries,
            &profile.similarities,
            ElementKind::Text,
        );

        if !chunks.is_empty() {
            let avg_coherence =
                chunks.iter().map(|c| c.coherence_score).sum::<f32>() / chunks.len() as f32;
            info!(
                "Created {} semantic chunks (avg coherence: {:.3})",
                chunks.len(),
                avg_coherence
            );
        }

        Ok(chunks)
    }
}

impl<E> std::fmt::Debug for SemanticChunker<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticChunker")
            .field("min_sentences", &self.config.min_sentences)
            .field("max_sentences", &self.config.max_sentences)
            .field("adaptive", &self.adaptive.is_some())
            .finish()
    }
}

/// Wrap a table or image element as one chunk, kept whole.
fn whole_element_chunk(element: &DocumentElement) -> SemanticChunk {
    let content = element.text.trim().to_string();
    SemanticChunk {
        sentences: vec![content.clone()],
        start_idx: 0,
        end_idx: 1,
        coherence_score: 1.0,
        metadata: ChunkMetadata {
            num_sentences: 1,
            char_count: content.chars().count(),
            word_count: content.split_whitespace().count(),
            method: ChunkingMethod::Semantic,
            element: element.kind,
        },
        content,
    }
}
