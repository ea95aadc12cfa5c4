//! semchunk-engine - Semantic chunking pipeline
//!
//! Splits extracted document text into topically coherent chunks using
//! sentence-level embedding similarity rather than fixed character
//! counts, and adapts its segmentation sensitivity over time from
//! downstream retrieval feedback.
//!
//! # Pipeline
//!
//! raw text → [`SentenceSplitter`] → [`WindowEmbedder`] →
//! [`SimilarityProfile`] → boundary detection (consulting
//! [`AdaptiveThreshold`] and the document type) → chunk assembly.
//!
//! The whole pipeline is wrapped by [`SemanticChunker`], which also
//! owns the degradation path: if the embedding provider fails, the
//! document is split into fixed character windows tagged as fallback
//! chunks instead of surfacing the error.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use semchunk_core::{DocumentType, EngineConfig};
//! use semchunk_engine::SemanticChunker;
//!
//! let chunker = SemanticChunker::new(Arc::new(embedder), EngineConfig::default())?;
//! let chunks = chunker.chunk_document(text, DocumentType::TechnicalDoc).await;
//!
//! // Later, from the retrieval side:
//! chunker.provide_feedback(true, 0.85);
//! ```

mod adaptive;
mod assemble;
mod boundary;
mod chunker;
mod fallback;
mod sentence;
mod similarity;
mod window;

pub use adaptive::{AdaptiveStats, AdaptiveThreshold};
pub use assemble::assemble_chunks;
pub use boundary::{detect_boundaries, ThresholdSource};
pub use chunker::SemanticChunker;
pub use fallback::fallback_chunks;
pub use sentence::{SentenceSplitter, UnicodeSentenceTokenizer};
pub use similarity::{cosine_similarity, SimilarityProfile};
pub use window::WindowEmbedder;

// Re-export core types for convenience
pub use semchunk_core::{
    ChunkAnalysis, ChunkError, ChunkMetadata, ChunkerConfig, ChunkingMethod, DocumentElement,
    DocumentType, ElementKind, Embedder, EngineConfig, Result, SemanticChunk, SentenceTokenizer,
};
