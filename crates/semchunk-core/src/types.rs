//! Core domain types for the chunking engine.

use serde::{Deserialize, Serialize};

/// Document type, supplied by an external classifier before chunking.
///
/// Determines the static per-type threshold multiplier when adaptive
/// learning is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Resume,
    AcademicPaper,
    TechnicalDoc,
    General,
    ShortDocument,
}

impl DocumentType {
    /// Static threshold multiplier for this document type.
    ///
    /// Structured content (resumes, short documents) gets more
    /// aggressive splits; academic prose gets more conservative ones.
    pub fn static_multiplier(&self) -> f32 {
        match self {
            Self::Resume => 0.4,
            Self::ShortDocument => 0.4,
            Self::AcademicPaper => 0.6,
            Self::TechnicalDoc => 0.55,
            Self::General => 0.5,
        }
    }
}

impl Default for DocumentType {
    fn default() -> Self {
        Self::General
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Resume => "resume",
            Self::AcademicPaper => "academic_paper",
            Self::TechnicalDoc => "technical_doc",
            Self::General => "general",
            Self::ShortDocument => "short_document",
        };
        write!(f, "{}", s)
    }
}

/// Kind of extracted document element, decided once at extraction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Table,
    Image,
}

/// An extracted document element handed to the chunker.
///
/// Text elements go through the full semantic pipeline; tables and
/// image descriptions are kept whole as single chunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentElement {
    /// Element kind.
    pub kind: ElementKind,

    /// Extracted text content (table HTML/text, image caption, prose).
    pub text: String,
}

impl DocumentElement {
    /// Create a plain text element.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Text,
            text: content.into(),
        }
    }

    /// Create a table element.
    pub fn table(content: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Table,
            text: content.into(),
        }
    }

    /// Create an image element (caption or description text).
    pub fn image(content: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Image,
            text: content.into(),
        }
    }
}

/// How a chunk was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkingMethod {
    /// Embedding-based boundary detection.
    Semantic,
    /// Fixed-size character splitting after a pipeline failure.
    Fallback,
}

/// Descriptive metadata attached to each chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Number of sentences in the chunk.
    pub num_sentences: usize,

    /// Character count of the joined content.
    pub char_count: usize,

    /// Word count (naive whitespace split).
    pub word_count: usize,

    /// How the chunk was produced.
    pub method: ChunkingMethod,

    /// Kind of source element the chunk came from.
    pub element: ElementKind,
}

/// A semantically coherent chunk of text.
///
/// Chunks are immutable once produced. For semantic chunks,
/// `start_idx`/`end_idx` is a half-open sentence index range; for
/// fallback chunks it is a character offset range into the raw text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticChunk {
    /// Concatenated sentence text (joined by a single space).
    pub content: String,

    /// Ordered sentences making up the chunk.
    pub sentences: Vec<String>,

    /// Start of the index range (inclusive).
    pub start_idx: usize,

    /// End of the index range (exclusive).
    pub end_idx: usize,

    /// Mean pairwise similarity of adjacent sentences inside the
    /// chunk; 1.0 for single-sentence chunks, 0.0 for fallback chunks.
    pub coherence_score: f32,

    /// Descriptive metadata.
    pub metadata: ChunkMetadata,
}

impl SemanticChunk {
    /// Character length of the chunk content.
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    /// True when the chunk has no content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// True when this chunk came from degraded fallback splitting.
    pub fn is_fallback(&self) -> bool {
        self.metadata.method == ChunkingMethod::Fallback
    }
}

impl std::fmt::Display for SemanticChunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SemanticChunk(sentences={}, chars={}, coherence={:.3})",
            self.sentences.len(),
            self.metadata.char_count,
            self.coherence_score
        )
    }
}

/// Summary statistics over a chunk sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkAnalysis {
    /// Number of chunks.
    pub num_chunks: usize,

    /// Mean coherence score.
    pub avg_coherence: f32,

    /// Minimum coherence score.
    pub min_coherence: f32,

    /// Maximum coherence score.
    pub max_coherence: f32,

    /// Mean sentences per chunk.
    pub avg_sentences: f32,

    /// Mean characters per chunk.
    pub avg_chars: f32,

    /// Total characters across all chunks.
    pub total_chars: usize,

    /// Per-chunk sentence counts, in order.
    pub sentence_distribution: Vec<usize>,
}

impl ChunkAnalysis {
    /// Compute statistics for a chunk sequence. Returns None for an
    /// empty sequence.
    pub fn from_chunks(chunks: &[SemanticChunk]) -> Option<Self> {
        if chunks.is_empty() {
            return None;
        }

        let n = chunks.len() as f32;
        let coherences: Vec<f32> = chunks.iter().map(|c| c.coherence_score).collect();
        let total_chars: usize = chunks.iter().map(|c| c.metadata.char_count).sum();

        Some(Self {
            num_chunks: chunks.len(),
            avg_coherence: coherences.iter().sum::<f32>() / n,
            min_coherence: coherences.iter().copied().fold(f32::INFINITY, f32::min),
            max_coherence: coherences.iter().copied().fold(f32::NEG_INFINITY, f32::max),
            avg_sentences: chunks
                .iter()
                .map(|c| c.metadata.num_sentences as f32)
                .sum::<f32>()
                / n,
            avg_chars: total_chars as f32 / n,
            total_chars,
            sentence_distribution: chunks.iter().map(|c| c.metadata.num_sentences).collect(),
        })
    }
}
