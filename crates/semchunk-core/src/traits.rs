//! Core traits defining the interfaces between components.

use async_trait::async_trait;

use crate::error::Result;

/// Embedding provider trait.
///
/// The chunking engine treats the embedding model as an external
/// collaborator: any fixed-length vector embedding of a
/// sentence-or-window of text satisfies the contract.
///
/// Contract:
/// - `embed` is order-preserving: output vector `i` corresponds to
///   input text `i`.
/// - A call fails atomically: either every text in the batch is
///   embedded or the whole call returns an error.
/// - All vectors returned within one chunking run have identical
///   dimensionality.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts.
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Get the embedding dimension.
    fn dimension(&self) -> usize;

    /// Maximum batch size accepted by the provider per call.
    fn max_batch_size(&self) -> usize;
}

/// Sentence tokenizer trait.
///
/// Must be locale-appropriate for the corpus language. The splitter
/// recovers from a tokenizer error by degrading to naive splitting,
/// so implementations should fail rather than return garbage.
pub trait SentenceTokenizer: Send + Sync {
    /// Split text into an ordered sequence of raw sentences.
    fn split(&self, text: &str) -> Result<Vec<String>>;
}
