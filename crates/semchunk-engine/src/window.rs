//! Sliding-window sentence embedding with batched provider calls.

use std::sync::Arc;

use tracing::debug;

use semchunk_core::{ChunkError, Embedder, Result};

/// Embeds sentences through the external provider, optionally wrapping
/// each sentence in a 3-sentence window for richer context.
///
/// Batches are sent sequentially and results concatenated back in
/// order, so output vector `i` always corresponds to sentence `i`.
pub struct WindowEmbedder<E> {
    embedder: Arc<E>,
    batch_size: usize,
    use_window: bool,
}

impl<E> WindowEmbedder<E>
where
    E: Embedder,
{
    /// Create a new window embedder.
    pub fn new(embedder: Arc<E>, batch_size: usize, use_window: bool) -> Self {
        Self {
            embedder,
            batch_size,
            use_window,
        }
    }

    /// Embed sentences, one vector per input sentence.
    ///
    /// # Errors
    ///
    /// Any provider error is fatal for this document's chunking
    /// attempt and propagates to the caller.
    pub async fn embed_sentences(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>> {
        if sentences.is_empty() {
            return Ok(Vec::new());
        }

        let input_texts = self.build_inputs(sentences);
        let batch_size = self.batch_size.min(self.embedder.max_batch_size()).max(1);

        let mut embeddings = Vec::with_capacity(input_texts.len());

        for (batch_idx, batch) in input_texts.chunks(batch_size).enumerate() {
            let refs: Vec<&str> = batch.iter().map(String::as_str).collect();
            let batch_embeddings = self.embedder.embed(&refs).await?;

            if batch_embeddings.len() != refs.len() {
                return Err(ChunkError::embedding(format!(
                    "Provider returned {} vectors for a batch of {}",
                    batch_embeddings.len(),
                    refs.len()
                )));
            }

            debug!(
                "Embedded batch {}/{}",
                batch_idx + 1,
                input_texts.len().div_ceil(batch_size)
            );

            embeddings.extend(batch_embeddings);
        }

        Ok(embeddings)
    }

    /// Build the provider inputs: either raw sentences or 3-sentence
    /// windows centered on each sentence (first/last use only the
    /// available side). Window mode never changes the sentence count.
    fn build_inputs(&self, sentences: &[String]) -> Vec<String> {
        if !self.use_window || sentences.len() <= 1 {
            return sentences.to_vec();
        }

        let windows: Vec<String> = (0..sentences.len())
            .map(|i| {
                let start = i.saturating_sub(1);
                let end = (i + 2).min(sentences.len());
                sentences[start..end].join(" ")
            })
            .collect();

        debug!("Using sliding windows: {} windows created", windows.len());
        windows
    }
}
