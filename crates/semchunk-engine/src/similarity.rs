//! Consecutive-sentence similarity profile.

/// Cosine similarity between two vectors.
///
/// Zero-norm inputs are treated as similarity 0.0 rather than NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a > 0.0 && norm_b > 0.0 {
        dot / (norm_a * norm_b)
    } else {
        0.0
    }
}

/// Cosine similarities between each pair of consecutive embeddings,
/// with summary statistics. Immutable once computed for a document.
#[derive(Debug, Clone)]
pub struct SimilarityProfile {
    /// N-1 similarities for N embeddings (empty for N <= 1).
    pub similarities: Vec<f32>,

    /// Mean similarity (0.0 if the sequence is empty).
    pub mean: f32,

    /// Population standard deviation (0.0 if the sequence is empty).
    pub std: f32,
}

impl SimilarityProfile {
    /// Compute the profile for an ordered embedding sequence.
    pub fn from_embeddings(embeddings: &[Vec<f32>]) -> Self {
        let similarities: Vec<f32> = embeddings
            .windows(2)
            .map(|pair| cosine_similarity(&pair[0], &pair[1]))
            .collect();

        if similarities.is_empty() {
            return Self {
                similarities,
                mean: 0.0,
                std: 0.0,
            };
        }

        let n = similarities.len() as f32;
        let mean = similarities.iter().sum::<f32>() / n;
        let variance = similarities
            .iter()
            .map(|s| {
                let d = s - mean;
                d * d
            })
            .sum::<f32>()
            / n;

        Self {
            similarities,
            mean,
            std: variance.sqrt(),
        }
    }
}
