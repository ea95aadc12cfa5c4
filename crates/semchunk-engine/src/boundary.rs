//! Boundary detection over a similarity profile.

use tracing::debug;

use semchunk_core::{ChunkerConfig, DocumentType};

use crate::adaptive::AdaptiveThreshold;
use crate::similarity::SimilarityProfile;

/// Where the cut threshold comes from.
pub enum ThresholdSource<'a> {
    /// Feedback-driven learner; the multiplier already encodes the
    /// operating point, so the document type is not consulted.
    Adaptive(&'a AdaptiveThreshold),

    /// Static base multiplier, scaled per document type.
    Static { base: f32 },
}

/// Detect chunk boundaries from similarity drops.
///
/// Returns strictly increasing sentence indices starting at 0 and
/// ending at `sentence_count`. A cut is placed where the similarity
/// falls below the threshold and the running chunk already holds
/// `min_sentences`; otherwise a chunk that has grown to
/// `max_sentences` is cut regardless of similarity. The two cut
/// conditions are mutually exclusive per step: when a similarity cut
/// fires, the size cap is not consulted on that step.
pub fn detect_boundaries(
    profile: &SimilarityProfile,
    sentence_count: usize,
    doc_type: DocumentType,
    config: &ChunkerConfig,
    source: &ThresholdSource<'_>,
) -> Vec<usize> {
    if profile.similarities.is_empty() {
        return vec![0, sentence_count];
    }

    let threshold = match source {
        ThresholdSource::Adaptive(adaptive) => {
            let threshold = adaptive.threshold_for(profile.mean, profile.std);
            debug!(
                "Using adaptive threshold: multiplier={:.3}",
                adaptive.current_multiplier()
            );
            threshold
        }
        ThresholdSource::Static { base } => {
            (profile.mean - base * profile.std) * doc_type.static_multiplier()
        }
    };

    debug!(
        "Boundary detection: mean_sim={:.3}, std_sim={:.3}, threshold={:.3}, doc_type={}",
        profile.mean, profile.std, threshold, doc_type
    );

    let mut boundaries = vec![0];
    let mut current_chunk_size = 0usize;

    for (i, &sim) in profile.similarities.iter().enumerate() {
        current_chunk_size += 1;

        if sim < threshold && current_chunk_size >= config.min_sentences {
            boundaries.push(i + 1);
            current_chunk_size = 0;
            debug!("Boundary at sentence {} (sim={:.3} < {:.3})", i + 1, sim, threshold);
        } else if current_chunk_size >= config.max_sentences {
            boundaries.push(i + 1);
            current_chunk_size = 0;
            debug!("Max size boundary at sentence {}", i + 1);
        }
    }

    if *boundaries.last().unwrap_or(&0) != sentence_count {
        boundaries.push(sentence_count);
    }

    boundaries
}
