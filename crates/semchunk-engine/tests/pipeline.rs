//! End-to-end pipeline tests with deterministic embedder stubs.

use std::sync::Arc;

use async_trait::async_trait;

use semchunk_engine::{
    ChunkError, DocumentType, Embedder, EngineConfig, Result, SemanticChunker,
};

/// Maps each sentence to one fixed vector per topic, identical within
/// a topic and orthogonal across topics.
struct TopicEmbedder;

#[async_trait]
impl Embedder for TopicEmbedder {
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|t| {
                if t.contains("ocean") {
                    vec![1.0, 0.0, 0.0]
                } else if t.contains("mountain") {
                    vec![0.0, 1.0, 0.0]
                } else {
                    vec![0.0, 0.0, 1.0]
                }
            })
            .collect())
    }

    fn dimension(&self) -> usize {
        3
    }

    fn max_batch_size(&self) -> usize {
        96
    }
}

/// Returns the same vector for every input.
struct UniformEmbedder;

#[async_trait]
impl Embedder for UniformEmbedder {
    async fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
    }

    fn dimension(&self) -> usize {
        2
    }

    fn max_batch_size(&self) -> usize {
        96
    }
}

/// Fails on every call.
struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Err(ChunkError::embedding("simulated outage"))
    }

    fn dimension(&self) -> usize {
        2
    }

    fn max_batch_size(&self) -> usize {
        96
    }
}

fn three_topic_text() -> &'static str {
    "The ocean stretches far beyond the horizon line. \
     Waves roll across the ocean surface day and night. \
     Salt water fills the ocean from coast to coast. \
     The mountain range rises sharply from the plain. \
     Snow caps the mountain peaks through the winter. \
     Climbers ascend the mountain slopes every summer. \
     The desert receives almost no rainfall each year. \
     Cacti thrive in the dry desert heat somehow. \
     Sand dunes shift across the desert with the wind."
}

fn config(min: usize, max: usize) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.chunker.min_sentences = min;
    config.chunker.max_sentences = max;
    config.chunker.use_window = false;
    config
}

#[tokio::test]
async fn cuts_land_exactly_at_topic_transitions() {
    let chunker = SemanticChunker::new(Arc::new(TopicEmbedder), config(3, 30)).unwrap();
    let chunks = chunker
        .chunk_document(three_topic_text(), DocumentType::General)
        .await;

    assert_eq!(chunks.len(), 3);
    assert_eq!((chunks[0].start_idx, chunks[0].end_idx), (0, 3));
    assert_eq!((chunks[1].start_idx, chunks[1].end_idx), (3, 6));
    assert_eq!((chunks[2].start_idx, chunks[2].end_idx), (6, 9));

    assert!(chunks[0].content.contains("ocean"));
    assert!(chunks[1].content.contains("mountain"));
    assert!(chunks[2].content.contains("desert"));

    // Within a topic every adjacent pair is identical
    for chunk in &chunks {
        assert!((chunk.coherence_score - 1.0).abs() < 1e-5);
    }
}

#[tokio::test]
async fn chunk_ranges_partition_the_sentence_sequence() {
    let chunker = SemanticChunker::new(Arc::new(TopicEmbedder), config(2, 5)).unwrap();
    let chunks = chunker
        .chunk_document(three_topic_text(), DocumentType::TechnicalDoc)
        .await;

    assert!(!chunks.is_empty());
    assert_eq!(chunks[0].start_idx, 0);
    for pair in chunks.windows(2) {
        assert_eq!(pair[0].end_idx, pair[1].start_idx);
    }
    assert_eq!(chunks.last().unwrap().end_idx, 9);

    for chunk in &chunks {
        assert_eq!(chunk.end_idx - chunk.start_idx, chunk.sentences.len());
        assert_eq!(chunk.content, chunk.sentences.join(" "));
    }
}

#[tokio::test]
async fn size_cap_bounds_every_chunk_but_the_last() {
    // Uniform similarity: no semantic cuts, only the hard cap fires
    let chunker = SemanticChunker::new(Arc::new(UniformEmbedder), config(2, 4)).unwrap();

    let text: String = (0..10)
        .map(|i| format!("Sentence number {} has plenty of characters. ", i))
        .collect();
    let chunks = chunker.chunk_document(&text, DocumentType::General).await;

    assert_eq!(chunks.len(), 3);
    for chunk in &chunks[..chunks.len() - 1] {
        let n = chunk.metadata.num_sentences;
        assert!((2..=4).contains(&n), "chunk of {} sentences", n);
    }
    assert!(chunks.last().unwrap().metadata.num_sentences <= 4);
}

#[tokio::test]
async fn provider_outage_yields_tagged_full_coverage() {
    let chunker =
        SemanticChunker::new(Arc::new(FailingEmbedder), EngineConfig::default()).unwrap();

    let text = "A sentence long enough to pass the noise filter. ".repeat(60);
    let chunks = chunker.chunk_document(&text, DocumentType::General).await;

    assert!(!chunks.is_empty());
    assert!(chunks.iter().all(|c| c.is_fallback()));
    assert!(chunks.iter().all(|c| c.coherence_score == 0.0));

    // 1000-char windows, last one may be shorter
    for chunk in &chunks[..chunks.len() - 1] {
        assert_eq!(chunk.metadata.char_count, 1000);
    }
    let rejoined: String = chunks.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(rejoined, text);
}

#[tokio::test]
async fn feedback_shifts_future_segmentation_sensitivity() {
    let chunker = SemanticChunker::new(Arc::new(TopicEmbedder), config(3, 30)).unwrap();

    let before = chunker.adaptive_statistics().unwrap().current_multiplier;
    for _ in 0..20 {
        chunker.provide_feedback(true, 0.9);
    }
    let after = chunker.adaptive_statistics().unwrap().current_multiplier;
    assert!(after > before);

    // Chunking still works with the shifted operating point
    let chunks = chunker
        .chunk_document(three_topic_text(), DocumentType::General)
        .await;
    assert_eq!(chunks.len(), 3);

    let stats = chunker.adaptive_statistics().unwrap();
    assert_eq!(stats.total_updates, 20);
    assert_eq!(stats.useful_rate, 1.0);
    assert!(stats.multiplier_history_tail.len() <= 10);
    assert!(stats.multiplier_range.0 <= stats.multiplier_range.1);
}

#[tokio::test]
async fn static_thresholds_follow_document_type() {
    let mut cfg = config(3, 30);
    cfg.chunker.use_adaptive = false;
    let chunker = SemanticChunker::new(Arc::new(TopicEmbedder), cfg).unwrap();

    // Without the learner the per-type multiplier table drives the
    // threshold; the orthogonal-topic input still splits cleanly.
    for doc_type in [
        DocumentType::Resume,
        DocumentType::AcademicPaper,
        DocumentType::General,
    ] {
        let chunks = chunker.chunk_document(three_topic_text(), doc_type).await;
        assert_eq!(chunks.len(), 3, "doc_type={}", doc_type);
    }
}

#[tokio::test]
async fn fallback_flag_survives_serialization() {
    let chunker =
        SemanticChunker::new(Arc::new(FailingEmbedder), EngineConfig::default()).unwrap();
    let chunks = chunker
        .chunk_document(
            "Some text that is long enough to be chunked once.",
            DocumentType::General,
        )
        .await;

    let json = serde_json::to_string(&chunks[0]).unwrap();
    assert!(json.contains("\"method\":\"fallback\""));
}

#[tokio::test]
async fn concurrent_chunking_and_feedback() {
    let chunker = Arc::new(
        SemanticChunker::new(Arc::new(TopicEmbedder), config(3, 30)).unwrap(),
    );

    let feedback = {
        let chunker = Arc::clone(&chunker);
        tokio::spawn(async move {
            for i in 0..200 {
                chunker.provide_feedback(i % 2 == 0, if i % 2 == 0 { 0.9 } else { 0.1 });
            }
        })
    };

    let chunking = {
        let chunker = Arc::clone(&chunker);
        tokio::spawn(async move {
            for _ in 0..20 {
                let chunks = chunker
                    .chunk_document(three_topic_text(), DocumentType::General)
                    .await;
                assert!(!chunks.is_empty());
            }
        })
    };

    feedback.await.unwrap();
    chunking.await.unwrap();

    let stats = chunker.adaptive_statistics().unwrap();
    assert_eq!(stats.total_updates, 200);
    assert!((0.2..=0.8).contains(&stats.current_multiplier));
}
