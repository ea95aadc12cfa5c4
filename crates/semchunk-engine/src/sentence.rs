//! Sentence splitting.
//!
//! Turns raw document text into an ordered sequence of sentences,
//! filtering trivial fragments (stray page numbers, layout noise).

use tracing::warn;
use unicode_segmentation::UnicodeSegmentation;

use semchunk_core::{Result, SentenceTokenizer};

/// Default tokenizer using Unicode Standard Annex #29 sentence
/// boundaries, which handle abbreviations (Dr., Inc.), decimal
/// numbers, and ellipses better than splitting on periods.
#[derive(Debug, Clone, Default)]
pub struct UnicodeSentenceTokenizer;

impl SentenceTokenizer for UnicodeSentenceTokenizer {
    fn split(&self, text: &str) -> Result<Vec<String>> {
        Ok(text
            .split_sentence_bounds()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect())
    }
}

/// Splits raw text into filtered sentences.
///
/// Degrades to naive period splitting if the tokenizer fails; the
/// degradation is logged, not surfaced.
pub struct SentenceSplitter {
    tokenizer: Box<dyn SentenceTokenizer>,
    min_chars: usize,
}

impl SentenceSplitter {
    /// Create a splitter with the default Unicode tokenizer.
    pub fn new(min_chars: usize) -> Self {
        Self {
            tokenizer: Box::new(UnicodeSentenceTokenizer),
            min_chars,
        }
    }

    /// Create a splitter with a custom tokenizer.
    pub fn with_tokenizer(tokenizer: Box<dyn SentenceTokenizer>, min_chars: usize) -> Self {
        Self { tokenizer, min_chars }
    }

    /// Split text into sentences, dropping any whose trimmed length is
    /// at or below the noise floor. Empty input yields an empty
    /// sequence.
    pub fn split(&self, text: &str) -> Vec<String> {
        match self.tokenizer.split(text) {
            Ok(sentences) => sentences
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| s.chars().count() > self.min_chars)
                .collect(),
            Err(err) => {
                warn!("Sentence tokenizer failed ({}), using naive split", err);
                naive_split(text, self.min_chars)
            }
        }
    }
}

impl std::fmt::Debug for SentenceSplitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceSplitter")
            .field("min_chars", &self.min_chars)
            .finish()
    }
}

/// Last-resort splitting on periods, with the same length filter.
fn naive_split(text: &str, min_chars: usize) -> Vec<String> {
    text.split('.')
        .map(str::trim)
        .filter(|s| s.chars().count() > min_chars)
        .map(|s| format!("{}.", s))
        .collect()
}
