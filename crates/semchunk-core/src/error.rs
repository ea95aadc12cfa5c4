//! Error types for the chunking engine.

use thiserror::Error;

/// Result type alias using ChunkError.
pub type Result<T> = std::result::Result<T, ChunkError>;

/// Errors that can occur in the chunking engine.
#[derive(Error, Debug)]
pub enum ChunkError {
    /// Embedding provider error (network failure, timeout, malformed
    /// response). Fatal for one document's semantic attempt; the
    /// caller degrades to fallback chunking.
    #[error("Embedding error: {message}")]
    Embedding { message: String },

    /// Sentence tokenizer error. Recovered locally by naive splitting,
    /// never surfaced past the splitter.
    #[error("Tokenization error: {message}")]
    Tokenization { message: String },

    /// Invalid argument provided.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Configuration error (out-of-range constructor parameters).
    /// Fatal at construction time, never silently corrected.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ChunkError {
    /// Create an embedding error.
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding {
            message: message.into(),
        }
    }

    /// Create a tokenization error.
    pub fn tokenization(message: impl Into<String>) -> Self {
        Self::Tokenization {
            message: message.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True when the error aborts a document's semantic attempt and
    /// the pipeline should degrade to fallback chunking.
    pub fn triggers_fallback(&self) -> bool {
        matches!(self, Self::Embedding { .. })
    }
}
