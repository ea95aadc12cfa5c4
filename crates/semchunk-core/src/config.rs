//! Configuration types for the chunking engine.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ChunkError, Result};

/// Main configuration for the chunking engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Chunking pipeline configuration.
    #[serde(default)]
    pub chunker: ChunkerConfig,

    /// Adaptive threshold configuration.
    #[serde(default)]
    pub adaptive: AdaptiveConfig,
}

/// Chunking pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkerConfig {
    /// Minimum sentences per chunk.
    #[serde(default = "default_min_sentences")]
    pub min_sentences: usize,

    /// Maximum sentences per chunk (hard cap).
    #[serde(default = "default_max_sentences")]
    pub max_sentences: usize,

    /// Base similarity threshold multiplier (used to seed the adaptive
    /// learner, and directly when adaptive mode is disabled).
    #[serde(default = "default_base_threshold")]
    pub base_threshold: f32,

    /// Batch size for embedding provider calls.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Embed each sentence together with its immediate neighbors.
    #[serde(default = "default_true")]
    pub use_window: bool,

    /// Enable feedback-driven adaptive thresholding.
    #[serde(default = "default_true")]
    pub use_adaptive: bool,

    /// Sentences at or below this trimmed length are discarded as
    /// layout noise (stray page numbers, fragments).
    #[serde(default = "default_min_sentence_chars")]
    pub min_sentence_chars: usize,

    /// Window size in characters for fallback chunking.
    #[serde(default = "default_fallback_chunk_chars")]
    pub fallback_chunk_chars: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            min_sentences: 3,
            max_sentences: 30,
            base_threshold: 0.5,
            batch_size: 96,
            use_window: true,
            use_adaptive: true,
            min_sentence_chars: 10,
            fallback_chunk_chars: 1000,
        }
    }
}

impl ChunkerConfig {
    /// Validate parameter ranges. Out-of-range values are fatal, never
    /// silently corrected.
    pub fn validate(&self) -> Result<()> {
        if self.min_sentences == 0 {
            return Err(ChunkError::config("min_sentences must be at least 1"));
        }
        if self.min_sentences > self.max_sentences {
            return Err(ChunkError::config(format!(
                "min_sentences ({}) exceeds max_sentences ({})",
                self.min_sentences, self.max_sentences
            )));
        }
        if self.batch_size == 0 {
            return Err(ChunkError::config("batch_size must be at least 1"));
        }
        if self.fallback_chunk_chars == 0 {
            return Err(ChunkError::config("fallback_chunk_chars must be at least 1"));
        }
        if !self.base_threshold.is_finite() {
            return Err(ChunkError::config("base_threshold must be finite"));
        }
        Ok(())
    }
}

/// Adaptive threshold configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptiveConfig {
    /// Starting threshold multiplier for a standalone learner. The
    /// chunker facade seeds its learner from
    /// `ChunkerConfig::base_threshold` instead.
    #[serde(default = "default_initial_multiplier")]
    pub initial_multiplier: f32,

    /// How quickly to adapt (0.01 = 1% per update).
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f32,

    /// Minimum allowed multiplier.
    #[serde(default = "default_min_multiplier")]
    pub min_multiplier: f32,

    /// Maximum allowed multiplier.
    #[serde(default = "default_max_multiplier")]
    pub max_multiplier: f32,

    /// Maximum retained feedback/multiplier history entries.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            initial_multiplier: 0.5,
            learning_rate: 0.01,
            min_multiplier: 0.2,
            max_multiplier: 0.8,
            history_limit: 256,
        }
    }
}

impl AdaptiveConfig {
    /// Validate parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.min_multiplier > self.max_multiplier {
            return Err(ChunkError::config(format!(
                "min_multiplier ({}) exceeds max_multiplier ({})",
                self.min_multiplier, self.max_multiplier
            )));
        }
        if self.initial_multiplier < self.min_multiplier
            || self.initial_multiplier > self.max_multiplier
        {
            return Err(ChunkError::config(format!(
                "initial_multiplier ({}) outside [{}, {}]",
                self.initial_multiplier, self.min_multiplier, self.max_multiplier
            )));
        }
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(ChunkError::config("learning_rate must be non-negative"));
        }
        if self.history_limit == 0 {
            return Err(ChunkError::config("history_limit must be at least 1"));
        }
        Ok(())
    }
}

impl EngineConfig {
    /// Validate all sections.
    pub fn validate(&self) -> Result<()> {
        self.chunker.validate()?;
        self.adaptive.validate()?;
        Ok(())
    }

    /// Load configuration from file.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| ChunkError::Config {
            message: format!("Failed to parse config: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default paths.
    pub fn load_default() -> Result<Self> {
        // Try user config first
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("semchunk").join("config.toml");
            if user_config.exists() {
                return Self::load(&user_config);
            }
        }

        // Try local config
        let local_config = PathBuf::from("semchunk.toml");
        if local_config.exists() {
            return Self::load(&local_config);
        }

        // Return defaults
        Ok(Self::default())
    }
}

// Default value functions

fn default_true() -> bool {
    true
}

fn default_min_sentences() -> usize {
    3
}

fn default_max_sentences() -> usize {
    30
}

fn default_base_threshold() -> f32 {
    0.5
}

fn default_batch_size() -> usize {
    96
}

fn default_min_sentence_chars() -> usize {
    10
}

fn default_fallback_chunk_chars() -> usize {
    1000
}

fn default_initial_multiplier() -> f32 {
    0.5
}

fn default_learning_rate() -> f32 {
    0.01
}

fn default_min_multiplier() -> f32 {
    0.2
}

fn default_max_multiplier() -> f32 {
    0.8
}

fn default_history_limit() -> usize {
    256
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.chunker.min_sentences, 3);
        assert_eq!(config.chunker.max_sentences, 30);
        assert_eq!(config.chunker.batch_size, 96);
        assert!(config.chunker.use_adaptive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_min_max() {
        let config = ChunkerConfig {
            min_sentences: 10,
            max_sentences: 5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ChunkError::Config { .. })
        ));
    }

    #[test]
    fn test_invalid_multiplier_bounds() {
        let config = AdaptiveConfig {
            min_multiplier: 0.8,
            max_multiplier: 0.2,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_initial_multiplier_outside_bounds() {
        let config = AdaptiveConfig {
            initial_multiplier: 0.9,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[chunker]\nmin_sentences = 2\nmax_sentences = 10\n\n[adaptive]\nlearning_rate = 0.05"
        )
        .unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.chunker.min_sentences, 2);
        assert_eq!(config.chunker.max_sentences, 10);
        assert_eq!(config.adaptive.learning_rate, 0.05);
        // Unspecified fields take defaults
        assert_eq!(config.chunker.batch_size, 96);
    }

    #[test]
    fn test_load_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[chunker]\nmin_sentences = 9\nmax_sentences = 3").unwrap();
        assert!(EngineConfig::load(file.path()).is_err());
    }
}
