//! semchunk-core - Core types and traits for the semantic chunking engine
//!
//! This crate provides the foundational types, traits, error handling,
//! and configuration used by the chunking pipeline.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::{ChunkError, Result};
pub use traits::*;
pub use types::*;
