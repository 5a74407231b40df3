//! ragline-chunk - Sentence-aware greedy chunking
//!
//! Splits raw document text into overlapping, token-bounded chunks for
//! embedding. Sentences are never split: the chunker accumulates whole
//! sentences greedily against an estimated token budget and seeds each new
//! chunk with a suffix overlap from the previous one.
//!
//! # Example
//!
//! ```rust
//! use ragline_chunk::GreedyChunker;
//! use ragline_core::ChunkingConfig;
//!
//! let chunker = GreedyChunker::new(ChunkingConfig::default());
//! let chunks = chunker.chunk("First sentence. Second sentence.");
//! ```

mod greedy;
mod sentence;

pub use greedy::GreedyChunker;
pub use sentence::split_sentences;

// Re-export for convenience
pub use ragline_core::{ChunkPayload, ChunkingConfig};
