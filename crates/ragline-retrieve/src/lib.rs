//! ragline-retrieve - Candidate retrieval and re-ranking
//!
//! Query-time half of the pipeline: embed the query once, over-fetch
//! candidates from the vector index, diversify with Maximal Marginal
//! Relevance, apply the lexical hybrid boost, suppress duplicates, and
//! hand the top contexts to prompt assembly.
//!
//! # Example
//!
//! ```rust,ignore
//! use ragline_retrieve::RetrievalEngine;
//! use std::sync::Arc;
//!
//! let engine = RetrievalEngine::new(Arc::new(index), Arc::new(embedder), config);
//! let contexts = engine.retrieve("What is the deadline?", None).await?;
//! ```

mod boost;
mod dedupe;
mod engine;
mod fetch;
mod mmr;

pub use boost::{boost, extract_keywords};
pub use dedupe::dedupe;
pub use engine::RetrievalEngine;
pub use fetch::CandidateFetcher;
pub use mmr::{cosine, mmr_select};

// Re-export for convenience
pub use ragline_core::{Candidate, RankedContext, RetrievalConfig};
