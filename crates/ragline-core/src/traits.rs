//! Traits for the external collaborators of the pipeline.
//!
//! The pipeline never talks to a concrete embedding model, vector index, or
//! generator. It talks to these traits; production adapters and the
//! in-memory reference implementations live behind them.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{IndexPoint, PromptMessage, ScoredPoint};

/// Embedding provider.
///
/// Implementations must tolerate concurrent read-only invocation; the
/// handle is shared across request tasks.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single query text into a fixed-length vector.
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of document texts; output order matches input order.
    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Embedding dimensionality.
    fn dimension(&self) -> usize;
}

/// Approximate-nearest-neighbor vector index.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Query for the `limit` nearest points.
    ///
    /// The index may return fewer than `limit` hits; zero hits is a valid
    /// result, not an error. `source_filter` is an exact match on the
    /// payload's `source` field. `with_vectors` requests raw vectors in the
    /// results.
    async fn search(
        &self,
        vector: &[f32],
        limit: usize,
        source_filter: Option<&str>,
        with_vectors: bool,
    ) -> Result<Vec<ScoredPoint>>;

    /// Store a batch of points.
    async fn upsert(&self, points: &[IndexPoint]) -> Result<()>;

    /// Delete all points belonging to a source document.
    ///
    /// Returns the number of points removed.
    async fn delete_by_source(&self, source: &str) -> Result<usize>;
}

/// Model-specific token counter.
///
/// Infallible so that prompt assembly can always terminate by degrading;
/// wrappers over fallible tokenizers are expected to fall back internally.
pub trait TokenCounter: Send + Sync {
    /// Count tokens in `text` using the generator's tokenizer.
    fn count_tokens(&self, text: &str) -> usize;
}

/// Text generator. Opaque to the pipeline.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion for an ordered list of role-tagged messages.
    async fn generate(&self, messages: &[PromptMessage]) -> Result<String>;
}
