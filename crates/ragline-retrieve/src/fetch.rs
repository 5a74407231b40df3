//! Candidate fetching: one embedding call, one over-fetched index query.

use std::sync::Arc;

use tracing::{debug, warn};

use ragline_core::{Candidate, ChunkPayload, Embedder, Result, VectorIndex};

/// Over-fetch multiplier; MMR needs headroom beyond `top_k` to diversify.
const FETCH_MULTIPLIER: usize = 3;

/// Minimum candidates requested regardless of `top_k`.
const FETCH_FLOOR: usize = 12;

/// Fetches raw ANN candidates for a query.
pub struct CandidateFetcher<I, E> {
    /// Vector index.
    index: Arc<I>,

    /// Embedding provider.
    embedder: Arc<E>,
}

impl<I, E> CandidateFetcher<I, E>
where
    I: VectorIndex,
    E: Embedder,
{
    /// Create a new fetcher.
    pub fn new(index: Arc<I>, embedder: Arc<E>) -> Self {
        Self { index, embedder }
    }

    /// Embed the query once and fetch candidates with vectors included.
    ///
    /// Requests `max(top_k * 3, 12)` hits, optionally constrained to an
    /// exact-match `source` filter. Zero hits is a valid empty result;
    /// transport failures propagate without retry.
    pub async fn fetch(
        &self,
        query_text: &str,
        top_k: usize,
        source_filter: Option<&str>,
    ) -> Result<(Vec<f32>, Vec<Candidate>)> {
        let query_vector = self.embedder.embed_query(query_text).await?;

        let limit = (top_k * FETCH_MULTIPLIER).max(FETCH_FLOOR);
        let hits = self
            .index
            .search(&query_vector, limit, source_filter, true)
            .await?;

        debug!("Index returned {} hits for limit {}", hits.len(), limit);

        let candidates = hits
            .into_iter()
            .map(|hit| {
                let vector = hit.vector.unwrap_or_else(|| {
                    warn!("Index hit without vector; it will score zero redundancy");
                    Vec::new()
                });
                Candidate {
                    score: hit.score,
                    payload: ChunkPayload::from_value(&hit.payload),
                    vector,
                }
            })
            .collect();

        Ok((query_vector, candidates))
    }
}
