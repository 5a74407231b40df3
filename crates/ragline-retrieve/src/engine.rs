//! Retrieval engine: fetch, diversify, boost, dedupe.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use ragline_core::{
    Embedder, RaglineError, RankedContext, Result, RetrievalConfig, VectorIndex,
};

use crate::boost::boost;
use crate::dedupe::dedupe;
use crate::fetch::CandidateFetcher;
use crate::mmr::mmr_select;

/// Diversity-aware retrieval engine.
///
/// Runs the query-time pipeline: embed + over-fetch, MMR re-ranking over
/// the candidate vectors, lexical keyword boost, duplicate suppression,
/// and truncation to `top_k`.
pub struct RetrievalEngine<I, E> {
    /// Candidate fetcher.
    fetcher: CandidateFetcher<I, E>,

    /// Ranking configuration.
    config: RetrievalConfig,
}

impl<I, E> RetrievalEngine<I, E>
where
    I: VectorIndex,
    E: Embedder,
{
    /// Create a new engine.
    pub fn new(index: Arc<I>, embedder: Arc<E>, config: RetrievalConfig) -> Self {
        Self {
            fetcher: CandidateFetcher::new(index, embedder),
            config,
        }
    }

    /// Retrieve the top contexts for a query.
    ///
    /// An empty or whitespace-only query is rejected before any provider
    /// call. Zero index hits yield an empty list, signaling "no relevant
    /// context" to the caller.
    pub async fn retrieve(
        &self,
        query_text: &str,
        source_filter: Option<&str>,
    ) -> Result<Vec<RankedContext>> {
        if query_text.trim().is_empty() {
            return Err(RaglineError::EmptyQuery);
        }

        let start = Instant::now();
        let top_k = self.config.top_k;

        let (query_vector, candidates) = self
            .fetcher
            .fetch(query_text, top_k, source_filter)
            .await?;

        if candidates.is_empty() {
            info!("No candidates for query; returning empty context list");
            return Ok(Vec::new());
        }

        let vectors: Vec<Vec<f32>> = candidates.iter().map(|c| c.vector.clone()).collect();
        let selected = mmr_select(&query_vector, &vectors, top_k, self.config.mmr_lambda);

        debug!(
            "MMR selected {} of {} candidates",
            selected.len(),
            candidates.len()
        );

        // Past MMR the vectors are no longer needed; keep score + payload.
        let ranked: Vec<RankedContext> = selected
            .iter()
            .map(|&i| RankedContext {
                score: candidates[i].score,
                payload: candidates[i].payload.clone(),
            })
            .collect();

        let ranked = boost(ranked, query_text, self.config.keyword_boost);
        let mut ranked = dedupe(ranked);
        ranked.truncate(top_k);

        info!(
            "Retrieved {} contexts in {}ms",
            ranked.len(),
            start.elapsed().as_millis()
        );

        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ragline_core::{IndexPoint, ScoredPoint};
    use serde_json::json;

    struct FixedEmbedder;

    #[async_trait]
    impl Embedder for FixedEmbedder {
        async fn embed_query(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0, 0.0])
        }

        async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
        }

        fn dimension(&self) -> usize {
            2
        }
    }

    struct CannedIndex {
        hits: Vec<ScoredPoint>,
    }

    #[async_trait]
    impl VectorIndex for CannedIndex {
        async fn search(
            &self,
            _vector: &[f32],
            _limit: usize,
            _source_filter: Option<&str>,
            _with_vectors: bool,
        ) -> Result<Vec<ScoredPoint>> {
            Ok(self.hits.clone())
        }

        async fn upsert(&self, _points: &[IndexPoint]) -> Result<()> {
            Ok(())
        }

        async fn delete_by_source(&self, _source: &str) -> Result<usize> {
            Ok(0)
        }
    }

    fn hit(score: f32, text: &str, source: &str, chunk_id: u32, vector: Vec<f32>) -> ScoredPoint {
        ScoredPoint {
            score,
            payload: json!({"text": text, "source": source, "chunk_id": chunk_id}),
            vector: Some(vector),
        }
    }

    fn engine(hits: Vec<ScoredPoint>, config: RetrievalConfig) -> RetrievalEngine<CannedIndex, FixedEmbedder> {
        RetrievalEngine::new(Arc::new(CannedIndex { hits }), Arc::new(FixedEmbedder), config)
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let engine = engine(Vec::new(), RetrievalConfig::default());
        let err = engine.retrieve("   ", None).await.unwrap_err();
        assert!(matches!(err, RaglineError::EmptyQuery));
    }

    #[tokio::test]
    async fn test_zero_hits_empty_result() {
        let engine = engine(Vec::new(), RetrievalConfig::default());
        let contexts = engine.retrieve("anything", None).await.unwrap();
        assert!(contexts.is_empty());
    }

    #[tokio::test]
    async fn test_near_duplicate_scenario() {
        // Scores [0.9, 0.85, 0.84]; candidates 2 and 3 are near-duplicate
        // vectors. With lambda 0.7 and k = 2, MMR must select candidate 1
        // and the first-encountered of the duplicate pair.
        let hits = vec![
            hit(0.90, "the deadline is Friday", "a.txt", 0, vec![1.0, 0.0]),
            hit(0.85, "deadline details first", "b.txt", 0, vec![0.8, 0.6]),
            hit(0.84, "deadline details second", "c.txt", 0, vec![0.8, 0.6]),
        ];
        let config = RetrievalConfig {
            top_k: 2,
            mmr_lambda: 0.7,
            keyword_boost: 0.0,
        };
        let engine = engine(hits, config);

        let contexts = engine.retrieve("What is the deadline?", None).await.unwrap();
        assert_eq!(contexts.len(), 2);
        assert_eq!(contexts[0].payload.source, "a.txt");
        assert_eq!(contexts[1].payload.source, "b.txt");
    }

    #[tokio::test]
    async fn test_boost_then_dedupe_then_truncate() {
        let hits = vec![
            hit(0.9, "alpha text", "a.txt", 0, vec![1.0, 0.0]),
            hit(0.8, "alpha text", "a.txt", 0, vec![0.0, 1.0]),
            hit(0.7, "beta text", "b.txt", 0, vec![0.5, 0.5]),
        ];
        let config = RetrievalConfig {
            top_k: 3,
            mmr_lambda: 0.7,
            keyword_boost: 0.05,
        };
        let engine = engine(hits, config);

        let contexts = engine.retrieve("alpha", None).await.unwrap();
        // The duplicate (a.txt, 0, "alpha text") collapses to one entry.
        assert_eq!(contexts.len(), 2);
        assert_eq!(contexts[0].payload.source, "a.txt");
    }

    #[tokio::test]
    async fn test_ranked_contexts_carry_no_vectors() {
        // RankedContext is Candidate minus its vector; the type itself
        // enforces that, this just pins the pipeline output shape.
        let hits = vec![hit(0.9, "text", "a.txt", 0, vec![1.0, 0.0])];
        let engine = engine(hits, RetrievalConfig::default());
        let contexts = engine.retrieve("text", None).await.unwrap();
        assert_eq!(contexts.len(), 1);
        assert!(contexts[0].score >= 0.9);
    }
}
