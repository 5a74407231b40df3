//! Deterministic hash embedder and heuristic token counter.

use async_trait::async_trait;

use ragline_core::{Embedder, Result, TokenCounter};

/// A deterministic embedder that derives vectors from a text hash.
///
/// Useful for tests and offline CLI runs; semantically unrelated texts
/// still land far apart often enough for the pipeline to exercise its
/// ranking paths, and identical texts always embed identically.
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    /// Create a new hash embedder with the default dimension.
    pub fn new() -> Self {
        Self { dimension: 768 }
    }

    /// Create a hash embedder with a custom dimension.
    pub fn with_dimension(dimension: usize) -> Self {
        Self { dimension }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let seed = text
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut embedding = vec![0.0f32; self.dimension];
        for (i, v) in embedding.iter_mut().enumerate() {
            *v = ((seed.wrapping_mul(i as u64 + 1)) as f32 % 1000.0) / 1000.0 - 0.5;
        }
        // L2 normalize
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut embedding {
                *x /= norm;
            }
        }
        embedding
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_one(text))
    }

    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Character-count token estimate, roughly four characters per token.
pub struct HeuristicTokenCounter;

impl TokenCounter for HeuristicTokenCounter {
    fn count_tokens(&self, text: &str) -> usize {
        text.chars().count() / 4 + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_deterministic_embeddings() {
        let embedder = HashEmbedder::new();
        let e1 = embedder.embed_query("consistent input").await.unwrap();
        let e2 = embedder.embed_query("consistent input").await.unwrap();
        assert_eq!(e1, e2);
    }

    #[tokio::test]
    async fn test_different_texts_different_embeddings() {
        let embedder = HashEmbedder::new();
        let e1 = embedder.embed_query("hello").await.unwrap();
        let e2 = embedder.embed_query("world").await.unwrap();
        assert_ne!(e1, e2);
    }

    #[tokio::test]
    async fn test_l2_normalized() {
        let embedder = HashEmbedder::new();
        let embedding = embedder.embed_query("some text").await.unwrap();
        assert_eq!(embedding.len(), 768);
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 0.01);
    }

    #[tokio::test]
    async fn test_custom_dimension() {
        let embedder = HashEmbedder::with_dimension(384);
        assert_eq!(embedder.dimension(), 384);
        let embedding = embedder.embed_query("test").await.unwrap();
        assert_eq!(embedding.len(), 384);
    }

    #[tokio::test]
    async fn test_batch_matches_single() {
        let embedder = HashEmbedder::new();
        let batch = embedder.embed_documents(&["a", "b"]).await.unwrap();
        let single = embedder.embed_query("a").await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], single);
    }

    #[test]
    fn test_token_counter_monotonic() {
        let counter = HeuristicTokenCounter;
        assert_eq!(counter.count_tokens(""), 1);
        assert!(counter.count_tokens("a longer piece of text") > counter.count_tokens("hi"));
    }
}
