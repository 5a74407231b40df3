//! In-memory vector index with exact cosine scan.

use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use ragline_core::{IndexPoint, RaglineError, Result, ScoredPoint, VectorIndex};

/// An in-memory index that scores every stored point against the query.
///
/// Exact full-scan cosine, no ANN structure; intended for tests, small
/// corpora, and the CLI's ad-hoc ingest-and-query flow.
pub struct InMemoryIndex {
    points: RwLock<Vec<IndexPoint>>,
}

impl InMemoryIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            points: RwLock::new(Vec::new()),
        }
    }

    /// Number of stored points.
    ///
    /// Read-only accessors recover from a poisoned lock: the data is
    /// still consistent, only a past writer panicked.
    pub fn len(&self) -> usize {
        self.points.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the index holds no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// List stored sources with their chunk counts, sorted by name.
    pub fn sources(&self) -> Vec<(String, usize)> {
        let points = self.points.read().unwrap_or_else(|e| e.into_inner());
        let mut counts: std::collections::BTreeMap<String, usize> = std::collections::BTreeMap::new();
        for point in points.iter() {
            *counts.entry(point.payload.source.clone()).or_default() += 1;
        }
        counts.into_iter().collect()
    }
}

impl Default for InMemoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a < 1e-8 || norm_b < 1e-8 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn search(
        &self,
        vector: &[f32],
        limit: usize,
        source_filter: Option<&str>,
        with_vectors: bool,
    ) -> Result<Vec<ScoredPoint>> {
        let points = self
            .points
            .read()
            .map_err(|_| RaglineError::index("index lock poisoned"))?;

        let mut hits: Vec<ScoredPoint> = points
            .iter()
            .filter(|p| source_filter.map_or(true, |s| p.payload.source == s))
            .map(|p| {
                let payload = serde_json::to_value(&p.payload)?;
                Ok(ScoredPoint {
                    score: cosine(vector, &p.vector),
                    payload,
                    vector: with_vectors.then(|| p.vector.clone()),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(limit);

        debug!("Scanned {} points, returning {} hits", points.len(), hits.len());
        Ok(hits)
    }

    async fn upsert(&self, new_points: &[IndexPoint]) -> Result<()> {
        for point in new_points {
            if point.vector.is_empty() {
                return Err(RaglineError::index("cannot upsert a point with an empty vector"));
            }
        }

        let mut points = self
            .points
            .write()
            .map_err(|_| RaglineError::index("index lock poisoned"))?;
        for point in new_points {
            match points.iter_mut().find(|p| p.id == point.id) {
                Some(existing) => *existing = point.clone(),
                None => points.push(point.clone()),
            }
        }
        Ok(())
    }

    async fn delete_by_source(&self, source: &str) -> Result<usize> {
        let mut points = self
            .points
            .write()
            .map_err(|_| RaglineError::index("index lock poisoned"))?;
        let before = points.len();
        points.retain(|p| p.payload.source != source);
        let removed = before - points.len();
        debug!("Deleted {} points for source {}", removed, source);
        Ok(removed)
    }
}
