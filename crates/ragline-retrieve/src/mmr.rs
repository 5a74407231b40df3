//! Maximal Marginal Relevance selection.

/// Norm guard for near-zero vectors.
const EPSILON: f32 = 1e-8;

/// Cosine similarity with defensive normalization.
///
/// Upstream embeddings are expected pre-normalized, but index-returned
/// vectors are not trusted: both norms are divided out, zero-norm and
/// length-mismatched inputs score 0.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a < EPSILON || norm_b < EPSILON {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Greedy MMR selection over candidate vectors.
///
/// Each iteration scores every remaining candidate as
/// `lambda * relevance - (1 - lambda) * max_redundancy` where relevance is
/// cosine to the query and redundancy is the maximum cosine to any already
/// selected candidate (0 while none are selected). The best remaining
/// candidate moves to the selected set; on ties the first candidate in
/// original index order wins.
///
/// Returns `min(k, candidates.len())` distinct indices in selection order.
pub fn mmr_select(
    query_vector: &[f32],
    candidate_vectors: &[Vec<f32>],
    k: usize,
    lambda: f32,
) -> Vec<usize> {
    let n = candidate_vectors.len();
    let take = k.min(n);

    // Relevance is fixed per candidate; compute it once.
    let relevance: Vec<f32> = candidate_vectors
        .iter()
        .map(|v| cosine(query_vector, v))
        .collect();

    let mut selected: Vec<usize> = Vec::with_capacity(take);
    let mut remaining: Vec<usize> = (0..n).collect();

    while selected.len() < take {
        let mut best_pos = 0usize;
        let mut best_score = f32::NEG_INFINITY;

        for (pos, &i) in remaining.iter().enumerate() {
            let redundancy = selected
                .iter()
                .map(|&j| cosine(&candidate_vectors[i], &candidate_vectors[j]))
                .fold(0.0f32, f32::max);

            let score = lambda * relevance[i] - (1.0 - lambda) * redundancy;

            // Strict greater-than keeps the first index on ties.
            if score > best_score {
                best_score = score;
                best_pos = pos;
            }
        }

        selected.push(remaining.remove(best_pos));
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical() {
        let v = vec![0.6, 0.8];
        assert!((cosine(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        assert!(cosine(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_unnormalized() {
        // Same direction, different magnitudes: still 1.0.
        assert!((cosine(&[3.0, 4.0], &[6.0, 8.0]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_zero_norm_guard() {
        assert_eq!(cosine(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_cosine_length_mismatch() {
        assert_eq!(cosine(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine(&[], &[]), 0.0);
    }

    #[test]
    fn test_selection_size_and_bounds() {
        let query = vec![1.0, 0.0];
        let candidates = vec![
            vec![1.0, 0.0],
            vec![0.9, 0.1],
            vec![0.0, 1.0],
            vec![0.5, 0.5],
        ];

        let selected = mmr_select(&query, &candidates, 3, 0.7);
        assert_eq!(selected.len(), 3);
        let mut unique = selected.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 3);
        assert!(selected.iter().all(|&i| i < candidates.len()));

        // k larger than the candidate count.
        let all = mmr_select(&query, &candidates, 10, 0.7);
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_empty_candidates() {
        assert!(mmr_select(&[1.0], &[], 5, 0.7).is_empty());
    }

    #[test]
    fn test_diversity_dominates_at_lambda_zero() {
        // Candidate 0 is most relevant; candidate 1 is nearly identical to
        // it; candidate 2 points away. With lambda = 0 the second pick must
        // be the diverse one.
        let query = vec![1.0, 0.0];
        let candidates = vec![
            vec![1.0, 0.0],
            vec![0.999, 0.04],
            vec![0.0, 1.0],
        ];

        let selected = mmr_select(&query, &candidates, 2, 0.0);
        assert_eq!(selected[1], 2);
    }

    #[test]
    fn test_near_duplicate_tie_break() {
        // Candidates 1 and 2 are near-duplicate vectors; after picking the
        // best candidate, the redundancy penalty plus first-wins tie-break
        // must prefer the earlier of the pair.
        let query = vec![1.0, 0.0];
        let candidates = vec![
            vec![1.0, 0.0],
            vec![0.95, 0.3122],
            vec![0.95, 0.3122],
        ];

        let selected = mmr_select(&query, &candidates, 2, 0.7);
        assert_eq!(selected, vec![0, 1]);
    }

    #[test]
    fn test_lambda_one_is_pure_relevance() {
        let query = vec![1.0, 0.0];
        let candidates = vec![
            vec![0.5, 0.5],
            vec![1.0, 0.0],
            vec![0.9, 0.1],
        ];

        let selected = mmr_select(&query, &candidates, 3, 1.0);
        assert_eq!(selected[0], 1);
    }
}
