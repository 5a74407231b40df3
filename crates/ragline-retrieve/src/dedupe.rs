//! Duplicate suppression for ranked contexts.

use std::collections::HashSet;

use ragline_core::RankedContext;

/// Collapse near-identical hits, keeping the first occurrence.
///
/// The composite key is `(source, chunk_id, first 64 chars of text)`:
/// `source`/`chunk_id` alone are not unique across re-ingests, so the text
/// prefix guards against the index returning the same logical chunk twice.
/// Order-preserving and idempotent.
pub fn dedupe(contexts: Vec<RankedContext>) -> Vec<RankedContext> {
    let mut seen: HashSet<(String, u32, String)> = HashSet::new();

    contexts
        .into_iter()
        .filter(|ctx| {
            let key = (
                ctx.payload.source.clone(),
                ctx.payload.chunk_id,
                ctx.payload.text.chars().take(64).collect::<String>(),
            );
            seen.insert(key)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragline_core::ChunkPayload;

    fn ctx(score: f32, text: &str, source: &str, chunk_id: u32) -> RankedContext {
        RankedContext {
            score,
            payload: ChunkPayload::new(text, source, chunk_id),
        }
    }

    #[test]
    fn test_drops_exact_duplicates() {
        let contexts = vec![
            ctx(0.9, "same text", "a.txt", 0),
            ctx(0.8, "same text", "a.txt", 0),
            ctx(0.7, "other text", "a.txt", 1),
        ];

        let deduped = dedupe(contexts);
        assert_eq!(deduped.len(), 2);
        // First occurrence wins.
        assert!((deduped[0].score - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_same_id_different_text_kept() {
        // Re-ingest can reuse (source, chunk_id) with new content.
        let contexts = vec![
            ctx(0.9, "old content", "a.txt", 0),
            ctx(0.8, "new content", "a.txt", 0),
        ];
        assert_eq!(dedupe(contexts).len(), 2);
    }

    #[test]
    fn test_long_texts_compared_by_prefix() {
        let shared_prefix = "x".repeat(64);
        let contexts = vec![
            ctx(0.9, &format!("{shared_prefix} tail one"), "a.txt", 0),
            ctx(0.8, &format!("{shared_prefix} tail two"), "a.txt", 0),
        ];
        // Identical in the first 64 chars: treated as the same chunk.
        assert_eq!(dedupe(contexts).len(), 1);
    }

    #[test]
    fn test_order_preserved() {
        let contexts = vec![
            ctx(0.5, "b", "b.txt", 1),
            ctx(0.9, "a", "a.txt", 0),
        ];
        let deduped = dedupe(contexts);
        assert_eq!(deduped[0].payload.source, "b.txt");
    }

    #[test]
    fn test_idempotent() {
        let contexts = vec![
            ctx(0.9, "same", "a.txt", 0),
            ctx(0.8, "same", "a.txt", 0),
            ctx(0.7, "other", "b.txt", 2),
        ];

        let once = dedupe(contexts);
        let twice = dedupe(once.clone());
        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.payload, b.payload);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(dedupe(Vec::new()).is_empty());
    }
}
