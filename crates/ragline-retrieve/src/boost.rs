//! Lexical hybrid boosting.
//!
//! A thin lexical signal layered on top of vector similarity: candidates
//! whose text mentions the query's keywords get a small additive score
//! bump, which nudges exact-term matches above merely-semantic neighbors.

use ragline_core::RankedContext;

/// Maximum keywords extracted from a query.
const MAX_KEYWORDS: usize = 6;

/// Function words excluded from keyword extraction.
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "of", "to", "in", "on", "at", "and", "or",
    "for", "with", "it", "this", "that", "what", "which", "who", "how", "when", "where",
    "です", "ます", "ください", "について", "とは",
];

/// Extract up to [`MAX_KEYWORDS`] keyword tokens from a query.
///
/// Tokens are maximal alphanumeric/CJK runs, lowercased, at least two
/// characters, stopwords excluded, deduplicated case-insensitively, kept
/// in first-occurrence order.
pub fn extract_keywords(query: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();

    for run in query.split(|c: char| !c.is_alphanumeric()) {
        if keywords.len() >= MAX_KEYWORDS {
            break;
        }
        let token = run.to_lowercase();
        if token.chars().count() < 2 {
            continue;
        }
        if STOPWORDS.contains(&token.as_str()) {
            continue;
        }
        if keywords.contains(&token) {
            continue;
        }
        keywords.push(token);
    }

    keywords
}

/// Apply the additive keyword boost and re-sort by adjusted score.
///
/// Each extracted keyword found as a substring of the candidate's
/// case-folded title/text/source adds `boost_per_hit` to its base score;
/// multiple hits compound. The sort is stable and descending, so ties
/// preserve relative input order.
pub fn boost(
    contexts: Vec<RankedContext>,
    query: &str,
    boost_per_hit: f32,
) -> Vec<RankedContext> {
    let keywords = extract_keywords(query);

    let mut boosted: Vec<RankedContext> = contexts
        .into_iter()
        .map(|mut ctx| {
            let haystack = format!(
                "{} {} {}",
                ctx.payload.title.as_deref().unwrap_or(""),
                ctx.payload.text,
                ctx.payload.source
            )
            .to_lowercase();

            let hits = keywords.iter().filter(|kw| haystack.contains(kw.as_str())).count();
            ctx.score += boost_per_hit * hits as f32;
            ctx
        })
        .collect();

    // Vec::sort_by is stable; ties keep input order.
    boosted.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    boosted
}
