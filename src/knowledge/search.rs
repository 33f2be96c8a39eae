//! Brute-force semantic search over stored embeddings.
//!
//! No index: every embedded fact is decoded and cosine-scored against the
//! query, filtered by [`MIN_SIMILARITY`], ranked, and truncated. O(n · d)
//! per query — sized for a personal knowledge base, not a large corpus.

use rusqlite::Connection;

use super::error::KnowledgeError;
use super::facts;
use super::types::SearchResult;

/// Results must score strictly above this to be returned.
pub const MIN_SIMILARITY: f64 = 0.5;

/// Cosine similarity between two vectors, accumulated in f64.
///
/// Mismatched lengths and zero-magnitude vectors score 0.0 rather than
/// erroring, which the threshold filter then discards.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += f64::from(*x) * f64::from(*y);
        norm_a += f64::from(*x) * f64::from(*x);
        norm_b += f64::from(*y) * f64::from(*y);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Scan all embedded facts, score them against `query`, and return the top
/// `limit` results above [`MIN_SIMILARITY`], best first.
///
/// Facts without a stored embedding are excluded entirely. A `limit` of 0
/// yields an empty result set.
pub fn search_by_embedding(
    conn: &Connection,
    query: &[f32],
    limit: usize,
) -> Result<Vec<SearchResult>, KnowledgeError> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let facts = facts::get_all_facts(conn, true)?;

    let mut results: Vec<SearchResult> = facts
        .into_iter()
        .filter(|f| f.embedding.is_some())
        .map(|fact| {
            let similarity = fact
                .embedding
                .as_deref()
                .map(|emb| cosine_similarity(query, emb))
                .unwrap_or(0.0);
            SearchResult { fact, similarity }
        })
        .filter(|r| r.similarity > MIN_SIMILARITY)
        .collect();

    // Stable sort keeps prior (recency) order for equal scores
    results.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results.truncate(limit);
    Ok(results)
}
