use std::cmp::Ordering;

use crate::error::{AppError, AppResult};
use crate::recs::similarity::similarity_row;
use crate::recs::vector_space::VectorSpace;

/// Share of the blended score contributed by textual similarity. Content
/// match dominates; recency is a freshness bonus and tie-breaker.
pub const SIMILARITY_WEIGHT: f64 = 0.7;

/// Share of the blended score contributed by recency
pub const RECENCY_WEIGHT: f64 = 0.3;

/// Default number of recommendations per video
pub const DEFAULT_TOP_K: usize = 10;

/// Ranks every other document in the space as a candidate for
/// `source_index` and returns up to `top_k` indices, best first.
///
/// `recency` must hold one precomputed weight per document, aligned with the
/// space's corpus order. Candidates are scored as
/// `SIMILARITY_WEIGHT * sim + RECENCY_WEIGHT * recency`, the source itself
/// is excluded, and ties keep original index order (stable sort). A catalog
/// with fewer than `top_k + 1` videos returns every candidate; a single-item
/// catalog returns an empty list.
pub fn rank(
    space: &VectorSpace,
    source_index: usize,
    recency: &[f64],
    top_k: usize,
) -> AppResult<Vec<usize>> {
    if recency.len() != space.len() {
        return Err(AppError::InvalidInput(format!(
            "recency weights cover {} videos but the space holds {}",
            recency.len(),
            space.len()
        )));
    }

    let similarities = similarity_row(space, source_index)?;

    let mut candidates: Vec<(usize, f64)> = similarities
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != source_index)
        .map(|(j, &sim)| (j, SIMILARITY_WEIGHT * sim + RECENCY_WEIGHT * recency[j]))
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    candidates.truncate(top_k);

    Ok(candidates.into_iter().map(|(j, _)| j).collect())
}
