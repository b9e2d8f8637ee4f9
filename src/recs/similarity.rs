use std::cmp::Ordering;

use crate::error::{AppError, AppResult};
use crate::recs::vector_space::{SparseVector, VectorSpace};

/// Computes the cosine similarity of one document against every document in
/// the space, in one pass.
///
/// Returns a dense row of length N. Vectors are already L2-normalized, so a
/// sparse dot product is the cosine; self-similarity comes out at ~1.0 (or
/// exactly 0.0 for a degenerate all-zero vector). The row for an index is
/// the same whether it is computed on its own or as part of an all-pairs
/// sweep.
///
/// Errors with `AppError::IndexOutOfRange` when `index >= N`; that signals
/// an index↔catalog mismatch in the caller and must propagate.
pub fn similarity_row(space: &VectorSpace, index: usize) -> AppResult<Vec<f64>> {
    let vectors = space.vectors();
    let source = vectors.get(index).ok_or(AppError::IndexOutOfRange {
        index,
        len: vectors.len(),
    })?;

    Ok(vectors
        .iter()
        .map(|candidate| sparse_dot(source, candidate))
        .collect())
}

/// Dot product of two column-sorted sparse vectors
fn sparse_dot(a: &SparseVector, b: &SparseVector) -> f64 {
    let mut acc = 0.0;
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                acc += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }

    acc
}
