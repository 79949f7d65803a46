//! Deterministic ordering of scored items.

use std::cmp::Ordering;

/// Sorts items by score (highest first), breaking ties by id ascending.
///
/// Returns indices into `items`. NaN scores sort last. The sort is stable
/// and independent of input order for distinct ids.
pub fn rank_descending<T>(
    items: &[T],
    score: impl Fn(&T) -> f64,
    id: impl Fn(&T) -> &str,
) -> Vec<usize> {
    let scores: Vec<f64> = items.iter().map(&score).collect();
    let mut indices: Vec<usize> = (0..items.len()).collect();

    indices.sort_by(|&a, &b| {
        let (sa, sb) = (scores[a], scores[b]);
        let by_score = match (sa.is_nan(), sb.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => sb.total_cmp(&sa),
        };
        by_score.then_with(|| id(&items[a]).cmp(id(&items[b])))
    });

    indices
}
