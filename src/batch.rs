//! Per-candidate fan-out shared by the batch operations.

use crate::error::{ConfigurationError, EngineError};
use crate::model::SkippedCandidate;

/// Maps `f` over `items`, on the rayon pool when `parallel` is set and the
/// `parallel` feature is enabled. Output order always matches input order.
pub(crate) fn map_all<'a, T, R, F>(items: &'a [T], parallel: bool, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&'a T) -> R + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            use rayon::prelude::*;
            return items.par_iter().map(f).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    items.iter().map(f).collect()
}

/// Scored results plus the entries that failed input validation.
pub(crate) struct BatchOutcome<R> {
    pub scored: Vec<R>,
    pub skipped: Vec<SkippedCandidate>,
}

/// Scores every item, isolating input validation failures.
///
/// Results may borrow from `items`.
///
/// A configuration error aborts the whole batch: it would fail every item
/// the same way.
pub(crate) fn score_batch<'a, T, R, F>(
    items: &'a [T],
    parallel: bool,
    id: impl Fn(&T) -> &str,
    score: F,
) -> Result<BatchOutcome<R>, ConfigurationError>
where
    T: Sync,
    R: Send,
    F: Fn(&'a T) -> Result<R, EngineError> + Sync + Send,
{
    let outcomes = map_all(items, parallel, score);

    let mut scored = Vec::with_capacity(items.len());
    let mut skipped = Vec::new();
    for (index, (item, outcome)) in items.iter().zip(outcomes).enumerate() {
        match outcome {
            Ok(result) => scored.push(result),
            Err(EngineError::InputValidation(err)) => {
                let candidate_id = id(item).to_string();
                tracing::warn!(index, candidate_id = %candidate_id, error = %err, "skipping candidate");
                skipped.push(SkippedCandidate {
                    index,
                    candidate_id,
                    reason: err.to_string(),
                });
            }
            Err(EngineError::Configuration(err)) => return Err(err),
        }
    }

    Ok(BatchOutcome { scored, skipped })
}
