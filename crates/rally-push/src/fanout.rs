//! Fan-out primitive - launch N operations, join all, keep every outcome
//!
//! Partial failures stay observable per operation; one failure never
//! aborts the batch.

use std::future::Future;

/// Run all operations concurrently and collect each outcome in input order
pub async fn join_all_outcomes<F, T, E>(ops: Vec<F>) -> Vec<Result<T, E>>
where
    F: Future<Output = Result<T, E>>,
{
    futures::future::join_all(ops).await
}

/// Count successes in a batch of outcomes
pub fn count_ok<T, E>(outcomes: &[Result<T, E>]) -> usize {
    outcomes.iter().filter(|o| o.is_ok()).count()
}
