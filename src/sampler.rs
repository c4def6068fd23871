use std::collections::HashSet;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::api::ApiError;
use crate::model::CategoryId;

/// Picks `count` distinct ids uniformly at random without replacement.
///
/// Repeated ids in `pool` count once. Order of the result is the sampling
/// order, which becomes the column order of the board.
pub fn sample_ids<R: Rng + ?Sized>(
    pool: &[CategoryId],
    count: usize,
    rng: &mut R,
) -> Result<Vec<CategoryId>, ApiError> {
    let mut seen = HashSet::new();
    let distinct: Vec<CategoryId> = pool.iter().copied().filter(|id| seen.insert(*id)).collect();

    if distinct.len() < count {
        return Err(ApiError::InsufficientCategories {
            wanted: count,
            available: distinct.len(),
        });
    }

    Ok(distinct.choose_multiple(rng, count).copied().collect())
}
