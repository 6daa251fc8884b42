//! Pack building: HSK-level fallback cascade on top of the sampler.

use rand::Rng;
use serde::Serialize;

use crate::sampler::sample;
use crate::types::{HskLevel, MissingWeight, PackRequest, PoolScope, WordRecord};

/// Cards drawn for one pack request.
#[derive(Debug, Clone, Serialize)]
pub struct Pack<'a> {
    /// Drawn cards in draw order.
    pub cards: Vec<&'a WordRecord>,
    pub scope: PoolScope,
    pub pool_size: usize,
    /// How many cards short of the requested count the pack came out.
    pub shortfall: usize,
}

/// Build the candidate pool for a pack, widening until it can fill `count`.
///
/// Tries the target level, then levels within one of it, then the whole
/// catalog. Unleveled words only appear in the last step.
pub fn candidate_pool(
    catalog: &[WordRecord],
    target: HskLevel,
    count: usize,
) -> (Vec<&WordRecord>, PoolScope) {
    let exact: Vec<&WordRecord> = catalog
        .iter()
        .filter(|w| w.hsk_level == Some(target))
        .collect();
    if exact.len() >= count {
        return (exact, PoolScope::Exact);
    }

    let adjacent: Vec<&WordRecord> = catalog
        .iter()
        .filter(|w| w.hsk_level.is_some_and(|level| target.is_adjacent_to(level)))
        .collect();
    if adjacent.len() >= count {
        return (adjacent, PoolScope::Adjacent);
    }

    (catalog.iter().collect(), PoolScope::Any)
}

/// Open a pack: pick the pool once, then draw weighted by frequency.
pub fn open_pack<'a, R>(
    catalog: &'a [WordRecord],
    request: &PackRequest,
    missing: MissingWeight,
    rng: &mut R,
) -> Pack<'a>
where
    R: Rng + ?Sized,
{
    let (pool, scope) = candidate_pool(catalog, request.target_level, request.count);
    let cards: Vec<&'a WordRecord> = sample(&pool, request.count, |w| w.weight(missing), rng)
        .into_iter()
        .copied()
        .collect();

    Pack {
        shortfall: request.count.saturating_sub(cards.len()),
        pool_size: pool.len(),
        cards,
        scope,
    }
}
