use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::engine::calculator;
use crate::models::trust::TrustScoreCache;
use crate::store::{StoreError, TrustStore};

/// Whether a lookup was served from the memo table or forced a recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Recomputed,
}

/// Serves the memoized score for a courier, recomputing at most once.
///
/// A present row is returned as-is regardless of age; there is no TTL and no
/// staleness bound. On a miss the calculator runs, the row is re-read once,
/// and if the cache write itself failed the row shape is synthesized from
/// the freshly computed metrics so both paths return the same payload.
pub fn cached_score<S: TrustStore>(
    store: &S,
    courier_id: Uuid,
) -> Result<(TrustScoreCache, CacheOutcome), StoreError> {
    if let Some(row) = store.trust_cache(courier_id)? {
        return Ok((row, CacheOutcome::Hit));
    }

    let metrics = calculator::recalculate(store, courier_id)?;

    let row = match store.trust_cache(courier_id) {
        Ok(Some(row)) => row,
        Ok(None) => TrustScoreCache::from_metrics(courier_id, &metrics, Utc::now()),
        Err(err) => {
            warn!(courier_id = %courier_id, error = %err, "cache re-read failed after recompute");
            TrustScoreCache::from_metrics(courier_id, &metrics, Utc::now())
        }
    };

    Ok((row, CacheOutcome::Recomputed))
}
