use crate::models::trust::LeaderboardEntry;
use crate::store::{StoreError, TrustStore};

/// Top couriers by cached overall score, joined with display metadata.
///
/// Equal scores are broken by courier id ascending so the ordering is
/// stable across calls. Cache rows whose courier record no longer exists
/// are skipped. This is a pure read; a missing cache entry for some
/// courier never triggers recomputation here.
pub fn build<S: TrustStore>(store: &S, limit: usize) -> Result<Vec<LeaderboardEntry>, StoreError> {
    let mut rows = store.trust_caches()?;

    rows.sort_by(|a, b| {
        b.overall_score
            .total_cmp(&a.overall_score)
            .then_with(|| a.courier_id.cmp(&b.courier_id))
    });

    let mut entries = Vec::with_capacity(limit.min(rows.len()));
    for row in rows {
        if entries.len() >= limit {
            break;
        }
        let Some(courier) = store.courier(row.courier_id)? else {
            continue;
        };
        entries.push(LeaderboardEntry {
            courier_id: row.courier_id,
            courier_name: courier.name,
            courier_code: courier.code,
            logo_url: courier.logo_url,
            overall_score: row.overall_score,
            total_reviews: row.total_reviews,
            last_updated: row.last_updated,
        });
    }

    Ok(entries)
}
