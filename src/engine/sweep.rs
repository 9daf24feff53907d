use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::calculator;
use crate::models::trust::CourierMetrics;
use crate::store::{StoreError, TrustStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResult {
    pub courier_id: Uuid,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<CourierMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Recomputes every active courier, one at a time in courier id order.
///
/// A failure on one courier is recorded and the sweep moves on; the result
/// list always has one entry per active courier. Failing to list the
/// couriers at all is the only fatal error. No retries, no concurrency.
pub fn run<S: TrustStore>(store: &S) -> Result<Vec<SweepResult>, StoreError> {
    let mut couriers = store.couriers()?;
    couriers.retain(|courier| courier.is_active);
    couriers.sort_by_key(|courier| courier.id);

    info!(couriers = couriers.len(), "trust score sweep started");

    let mut results = Vec::with_capacity(couriers.len());
    for courier in &couriers {
        match calculator::recalculate(store, courier.id) {
            Ok(metrics) => results.push(SweepResult {
                courier_id: courier.id,
                success: true,
                metrics: Some(metrics),
                error: None,
            }),
            Err(err) => {
                warn!(courier_id = %courier.id, error = %err, "sweep recalculation failed");
                results.push(SweepResult {
                    courier_id: courier.id,
                    success: false,
                    metrics: None,
                    error: Some(err.to_string()),
                });
            }
        }
    }

    let failed = results.iter().filter(|r| !r.success).count();
    info!(
        couriers = results.len(),
        failed, "trust score sweep finished"
    );

    Ok(results)
}
