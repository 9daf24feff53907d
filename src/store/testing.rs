//! Fault-injecting store used by engine unit tests.

use uuid::Uuid;

use crate::models::courier::Courier;
use crate::models::order::Order;
use crate::models::review::Review;
use crate::models::trust::{CourierAnalytics, TrustScoreCache};
use crate::store::{MemoryStore, StoreError, TrustStore};

/// Wraps a [`MemoryStore`] and fails selected operations.
pub struct FaultyStore {
    inner: MemoryStore,
    fail_cache_writes: bool,
    fail_orders_for: Option<Uuid>,
}

impl FaultyStore {
    /// Every trust cache upsert fails; everything else works.
    pub fn failing_cache_writes() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_cache_writes: true,
            fail_orders_for: None,
        }
    }

    /// Order fetches for the given courier fail; everything else works.
    pub fn failing_orders_for(courier_id: Uuid) -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_cache_writes: false,
            fail_orders_for: Some(courier_id),
        }
    }
}

impl TrustStore for FaultyStore {
    fn insert_courier(&self, courier: Courier) -> Result<(), StoreError> {
        self.inner.insert_courier(courier)
    }

    fn courier(&self, id: Uuid) -> Result<Option<Courier>, StoreError> {
        self.inner.courier(id)
    }

    fn couriers(&self) -> Result<Vec<Courier>, StoreError> {
        self.inner.couriers()
    }

    fn set_courier_active(&self, id: Uuid, is_active: bool) -> Result<Option<Courier>, StoreError> {
        self.inner.set_courier_active(id, is_active)
    }

    fn put_order(&self, order: Order) -> Result<(), StoreError> {
        self.inner.put_order(order)
    }

    fn order(&self, id: Uuid) -> Result<Option<Order>, StoreError> {
        self.inner.order(id)
    }

    fn orders_for_courier(&self, courier_id: Uuid) -> Result<Vec<Order>, StoreError> {
        if self.fail_orders_for == Some(courier_id) {
            return Err(StoreError::Read(format!(
                "orders unavailable for courier {courier_id}"
            )));
        }
        self.inner.orders_for_courier(courier_id)
    }

    fn insert_review(&self, review: Review) -> Result<(), StoreError> {
        self.inner.insert_review(review)
    }

    fn review_for_order(&self, order_id: Uuid) -> Result<Option<Review>, StoreError> {
        self.inner.review_for_order(order_id)
    }

    fn reviews_for_courier(&self, courier_id: Uuid) -> Result<Vec<Review>, StoreError> {
        self.inner.reviews_for_courier(courier_id)
    }

    fn trust_cache(&self, courier_id: Uuid) -> Result<Option<TrustScoreCache>, StoreError> {
        self.inner.trust_cache(courier_id)
    }

    fn trust_caches(&self) -> Result<Vec<TrustScoreCache>, StoreError> {
        self.inner.trust_caches()
    }

    fn upsert_trust_cache(&self, row: TrustScoreCache) -> Result<(), StoreError> {
        if self.fail_cache_writes {
            return Err(StoreError::Write("trust cache unavailable".to_string()));
        }
        self.inner.upsert_trust_cache(row)
    }

    fn analytics(&self, courier_id: Uuid) -> Result<Option<CourierAnalytics>, StoreError> {
        self.inner.analytics(courier_id)
    }

    fn upsert_analytics(&self, row: CourierAnalytics) -> Result<(), StoreError> {
        self.inner.upsert_analytics(row)
    }

    fn courier_count(&self) -> usize {
        self.inner.courier_count()
    }

    fn order_count(&self) -> usize {
        self.inner.order_count()
    }

    fn review_count(&self) -> usize {
        self.inner.review_count()
    }
}
