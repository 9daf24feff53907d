use dashmap::DashMap;
use uuid::Uuid;

use crate::models::courier::Courier;
use crate::models::order::Order;
use crate::models::review::Review;
use crate::models::trust::{CourierAnalytics, TrustScoreCache};
use crate::store::{StoreError, TrustStore};

/// In-process table set backed by concurrent maps. Upserts are
/// last-write-wins; concurrent recomputations for the same courier race
/// benignly at this layer.
#[derive(Default)]
pub struct MemoryStore {
    couriers: DashMap<Uuid, Courier>,
    orders: DashMap<Uuid, Order>,
    reviews: DashMap<Uuid, Review>,
    trust_caches: DashMap<Uuid, TrustScoreCache>,
    analytics: DashMap<Uuid, CourierAnalytics>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TrustStore for MemoryStore {
    fn insert_courier(&self, courier: Courier) -> Result<(), StoreError> {
        self.couriers.insert(courier.id, courier);
        Ok(())
    }

    fn courier(&self, id: Uuid) -> Result<Option<Courier>, StoreError> {
        Ok(self.couriers.get(&id).map(|entry| entry.value().clone()))
    }

    fn couriers(&self) -> Result<Vec<Courier>, StoreError> {
        Ok(self
            .couriers
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    fn set_courier_active(&self, id: Uuid, is_active: bool) -> Result<Option<Courier>, StoreError> {
        match self.couriers.get_mut(&id) {
            Some(mut courier) => {
                courier.is_active = is_active;
                Ok(Some(courier.clone()))
            }
            None => Ok(None),
        }
    }

    fn put_order(&self, order: Order) -> Result<(), StoreError> {
        self.orders.insert(order.id, order);
        Ok(())
    }

    fn order(&self, id: Uuid) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.get(&id).map(|entry| entry.value().clone()))
    }

    fn orders_for_courier(&self, courier_id: Uuid) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .orders
            .iter()
            .filter(|entry| entry.value().courier_id == courier_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    fn insert_review(&self, review: Review) -> Result<(), StoreError> {
        self.reviews.insert(review.id, review);
        Ok(())
    }

    fn review_for_order(&self, order_id: Uuid) -> Result<Option<Review>, StoreError> {
        Ok(self
            .reviews
            .iter()
            .find(|entry| entry.value().order_id == order_id)
            .map(|entry| entry.value().clone()))
    }

    fn reviews_for_courier(&self, courier_id: Uuid) -> Result<Vec<Review>, StoreError> {
        Ok(self
            .reviews
            .iter()
            .filter(|entry| entry.value().courier_id == courier_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    fn trust_cache(&self, courier_id: Uuid) -> Result<Option<TrustScoreCache>, StoreError> {
        Ok(self
            .trust_caches
            .get(&courier_id)
            .map(|entry| entry.value().clone()))
    }

    fn trust_caches(&self) -> Result<Vec<TrustScoreCache>, StoreError> {
        Ok(self
            .trust_caches
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    fn upsert_trust_cache(&self, row: TrustScoreCache) -> Result<(), StoreError> {
        self.trust_caches.insert(row.courier_id, row);
        Ok(())
    }

    fn analytics(&self, courier_id: Uuid) -> Result<Option<CourierAnalytics>, StoreError> {
        Ok(self
            .analytics
            .get(&courier_id)
            .map(|entry| entry.value().clone()))
    }

    fn upsert_analytics(&self, row: CourierAnalytics) -> Result<(), StoreError> {
        self.analytics.insert(row.courier_id, row);
        Ok(())
    }

    fn courier_count(&self) -> usize {
        self.couriers.len()
    }

    fn order_count(&self) -> usize {
        self.orders.len()
    }

    fn review_count(&self) -> usize {
        self.reviews.len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::MemoryStore;
    use crate::models::courier::Courier;
    use crate::models::order::{Order, OrderStatus};
    use crate::store::TrustStore;

    fn courier(id_seed: u128) -> Courier {
        Courier {
            id: Uuid::from_u128(id_seed),
            name: "test-courier".to_string(),
            code: "TST".to_string(),
            logo_url: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn order(courier_id: Uuid) -> Order {
        Order {
            id: Uuid::new_v4(),
            courier_id,
            store_id: Uuid::new_v4(),
            status: OrderStatus::Pending,
            order_date: Utc::now(),
            delivery_date: None,
            estimated_delivery: None,
        }
    }

    #[test]
    fn orders_scan_is_scoped_to_courier() {
        let store = MemoryStore::new();
        let a = courier(1);
        let b = courier(2);
        store.insert_courier(a.clone()).unwrap();
        store.insert_courier(b.clone()).unwrap();

        store.put_order(order(a.id)).unwrap();
        store.put_order(order(a.id)).unwrap();
        store.put_order(order(b.id)).unwrap();

        assert_eq!(store.orders_for_courier(a.id).unwrap().len(), 2);
        assert_eq!(store.orders_for_courier(b.id).unwrap().len(), 1);
    }

    #[test]
    fn set_courier_active_flips_flag() {
        let store = MemoryStore::new();
        let c = courier(1);
        store.insert_courier(c.clone()).unwrap();

        let updated = store.set_courier_active(c.id, false).unwrap().unwrap();
        assert!(!updated.is_active);
        assert!(!store.courier(c.id).unwrap().unwrap().is_active);
    }

    #[test]
    fn set_courier_active_missing_returns_none() {
        let store = MemoryStore::new();
        assert!(store
            .set_courier_active(Uuid::from_u128(9), false)
            .unwrap()
            .is_none());
    }
}
