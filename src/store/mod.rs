pub mod memory;
#[cfg(test)]
pub mod testing;

pub use memory::MemoryStore;

use thiserror::Error;
use uuid::Uuid;

use crate::models::courier::Courier;
use crate::models::order::Order;
use crate::models::review::Review;
use crate::models::trust::{CourierAnalytics, TrustScoreCache};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage read failed: {0}")]
    Read(String),

    #[error("storage write failed: {0}")]
    Write(String),
}

/// Storage seam for the scoring engine and the HTTP handlers.
///
/// The engine takes a store handle explicitly rather than reaching for a
/// process-global client, so tests can substitute a failing or pre-seeded
/// implementation. All reads return owned rows; per-courier scans return
/// them in unspecified order.
pub trait TrustStore: Send + Sync {
    fn insert_courier(&self, courier: Courier) -> Result<(), StoreError>;
    fn courier(&self, id: Uuid) -> Result<Option<Courier>, StoreError>;
    fn couriers(&self) -> Result<Vec<Courier>, StoreError>;
    fn set_courier_active(&self, id: Uuid, is_active: bool) -> Result<Option<Courier>, StoreError>;

    fn put_order(&self, order: Order) -> Result<(), StoreError>;
    fn order(&self, id: Uuid) -> Result<Option<Order>, StoreError>;
    fn orders_for_courier(&self, courier_id: Uuid) -> Result<Vec<Order>, StoreError>;

    fn insert_review(&self, review: Review) -> Result<(), StoreError>;
    fn review_for_order(&self, order_id: Uuid) -> Result<Option<Review>, StoreError>;
    fn reviews_for_courier(&self, courier_id: Uuid) -> Result<Vec<Review>, StoreError>;

    fn trust_cache(&self, courier_id: Uuid) -> Result<Option<TrustScoreCache>, StoreError>;
    fn trust_caches(&self) -> Result<Vec<TrustScoreCache>, StoreError>;
    fn upsert_trust_cache(&self, row: TrustScoreCache) -> Result<(), StoreError>;

    fn analytics(&self, courier_id: Uuid) -> Result<Option<CourierAnalytics>, StoreError>;
    fn upsert_analytics(&self, row: CourierAnalytics) -> Result<(), StoreError>;

    fn courier_count(&self) -> usize;
    fn order_count(&self) -> usize;
    fn review_count(&self) -> usize;
}
