use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post-delivery customer rating tied to one order and one courier.
/// Created once, never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub order_id: Uuid,
    pub courier_id: Uuid,
    pub rating: f64,
    pub package_condition_rating: Option<f64>,
    pub communication_rating: Option<f64>,
    pub created_at: DateTime<Utc>,
}
