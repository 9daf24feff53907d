use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    PickedUp,
    InTransit,
    Delivered,
    Cancelled,
    Failed,
}

impl OrderStatus {
    /// Terminal orders are immutable in the normal flow.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::Failed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub courier_id: Uuid,
    pub store_id: Uuid,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub estimated_delivery: Option<DateTime<Utc>>,
}

impl Order {
    /// An order counts as on-time only when both dates are present and the
    /// actual delivery did not exceed the estimate. Delivered orders missing
    /// either date stay in the denominator but can never be on-time.
    pub fn is_on_time(&self) -> bool {
        match (self.delivery_date, self.estimated_delivery) {
            (Some(delivered), Some(estimated)) => delivered <= estimated,
            _ => false,
        }
    }
}
