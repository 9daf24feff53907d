use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything the calculator derives for one courier in a single pass over
/// its orders and reviews. Percentages are on a 0-100 scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourierMetrics {
    pub trust_score: f64,
    pub avg_rating: f64,
    pub on_time_rate: f64,
    pub completion_rate: f64,
    pub avg_delivery_speed_days: f64,
    pub avg_package_condition: f64,
    pub avg_communication: f64,
    pub total_orders: usize,
    pub total_reviews: usize,
}

/// Memoized projection of [`CourierMetrics`], keyed by courier. A cache row
/// is a deterministic function of the courier's full history at computation
/// time; it is never the source of truth and may be rebuilt at any moment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustScoreCache {
    pub courier_id: Uuid,
    pub overall_score: f64,
    pub avg_rating: f64,
    pub on_time_rate: f64,
    pub completion_rate: f64,
    pub avg_delivery_speed_days: f64,
    pub avg_package_condition: f64,
    pub avg_communication: f64,
    pub total_orders: usize,
    pub total_reviews: usize,
    pub last_updated: DateTime<Utc>,
}

impl TrustScoreCache {
    pub fn from_metrics(courier_id: Uuid, metrics: &CourierMetrics, now: DateTime<Utc>) -> Self {
        Self {
            courier_id,
            overall_score: metrics.trust_score,
            avg_rating: metrics.avg_rating,
            on_time_rate: metrics.on_time_rate,
            completion_rate: metrics.completion_rate,
            avg_delivery_speed_days: metrics.avg_delivery_speed_days,
            avg_package_condition: metrics.avg_package_condition,
            avg_communication: metrics.avg_communication,
            total_orders: metrics.total_orders,
            total_reviews: metrics.total_reviews,
            last_updated: now,
        }
    }
}

/// Per-status order counts for dashboards, rebuilt in the same pass as the
/// trust score cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourierAnalytics {
    pub courier_id: Uuid,
    pub pending_orders: usize,
    pub confirmed_orders: usize,
    pub picked_up_orders: usize,
    pub in_transit_orders: usize,
    pub delivered_orders: usize,
    pub cancelled_orders: usize,
    pub failed_orders: usize,
    pub total_orders: usize,
    pub completion_rate: f64,
    pub on_time_rate: f64,
    pub last_updated: DateTime<Utc>,
}

/// Leaderboard row: a cache entry joined with courier display metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub courier_id: Uuid,
    pub courier_name: String,
    pub courier_code: String,
    pub logo_url: Option<String>,
    pub overall_score: f64,
    pub total_reviews: usize,
    pub last_updated: DateTime<Utc>,
}

/// Broadcast to dashboard subscribers after each successful recalculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreUpdate {
    pub courier_id: Uuid,
    pub trust_score: f64,
    pub total_reviews: usize,
    pub computed_at: DateTime<Utc>,
}
