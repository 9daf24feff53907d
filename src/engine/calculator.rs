use chrono::Utc;
use tracing::{debug, error};
use uuid::Uuid;

use crate::models::order::{Order, OrderStatus};
use crate::models::review::Review;
use crate::models::trust::{CourierAnalytics, CourierMetrics, TrustScoreCache};
use crate::store::{StoreError, TrustStore};

const RATING_WEIGHT: f64 = 40.0;
// on_time_rate and completion_rate are already on a 0-100 scale; the 0.3
// factor applies to the percentage value directly. Together with the rating
// term the score spans [0, 100].
const ON_TIME_WEIGHT: f64 = 0.3;
const COMPLETION_WEIGHT: f64 = 0.3;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Fetches the courier's full history, derives its metrics, and upserts the
/// TrustScoreCache and CourierAnalytics rows.
///
/// A fetch failure aborts and propagates; nothing partial is cached. A cache
/// write failure is logged and swallowed, and the computed metrics are still
/// returned, so callers must not assume persistence succeeded.
pub fn recalculate<S: TrustStore>(
    store: &S,
    courier_id: Uuid,
) -> Result<CourierMetrics, StoreError> {
    let orders = store.orders_for_courier(courier_id)?;
    let reviews = store.reviews_for_courier(courier_id)?;

    let metrics = compute_metrics(&orders, &reviews);
    let now = Utc::now();

    if let Err(err) = store.upsert_trust_cache(TrustScoreCache::from_metrics(
        courier_id, &metrics, now,
    )) {
        error!(courier_id = %courier_id, error = %err, "trust score cache write failed");
    }

    if let Err(err) = store.upsert_analytics(build_analytics(courier_id, &orders, &metrics)) {
        error!(courier_id = %courier_id, error = %err, "courier analytics write failed");
    }

    debug!(
        courier_id = %courier_id,
        trust_score = metrics.trust_score,
        total_orders = metrics.total_orders,
        total_reviews = metrics.total_reviews,
        "trust score recalculated"
    );

    Ok(metrics)
}

/// Pure derivation of a courier's metrics from its orders and reviews.
/// Deterministic: the same rows always yield the same metrics.
pub fn compute_metrics(orders: &[Order], reviews: &[Review]) -> CourierMetrics {
    let total_orders = orders.len();
    let delivered: Vec<&Order> = orders
        .iter()
        .filter(|order| order.status == OrderStatus::Delivered)
        .collect();

    let avg_rating = mean(&reviews.iter().map(|r| r.rating).collect::<Vec<_>>());

    let on_time_rate = if delivered.is_empty() {
        0.0
    } else {
        let on_time = delivered.iter().filter(|order| order.is_on_time()).count();
        on_time as f64 / delivered.len() as f64 * 100.0
    };

    let completion_rate = if total_orders == 0 {
        0.0
    } else {
        delivered.len() as f64 / total_orders as f64 * 100.0
    };

    let speeds: Vec<f64> = delivered
        .iter()
        .filter_map(|order| {
            order
                .delivery_date
                .map(|delivered_at| (delivered_at - order.order_date).num_seconds() as f64 / SECONDS_PER_DAY)
        })
        .collect();

    let package_conditions: Vec<f64> = reviews
        .iter()
        .filter_map(|r| r.package_condition_rating)
        .collect();
    let communications: Vec<f64> = reviews
        .iter()
        .filter_map(|r| r.communication_rating)
        .collect();

    let trust_score = (avg_rating / 5.0) * RATING_WEIGHT
        + on_time_rate * ON_TIME_WEIGHT
        + completion_rate * COMPLETION_WEIGHT;

    CourierMetrics {
        trust_score,
        avg_rating,
        on_time_rate,
        completion_rate,
        avg_delivery_speed_days: mean(&speeds),
        avg_package_condition: mean(&package_conditions),
        avg_communication: mean(&communications),
        total_orders,
        total_reviews: reviews.len(),
    }
}

fn build_analytics(
    courier_id: Uuid,
    orders: &[Order],
    metrics: &CourierMetrics,
) -> CourierAnalytics {
    let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();

    CourierAnalytics {
        courier_id,
        pending_orders: count(OrderStatus::Pending),
        confirmed_orders: count(OrderStatus::Confirmed),
        picked_up_orders: count(OrderStatus::PickedUp),
        in_transit_orders: count(OrderStatus::InTransit),
        delivered_orders: count(OrderStatus::Delivered),
        cancelled_orders: count(OrderStatus::Cancelled),
        failed_orders: count(OrderStatus::Failed),
        total_orders: orders.len(),
        completion_rate: metrics.completion_rate,
        on_time_rate: metrics.on_time_rate,
        last_updated: Utc::now(),
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    use super::{build_analytics, compute_metrics};
    use crate::models::order::{Order, OrderStatus};
    use crate::models::review::Review;

    fn base_date() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn order(status: OrderStatus, delivered_after_days: Option<i64>, estimate_days: Option<i64>) -> Order {
        let order_date = base_date();
        Order {
            id: Uuid::new_v4(),
            courier_id: Uuid::from_u128(1),
            store_id: Uuid::from_u128(2),
            status,
            order_date,
            delivery_date: delivered_after_days.map(|d| order_date + Duration::days(d)),
            estimated_delivery: estimate_days.map(|d| order_date + Duration::days(d)),
        }
    }

    fn review(rating: f64, package: Option<f64>, communication: Option<f64>) -> Review {
        Review {
            id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            courier_id: Uuid::from_u128(1),
            rating,
            package_condition_rating: package,
            communication_rating: communication,
            created_at: base_date(),
        }
    }

    #[test]
    fn empty_history_scores_zero() {
        let metrics = compute_metrics(&[], &[]);

        assert_eq!(metrics.trust_score, 0.0);
        assert_eq!(metrics.completion_rate, 0.0);
        assert_eq!(metrics.on_time_rate, 0.0);
        assert_eq!(metrics.avg_delivery_speed_days, 0.0);
        assert_eq!(metrics.total_orders, 0);
        assert_eq!(metrics.total_reviews, 0);
    }

    #[test]
    fn perfect_reviews_without_orders_score_forty() {
        let reviews: Vec<Review> = (0..5).map(|_| review(5.0, None, None)).collect();

        let metrics = compute_metrics(&[], &reviews);

        assert_eq!(metrics.avg_rating, 5.0);
        assert_eq!(metrics.trust_score, 40.0);
    }

    #[test]
    fn worked_example_scores_63_5() {
        // 10 orders: 8 delivered (2 on time, 6 late), 2 cancelled.
        let mut orders = Vec::new();
        for _ in 0..2 {
            orders.push(order(OrderStatus::Delivered, Some(2), Some(3)));
        }
        for _ in 0..6 {
            orders.push(order(OrderStatus::Delivered, Some(5), Some(3)));
        }
        for _ in 0..2 {
            orders.push(order(OrderStatus::Cancelled, None, None));
        }
        let reviews = vec![review(4.0, None, None)];

        let metrics = compute_metrics(&orders, &reviews);

        assert_eq!(metrics.completion_rate, 80.0);
        assert_eq!(metrics.on_time_rate, 25.0);
        assert!((metrics.trust_score - 63.5).abs() < 1e-9);
    }

    #[test]
    fn delivered_order_missing_dates_counts_in_denominator_only() {
        let orders = vec![
            order(OrderStatus::Delivered, Some(1), Some(2)),
            order(OrderStatus::Delivered, Some(1), None),
            order(OrderStatus::Delivered, None, Some(2)),
        ];

        let metrics = compute_metrics(&orders, &[]);

        // Only the first order has both dates and qualifies as on-time.
        assert!((metrics.on_time_rate - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn delivery_exactly_on_estimate_is_on_time() {
        let orders = vec![order(OrderStatus::Delivered, Some(3), Some(3))];

        let metrics = compute_metrics(&orders, &[]);

        assert_eq!(metrics.on_time_rate, 100.0);
    }

    #[test]
    fn delivery_speed_averages_only_dated_delivered_orders() {
        let orders = vec![
            order(OrderStatus::Delivered, Some(2), Some(5)),
            order(OrderStatus::Delivered, Some(4), Some(5)),
            order(OrderStatus::Delivered, None, Some(5)),
            order(OrderStatus::InTransit, None, Some(5)),
        ];

        let metrics = compute_metrics(&orders, &[]);

        assert!((metrics.avg_delivery_speed_days - 3.0).abs() < 1e-9);
    }

    #[test]
    fn sub_ratings_exclude_missing_values_entirely() {
        let reviews = vec![
            review(5.0, Some(4.0), None),
            review(3.0, None, Some(2.0)),
            review(4.0, Some(2.0), Some(4.0)),
        ];

        let metrics = compute_metrics(&[], &reviews);

        assert_eq!(metrics.avg_package_condition, 3.0);
        assert_eq!(metrics.avg_communication, 3.0);
        assert_eq!(metrics.avg_rating, 4.0);
    }

    #[test]
    fn no_sub_ratings_yield_zero() {
        let reviews = vec![review(4.0, None, None)];

        let metrics = compute_metrics(&[], &reviews);

        assert_eq!(metrics.avg_package_condition, 0.0);
        assert_eq!(metrics.avg_communication, 0.0);
    }

    #[test]
    fn trust_score_stays_within_bounds_at_the_extremes() {
        // Best possible history: all delivered on time, perfect ratings.
        let orders: Vec<Order> = (0..4)
            .map(|_| order(OrderStatus::Delivered, Some(1), Some(2)))
            .collect();
        let reviews: Vec<Review> = (0..3).map(|_| review(5.0, None, None)).collect();

        let best = compute_metrics(&orders, &reviews);
        assert!((best.trust_score - 100.0).abs() < 1e-9);

        // Worst possible history: everything failed, bottom ratings.
        let orders: Vec<Order> = (0..4).map(|_| order(OrderStatus::Failed, None, None)).collect();
        let worst = compute_metrics(&orders, &[]);
        assert_eq!(worst.trust_score, 0.0);
    }

    #[test]
    fn compute_is_deterministic_over_identical_rows() {
        let orders = vec![
            order(OrderStatus::Delivered, Some(2), Some(3)),
            order(OrderStatus::Cancelled, None, None),
        ];
        let reviews = vec![review(4.5, Some(4.0), Some(3.0))];

        let first = compute_metrics(&orders, &reviews);
        let second = compute_metrics(&orders, &reviews);

        assert_eq!(first, second);
    }

    #[test]
    fn analytics_counts_orders_by_status() {
        let orders = vec![
            order(OrderStatus::Pending, None, None),
            order(OrderStatus::Delivered, Some(1), Some(2)),
            order(OrderStatus::Delivered, Some(4), Some(2)),
            order(OrderStatus::Failed, None, None),
        ];
        let metrics = compute_metrics(&orders, &[]);

        let analytics = build_analytics(Uuid::from_u128(1), &orders, &metrics);

        assert_eq!(analytics.pending_orders, 1);
        assert_eq!(analytics.delivered_orders, 2);
        assert_eq!(analytics.failed_orders, 1);
        assert_eq!(analytics.total_orders, 4);
        assert_eq!(analytics.completion_rate, 50.0);
        assert_eq!(analytics.on_time_rate, 50.0);
    }
}
