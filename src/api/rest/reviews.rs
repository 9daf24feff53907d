use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::order::OrderStatus;
use crate::models::review::Review;
use crate::state::AppState;
use crate::store::TrustStore;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/reviews", post(create_review))
}

#[derive(Deserialize)]
pub struct CreateReviewRequest {
    pub order_id: Uuid,
    pub rating: f64,
    pub package_condition_rating: Option<f64>,
    pub communication_rating: Option<f64>,
}

fn validate_rating(label: &str, value: f64) -> Result<(), AppError> {
    if !(1.0..=5.0).contains(&value) {
        return Err(AppError::BadRequest(format!(
            "{label} must be between 1 and 5"
        )));
    }
    Ok(())
}

async fn create_review(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<Json<Review>, AppError> {
    validate_rating("rating", payload.rating)?;
    if let Some(value) = payload.package_condition_rating {
        validate_rating("package_condition_rating", value)?;
    }
    if let Some(value) = payload.communication_rating {
        validate_rating("communication_rating", value)?;
    }

    let order = state
        .store
        .order(payload.order_id)?
        .ok_or_else(|| AppError::NotFound(format!("order {} not found", payload.order_id)))?;

    if order.status != OrderStatus::Delivered {
        return Err(AppError::Conflict(format!(
            "order {} has not been delivered",
            order.id
        )));
    }

    if state.store.review_for_order(order.id)?.is_some() {
        return Err(AppError::Conflict(format!(
            "order {} already has a review",
            order.id
        )));
    }

    let review = Review {
        id: Uuid::new_v4(),
        order_id: order.id,
        courier_id: order.courier_id,
        rating: payload.rating,
        package_condition_rating: payload.package_condition_rating,
        communication_rating: payload.communication_rating,
        created_at: Utc::now(),
    };

    state.store.insert_review(review.clone())?;
    Ok(Json(review))
}
