use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::Json;
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::order::{Order, OrderStatus};
use crate::state::AppState;
use crate::store::TrustStore;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/orders", post(create_order))
        .route("/orders/:id", get(get_order))
        .route("/orders/:id/status", patch(update_order_status))
}

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub courier_id: Uuid,
    pub store_id: Uuid,
    pub estimated_delivery: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
    pub delivery_date: Option<DateTime<Utc>>,
}

async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<Order>, AppError> {
    if state.store.courier(payload.courier_id)?.is_none() {
        return Err(AppError::BadRequest(format!(
            "courier {} does not exist",
            payload.courier_id
        )));
    }

    let order = Order {
        id: Uuid::new_v4(),
        courier_id: payload.courier_id,
        store_id: payload.store_id,
        status: OrderStatus::Pending,
        order_date: Utc::now(),
        delivery_date: None,
        estimated_delivery: payload.estimated_delivery,
    };

    state.store.put_order(order.clone())?;
    Ok(Json(order))
}

async fn get_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Order>, AppError> {
    let order = state
        .store
        .order(id)?
        .ok_or_else(|| AppError::NotFound(format!("order {} not found", id)))?;

    Ok(Json(order))
}

/// Status updates come from courier webhooks. Terminal orders are immutable;
/// marking an order delivered stamps the delivery date.
async fn update_order_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> Result<Json<Order>, AppError> {
    let mut order = state
        .store
        .order(id)?
        .ok_or_else(|| AppError::NotFound(format!("order {} not found", id)))?;

    if order.status.is_terminal() {
        return Err(AppError::Conflict(format!(
            "order {} is already {:?}",
            id, order.status
        )));
    }

    order.status = payload.status;
    if payload.status == OrderStatus::Delivered {
        order.delivery_date = Some(payload.delivery_date.unwrap_or_else(Utc::now));
    }

    state.store.put_order(order.clone())?;
    Ok(Json(order))
}
