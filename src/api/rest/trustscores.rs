use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::Deserialize;
use uuid::Uuid;

use crate::engine::cache::{cached_score, CacheOutcome};
use crate::engine::{calculator, leaderboard, sweep};
use crate::error::AppError;
use crate::models::trust::{CourierAnalytics, CourierMetrics, LeaderboardEntry, TrustScoreCache};
use crate::state::AppState;
use crate::store::TrustStore;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trustscores/leaderboard", get(get_leaderboard))
        .route("/trustscores/recalculate", post(run_sweep))
        .route("/trustscores/:courier_id", get(get_trust_score))
        .route(
            "/trustscores/:courier_id/recalculate",
            post(recalculate_trust_score),
        )
        .route("/analytics/:courier_id", get(get_analytics))
}

#[derive(Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

async fn get_trust_score(
    State(state): State<Arc<AppState>>,
    Path(courier_id): Path<Uuid>,
) -> Result<Json<TrustScoreCache>, AppError> {
    ensure_courier_exists(&state, courier_id)?;

    let start = Instant::now();
    let (row, outcome) = cached_score(&state.store, courier_id)?;

    let result = match outcome {
        CacheOutcome::Hit => "hit",
        CacheOutcome::Recomputed => "miss",
    };
    state
        .metrics
        .cache_lookups_total
        .with_label_values(&[result])
        .inc();

    if outcome == CacheOutcome::Recomputed {
        observe(&state, "success", start);
        state.publish_score_update(courier_id, row.overall_score, row.total_reviews);
    }

    Ok(Json(row))
}

async fn recalculate_trust_score(
    State(state): State<Arc<AppState>>,
    Path(courier_id): Path<Uuid>,
) -> Result<Json<CourierMetrics>, AppError> {
    ensure_courier_exists(&state, courier_id)?;

    let start = Instant::now();
    match calculator::recalculate(&state.store, courier_id) {
        Ok(metrics) => {
            observe(&state, "success", start);
            state.publish_score_update(courier_id, metrics.trust_score, metrics.total_reviews);
            Ok(Json(metrics))
        }
        Err(err) => {
            observe(&state, "error", start);
            Err(err.into())
        }
    }
}

async fn run_sweep(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<sweep::SweepResult>>, AppError> {
    let results = sweep::run(&state.store)?;

    for result in &results {
        let outcome = if result.success { "success" } else { "error" };
        state
            .metrics
            .recalculations_total
            .with_label_values(&[outcome])
            .inc();

        if let Some(metrics) = &result.metrics {
            state.publish_score_update(result.courier_id, metrics.trust_score, metrics.total_reviews);
        }
    }

    Ok(Json(results))
}

async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let limit = query.limit.unwrap_or(state.leaderboard_limit);
    let entries = leaderboard::build(&state.store, limit)?;
    Ok(Json(entries))
}

async fn get_analytics(
    State(state): State<Arc<AppState>>,
    Path(courier_id): Path<Uuid>,
) -> Result<Json<CourierAnalytics>, AppError> {
    let analytics = state.store.analytics(courier_id)?.ok_or_else(|| {
        AppError::NotFound(format!("no analytics computed for courier {courier_id}"))
    })?;

    Ok(Json(analytics))
}

fn ensure_courier_exists(state: &AppState, courier_id: Uuid) -> Result<(), AppError> {
    if state.store.courier(courier_id)?.is_none() {
        return Err(AppError::NotFound(format!(
            "courier {courier_id} not found"
        )));
    }
    Ok(())
}

fn observe(state: &AppState, outcome: &str, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();
    state
        .metrics
        .recalculation_latency_seconds
        .with_label_values(&[outcome])
        .observe(elapsed);
    state
        .metrics
        .recalculations_total
        .with_label_values(&[outcome])
        .inc();
}
