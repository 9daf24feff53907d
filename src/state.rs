use chrono::Utc;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::trust::ScoreUpdate;
use crate::observability::metrics::Metrics;
use crate::store::MemoryStore;

pub struct AppState {
    pub store: MemoryStore,
    pub metrics: Metrics,
    pub score_events_tx: broadcast::Sender<ScoreUpdate>,
    pub leaderboard_limit: usize,
}

impl AppState {
    pub fn new(event_buffer_size: usize, leaderboard_limit: usize) -> Self {
        let (score_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        Self {
            store: MemoryStore::new(),
            metrics: Metrics::new(),
            score_events_tx,
            leaderboard_limit,
        }
    }

    /// Fans a fresh score out to dashboard subscribers and the per-courier
    /// gauge. Lagging or absent subscribers are not an error.
    pub fn publish_score_update(&self, courier_id: Uuid, trust_score: f64, total_reviews: usize) {
        self.metrics
            .courier_trust_score
            .with_label_values(&[&courier_id.to_string()])
            .set(trust_score);

        let _ = self.score_events_tx.send(ScoreUpdate {
            courier_id,
            trust_score,
            total_reviews,
            computed_at: Utc::now(),
        });
    }
}
