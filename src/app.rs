use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/series", get(handlers::get_series))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/insights", get(handlers::get_insights))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .with_state(state)
}
