pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_handler))
        .route("/health", get(health::health_handler))
        .route("/zodiac/:date", get(handlers::handle_zodiac))
        .route("/predict", post(handlers::handle_predict))
        .route("/insight", get(handlers::handle_insight_query))
        .with_state(state)
}
