pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers::handle_evaluate_plan;
use crate::planning::handlers::handle_plan_trip;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/plan-trip", post(handle_plan_trip))
        .route("/evaluate-plan", post(handle_evaluate_plan))
        .with_state(state)
}
