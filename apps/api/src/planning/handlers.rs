//! Axum route handler for the itinerary endpoint.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::errors::AppError;
use crate::planning::models::{TripRequest, TripResponse};
use crate::planning::pipeline::build_plan;
use crate::state::AppState;

/// POST /plan-trip
///
/// Generates an itinerary and attaches current weather when available.
/// Upstream failures never surface here: the itinerary falls back to a
/// generic outline and weather is left out.
pub async fn handle_plan_trip(
    State(state): State<AppState>,
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> Result<Json<TripResponse>, AppError> {
    let Json(request) = payload?;
    request.validate()?;

    Ok(Json(build_plan(&state, &request).await))
}
