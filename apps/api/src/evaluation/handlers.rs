//! Axum route handler for the evaluation endpoint.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::evaluation::judge::evaluate_plan;
use crate::evaluation::models::{EvaluationRequest, EvaluationResponse};
use crate::planning::pipeline::build_plan;
use crate::state::AppState;

/// POST /evaluate-plan
///
/// Scores a plan on the five fixed criteria. When the body carries only the
/// original request, the plan is regenerated first.
pub async fn handle_evaluate_plan(
    State(state): State<AppState>,
    payload: Result<Json<EvaluationRequest>, JsonRejection>,
) -> Result<Json<EvaluationResponse>, AppError> {
    let Json(EvaluationRequest { request, response }) = payload?;
    request.validate()?;

    let plan = match response {
        Some(plan) => {
            if plan.itinerary.is_empty() {
                return Err(AppError::Validation(
                    "response.itinerary cannot be empty".to_string(),
                ));
            }
            plan
        }
        None => {
            info!(
                destination = request.destination(),
                "No plan supplied, regenerating before evaluation"
            );
            build_plan(&state, &request).await
        }
    };

    let evaluation = evaluate_plan(&request, &plan, &state.llm).await?;
    Ok(Json(evaluation))
}
