//! LLM-as-Judge — a second LLM call that scores a plan on five fixed criteria.
//!
//! The verdict is validated as a whole: all five criteria present, each scored
//! 1–5 with a justification, or the evaluation fails. No partial scores.

use anyhow::Context;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::models::{Criterion, CriterionScore, EvaluationResponse};
use crate::evaluation::prompts::{JUDGE_PROMPT_TEMPLATE, JUDGE_SYSTEM};
use crate::llm_client::prompts::json_system;
use crate::llm_client::{LlmClient, LlmError};
use crate::planning::models::{TripRequest, TripResponse};

const MIN_SCORE: f64 = 1.0;
const MAX_SCORE: f64 = 5.0;

/// Judge output as the model returns it, before validation.
#[derive(Debug, Deserialize)]
struct RawEvaluation {
    evaluation_summary: Option<String>,
    overall_score: Option<f64>,
    #[serde(default)]
    criteria: Vec<RawCriterion>,
}

#[derive(Debug, Deserialize)]
struct RawCriterion {
    criterion: Option<String>,
    score: Option<f64>,
    justification: Option<String>,
}

pub fn build_prompt(request: &TripRequest, plan: &TripResponse) -> Result<String, AppError> {
    let itinerary_json = serde_json::to_string_pretty(&plan.itinerary)
        .context("failed to render itinerary for the judge")?;

    let weather = match &plan.weather {
        Some(w) => {
            let mut text = format!("{}, {:.1}°C ({})", w.forecast, w.temperature, w.details);
            if let Some(observed_at) = w.observed_at {
                text.push_str(&format!(", observed {}", observed_at.to_rfc3339()));
            }
            text
        }
        None => "none (the weather forecast was unavailable)".to_string(),
    };

    let criteria_list = Criterion::ALL
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}", i + 1, c.label()))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(JUDGE_PROMPT_TEMPLATE
        .replace("{request}", &request.describe())
        .replace("{agent_message}", &plan.agent_message)
        .replace("{itinerary_json}", &itinerary_json)
        .replace("{weather}", &weather)
        .replace("{criteria_list}", &criteria_list))
}

/// Grades `plan` against the request that produced it.
pub async fn evaluate_plan(
    request: &TripRequest,
    plan: &TripResponse,
    llm: &LlmClient,
) -> Result<EvaluationResponse, AppError> {
    let prompt = build_prompt(request, plan)?;
    let system = json_system(JUDGE_SYSTEM);

    let raw = llm
        .call_json::<RawEvaluation>(&prompt, &system)
        .await
        .map_err(|e| match e {
            LlmError::Parse(e) => {
                AppError::JudgeOutput(format!("judge response was not valid evaluation JSON: {e}"))
            }
            LlmError::EmptyContent => {
                AppError::JudgeOutput("judge returned an empty response".to_string())
            }
            other => AppError::Llm(format!("Evaluation failed: {other}")),
        })?;

    let evaluation = validate(raw).map_err(AppError::JudgeOutput)?;

    log_verdict(plan.plan_id, &evaluation);
    Ok(evaluation)
}

fn log_verdict(plan_id: Uuid, evaluation: &EvaluationResponse) {
    info!(
        %plan_id,
        overall_score = evaluation.overall_score,
        "Plan evaluated"
    );
}

/// Checks every invariant of a verdict and reorders criteria canonically.
fn validate(raw: RawEvaluation) -> Result<EvaluationResponse, String> {
    let evaluation_summary = raw
        .evaluation_summary
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or("evaluation_summary is missing or empty")?;

    let overall_score = raw.overall_score.ok_or("overall_score is missing")?;
    if !overall_score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&overall_score) {
        return Err(format!(
            "overall_score {overall_score} is outside the range 1.0 to 5.0"
        ));
    }

    let mut slots: [Option<CriterionScore>; 5] = Default::default();

    for entry in raw.criteria {
        let label = entry.criterion.unwrap_or_default();
        let criterion = Criterion::from_label(&label)
            .ok_or_else(|| format!("unknown criterion '{label}'"))?;
        let index = criterion as usize;
        if slots[index].is_some() {
            return Err(format!("criterion '{}' appears more than once", criterion.label()));
        }

        let score = entry
            .score
            .ok_or_else(|| format!("criterion '{}' has no score", criterion.label()))?;
        if score.fract() != 0.0 || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(format!(
                "score {score} for criterion '{}' must be an integer from 1 to 5",
                criterion.label()
            ));
        }

        let justification = entry
            .justification
            .map(|j| j.trim().to_string())
            .filter(|j| !j.is_empty())
            .ok_or_else(|| format!("criterion '{}' has no justification", criterion.label()))?;

        slots[index] = Some(CriterionScore {
            criterion,
            score: score as u8,
            justification,
        });
    }

    let missing: Vec<&str> = Criterion::ALL
        .iter()
        .zip(slots.iter())
        .filter(|(_, slot)| slot.is_none())
        .map(|(c, _)| c.label())
        .collect();
    if !missing.is_empty() {
        return Err(format!("missing criteria: {}", missing.join(", ")));
    }

    Ok(EvaluationResponse {
        evaluation_summary,
        overall_score: overall_score as f32,
        criteria: slots.into_iter().flatten().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::models::ItineraryItem;

    fn raw_from(json: &str) -> RawEvaluation {
        serde_json::from_str(json).unwrap()
    }

    fn full_verdict_json() -> String {
        r#"{
            "evaluation_summary": "A solid, friendly plan.",
            "overall_score": 4.2,
            "criteria": [
                {"criterion": "Tone", "score": 5, "justification": "Warm and upbeat."},
                {"criterion": "Relevance", "score": 4, "justification": "Matches Paris."},
                {"criterion": "clarity", "score": 4.0, "justification": "Easy to follow."},
                {"criterion": "Helpfulness", "score": 4, "justification": "Actionable."},
                {"criterion": "Fallback Handling", "score": 4, "justification": "Weather note present."}
            ]
        }"#
        .to_string()
    }

    #[test]
    fn test_validate_full_verdict_in_canonical_order() {
        let evaluation = validate(raw_from(&full_verdict_json())).unwrap();
        let order: Vec<Criterion> = evaluation.criteria.iter().map(|c| c.criterion).collect();
        assert_eq!(order, Criterion::ALL.to_vec());
        assert!(evaluation.criteria.iter().all(|c| (1..=5).contains(&c.score)));
        assert!((evaluation.overall_score - 4.2).abs() < 1e-6);
    }

    #[test]
    fn test_validate_rejects_missing_criterion() {
        let json = r#"{
            "evaluation_summary": "ok",
            "overall_score": 3,
            "criteria": [
                {"criterion": "Relevance", "score": 3, "justification": "fine"}
            ]
        }"#;
        let err = validate(raw_from(json)).unwrap_err();
        assert!(err.contains("missing criteria"));
        assert!(err.contains("Fallback Handling"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_score() {
        let json = full_verdict_json().replace(r#""score": 5"#, r#""score": 6"#);
        let err = validate(raw_from(&json)).unwrap_err();
        assert!(err.contains("must be an integer from 1 to 5"));
    }

    #[test]
    fn test_validate_rejects_fractional_score() {
        let json = full_verdict_json().replace(r#""score": 4.0"#, r#""score": 3.5"#);
        assert!(validate(raw_from(&json)).is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_criterion() {
        let json = full_verdict_json().replace(r#""criterion": "Tone""#, r#""criterion": "Clarity""#);
        let err = validate(raw_from(&json)).unwrap_err();
        assert!(err.contains("more than once"));
    }

    #[test]
    fn test_validate_rejects_unknown_criterion() {
        let json = full_verdict_json().replace(r#""criterion": "Tone""#, r#""criterion": "Accuracy""#);
        let err = validate(raw_from(&json)).unwrap_err();
        assert!(err.contains("unknown criterion 'Accuracy'"));
    }

    #[test]
    fn test_validate_rejects_blank_justification() {
        let json = full_verdict_json().replace("Actionable.", "  ");
        let err = validate(raw_from(&json)).unwrap_err();
        assert!(err.contains("Helpfulness"));
    }

    #[test]
    fn test_validate_rejects_overall_score_out_of_range() {
        let json = full_verdict_json().replace("4.2", "0.5");
        let err = validate(raw_from(&json)).unwrap_err();
        assert!(err.contains("overall_score"));
    }

    #[test]
    fn test_build_prompt_lists_criteria_and_missing_weather() {
        let request = TripRequest {
            destination: "Paris".to_string(),
            duration_days: 1,
            date: None,
            preferences: None,
        };
        let plan = TripResponse {
            plan_id: Uuid::new_v4(),
            destination: "Paris".to_string(),
            itinerary: vec![ItineraryItem {
                day: 1,
                time: "9:00 AM".to_string(),
                activity: "Visit park".to_string(),
                description: "Walk around and relax.".to_string(),
            }],
            weather: None,
            agent_message: "Here is your personalized 1-day trip plan for Paris!".to_string(),
            fallback: false,
        };

        let prompt = build_prompt(&request, &plan).unwrap();
        assert!(prompt.contains(r#"Original User Request: "Plan a 1-day trip to Paris.""#));
        assert!(prompt.contains("4. Fallback Handling"));
        assert!(prompt.contains("Visit park"));
        assert!(prompt.contains("Weather: none"));
    }
}
