use serde::{Deserialize, Serialize};

use crate::planning::models::{TripRequest, TripResponse};

/// The five fixed dimensions the judge scores. Declaration order is the
/// canonical order; `validate` indexes by discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criterion {
    Relevance,
    Clarity,
    Helpfulness,
    #[serde(rename = "Fallback Handling")]
    FallbackHandling,
    Tone,
}

impl Criterion {
    /// Canonical order, also the order of `EvaluationResponse::criteria`.
    pub const ALL: [Criterion; 5] = [
        Criterion::Relevance,
        Criterion::Clarity,
        Criterion::Helpfulness,
        Criterion::FallbackHandling,
        Criterion::Tone,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Criterion::Relevance => "Relevance",
            Criterion::Clarity => "Clarity",
            Criterion::Helpfulness => "Helpfulness",
            Criterion::FallbackHandling => "Fallback Handling",
            Criterion::Tone => "Tone",
        }
    }

    /// Matches a model-supplied name, ignoring case, digits, punctuation and
    /// spacing: `fallback_handling`, `2. Clarity` and `TONE` all resolve.
    pub fn from_label(raw: &str) -> Option<Self> {
        let key: String = raw
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(char::to_lowercase)
            .collect();
        Criterion::ALL.into_iter().find(|criterion| {
            let canonical: String = criterion
                .label()
                .chars()
                .filter(|c| c.is_alphabetic())
                .flat_map(char::to_lowercase)
                .collect();
            canonical == key
        })
    }
}

/// Body of `POST /evaluate-plan`. Without `response` the plan is regenerated
/// from `request` before grading.
#[derive(Debug, Deserialize)]
pub struct EvaluationRequest {
    pub request: TripRequest,
    #[serde(default)]
    pub response: Option<TripResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub criterion: Criterion,
    /// 1 (poor) to 5 (excellent).
    pub score: u8,
    pub justification: String,
}

/// Validated judge verdict. Always holds all five criteria in canonical order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResponse {
    pub evaluation_summary: String,
    pub overall_score: f32,
    pub criteria: Vec<CriterionScore>,
}
