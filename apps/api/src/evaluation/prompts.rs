// LLM prompt constants for the LLM-as-Judge evaluator.

/// System prompt for the judge.
pub const JUDGE_SYSTEM: &str = "You are an impartial evaluator. \
    Your task is to assess the quality of an AI-generated travel plan based on a user's request \
    and a set of criteria. \
    Provide a score for each criterion from 1 to 5 (1=Poor, 5=Excellent) and a brief justification for your score. \
    Finally, provide an overall score and a summary of your evaluation.";

/// Grading prompt template.
/// Replace: {request}, {agent_message}, {itinerary_json}, {weather}, {criteria_list}
pub const JUDGE_PROMPT_TEMPLATE: &str = r#"Original User Request: "{request}"

Generated AI Response:
Agent Message: {agent_message}
Itinerary: {itinerary_json}
Weather: {weather}

Please evaluate the response based on the following criteria:
{criteria_list}

For each, provide an integer score from 1 to 5 and a justification.

Return your response strictly in this JSON format:
{
  "evaluation_summary": "string",
  "overall_score": 4.2,
  "criteria": [
    { "criterion": "Relevance", "score": 5, "justification": "string" }
  ]
}

HARD RULES:
1. Include every criterion above exactly once, using the names exactly as listed
2. `score` is an integer from 1 to 5
3. `overall_score` is a number from 1.0 to 5.0"#;
