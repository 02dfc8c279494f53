// LLM prompt constants for trip planning.
// The JSON-only fragment comes from llm_client::prompts.

/// System prompt for the trip planning agent.
pub const PLANNER_SYSTEM: &str = "You are a helpful and concise travel assistant. \
    Your goal is to create a day-by-day travel itinerary.
- Be friendly and enthusiastic.
- Keep the itinerary concise and easy to read.
- If the user asks for information you cannot provide (e.g., real-time traffic), politely decline.
- Do not make up or hallucinate information.
- If the request is abusive, illegal, or unsafe, do not produce a trip plan; return an empty itinerary.";

/// Itinerary prompt template.
/// Replace: {request}, {duration_days}
pub const ITINERARY_PROMPT_TEMPLATE: &str = r#"Generate a {duration_days}-day itinerary based on the following request: "{request}"

Return a JSON object with this EXACT schema (no extra fields):
{
  "itinerary": [
    { "day": 1, "time": "9:00 AM", "activity": "...", "description": "..." },
    { "day": 1, "time": "11:00 AM", "activity": "...", "description": "..." }
  ]
}

Rules:
1. `day` runs from 1 to {duration_days}
2. `time` is a clock time like "9:00 AM" or "2:30 PM"
3. Order entries by day, then by time
4. Every entry needs a short `activity` title and a one or two sentence `description`"#;
