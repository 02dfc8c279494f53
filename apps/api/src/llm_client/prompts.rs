// Shared prompt fragments. Each feature module keeps its own prompts.rs;
// this file holds the pieces both the planner and the judge append.

/// Appended to every system prompt that expects a JSON answer.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Joins a feature's system prompt with the JSON-only instruction.
pub fn json_system(base: &str) -> String {
    format!("{}\n\n{}", base.trim(), JSON_ONLY_INSTRUCTION)
}
