// LLM-as-Judge evaluation of generated trip plans.
// The judge shares the planner's LlmClient; only the prompt differs.

pub mod handlers;
pub mod judge;
pub mod models;
pub mod prompts;
