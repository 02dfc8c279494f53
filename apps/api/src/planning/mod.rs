// Trip planning: request validation, itinerary generation, weather enrichment.
// All LLM calls go through llm_client and all weather calls through weather_client.

pub mod handlers;
pub mod itinerary;
pub mod models;
pub mod pipeline;
pub mod prompts;
