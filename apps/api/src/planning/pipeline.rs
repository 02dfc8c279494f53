//! Plan pipeline: itinerary from the LLM, then weather, then the agent message.
//! Shared by `/plan-trip` and by `/evaluate-plan` when it has to regenerate.

use tracing::{info, warn};
use uuid::Uuid;

use crate::planning::itinerary::generate_itinerary;
use crate::planning::models::{TripRequest, TripResponse};
use crate::state::AppState;
use crate::weather_client::WeatherInfo;

pub const WEATHER_UNAVAILABLE_NOTE: &str = "I couldn't fetch the weather forecast right now, \
    but you can check a reliable weather website for the latest updates.";
pub const FALLBACK_NOTE: &str =
    "I couldn't generate a detailed plan, so here is a general outline to get you started.";

/// Builds a complete plan for an already-validated request. Never fails:
/// generation falls back to an outline and weather is optional.
pub async fn build_plan(state: &AppState, request: &TripRequest) -> TripResponse {
    let plan_id = Uuid::new_v4();
    let destination = request.destination().to_string();

    let generated = generate_itinerary(request, &state.llm).await;

    let weather = match state.weather.current(&destination).await {
        Ok(weather) => Some(weather),
        Err(e) => {
            warn!(%plan_id, destination = %destination, "Weather unavailable: {e}");
            None
        }
    };

    let agent_message = agent_message(request, weather.as_ref(), generated.fallback);

    info!(
        %plan_id,
        destination = %destination,
        items = generated.items.len(),
        fallback = generated.fallback,
        has_weather = weather.is_some(),
        "Trip plan built"
    );

    TripResponse {
        plan_id,
        destination,
        itinerary: generated.items,
        weather,
        agent_message,
        fallback: generated.fallback,
    }
}

pub fn agent_message(request: &TripRequest, weather: Option<&WeatherInfo>, fallback: bool) -> String {
    let mut message = format!(
        "Here is your personalized {}-day trip plan for {}!",
        request.duration_days,
        request.destination()
    );
    if fallback {
        message.push(' ');
        message.push_str(FALLBACK_NOTE);
    }
    if weather.is_none() {
        message.push(' ');
        message.push_str(WEATHER_UNAVAILABLE_NOTE);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn request() -> TripRequest {
        TripRequest {
            destination: "Lisbon".to_string(),
            duration_days: 2,
            date: None,
            preferences: None,
        }
    }

    fn sunny() -> WeatherInfo {
        WeatherInfo {
            forecast: "Clear".to_string(),
            temperature: 24.0,
            details: "Clear sky".to_string(),
            observed_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_agent_message_with_weather() {
        let message = agent_message(&request(), Some(&sunny()), false);
        assert_eq!(message, "Here is your personalized 2-day trip plan for Lisbon!");
    }

    #[test]
    fn test_agent_message_notes_missing_weather() {
        let message = agent_message(&request(), None, false);
        assert!(message.ends_with(WEATHER_UNAVAILABLE_NOTE));
    }

    #[test]
    fn test_agent_message_notes_fallback() {
        let message = agent_message(&request(), Some(&sunny()), true);
        assert!(message.contains(FALLBACK_NOTE));
        assert!(!message.contains(WEATHER_UNAVAILABLE_NOTE));
    }
}
