use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::weather_client::WeatherInfo;

pub const MAX_DURATION_DAYS: u32 = 7;
const MAX_DESTINATION_CHARS: usize = 100;
const MAX_PREFERENCES_CHARS: usize = 1000;

fn one() -> u32 {
    1
}

// ────────────────────────────────────────────────────────────────────────────
// Request
// ────────────────────────────────────────────────────────────────────────────

/// Body of `POST /plan-trip`, and the `request` half of an evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    pub destination: String,
    #[serde(default = "one")]
    pub duration_days: u32,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub preferences: Option<String>,
}

impl TripRequest {
    /// Presence and range checks. Everything else is left to the model.
    pub fn validate(&self) -> Result<(), AppError> {
        let destination = self.destination.trim();
        if destination.is_empty() {
            return Err(AppError::Validation(
                "destination cannot be empty".to_string(),
            ));
        }
        if destination.chars().count() > MAX_DESTINATION_CHARS {
            return Err(AppError::Validation(format!(
                "destination must be at most {MAX_DESTINATION_CHARS} characters"
            )));
        }
        if !(1..=MAX_DURATION_DAYS).contains(&self.duration_days) {
            return Err(AppError::Validation(format!(
                "duration_days must be between 1 and {MAX_DURATION_DAYS}"
            )));
        }
        if let Some(preferences) = &self.preferences {
            if preferences.chars().count() > MAX_PREFERENCES_CHARS {
                return Err(AppError::Validation(format!(
                    "preferences must be at most {MAX_PREFERENCES_CHARS} characters"
                )));
            }
        }
        Ok(())
    }

    pub fn destination(&self) -> &str {
        self.destination.trim()
    }

    /// Non-blank preferences, trimmed.
    pub fn preferences(&self) -> Option<&str> {
        self.preferences
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// One-sentence rendering of the request, as a user would have typed it.
    pub fn describe(&self) -> String {
        let mut text = format!(
            "Plan a {}-day trip to {}",
            self.duration_days,
            self.destination()
        );
        if let Some(date) = self.date {
            text.push_str(&format!(" starting {}", date.format("%Y-%m-%d")));
        }
        text.push('.');
        if let Some(preferences) = self.preferences() {
            text.push_str(&format!(" Preferences: {preferences}"));
        }
        text
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Response
// ────────────────────────────────────────────────────────────────────────────

/// One time slot of the plan. `time` is normalized to `H:MM AM/PM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryItem {
    #[serde(default = "one")]
    pub day: u32,
    pub time: String,
    pub activity: String,
    pub description: String,
}

/// Body returned by `POST /plan-trip`.
///
/// `plan_id`, `destination` and `fallback` default on input so an evaluation
/// can carry a plan produced elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripResponse {
    #[serde(default = "Uuid::new_v4")]
    pub plan_id: Uuid,
    #[serde(default)]
    pub destination: String,
    pub itinerary: Vec<ItineraryItem>,
    #[serde(default)]
    pub weather: Option<WeatherInfo>,
    #[serde(default)]
    pub agent_message: String,
    #[serde(default)]
    pub fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(destination: &str, duration_days: u32) -> TripRequest {
        TripRequest {
            destination: destination.to_string(),
            duration_days,
            date: None,
            preferences: None,
        }
    }

    #[test]
    fn test_minimal_request_defaults_to_one_day() {
        let req: TripRequest = serde_json::from_str(r#"{"destination": "Paris"}"#).unwrap();
        assert_eq!(req.duration_days, 1);
        assert!(req.date.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_blank_destination_rejected() {
        let err = request("   ", 1).validate().unwrap_err();
        assert!(err.to_string().contains("destination"));
    }

    #[test]
    fn test_duration_out_of_range_rejected() {
        assert!(request("Paris", 0).validate().is_err());
        assert!(request("Paris", MAX_DURATION_DAYS + 1).validate().is_err());
        assert!(request("Paris", MAX_DURATION_DAYS).validate().is_ok());
    }

    #[test]
    fn test_overlong_destination_rejected() {
        let req = request(&"x".repeat(MAX_DESTINATION_CHARS + 1), 1);
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("destination"));
    }

    #[test]
    fn test_overlong_preferences_rejected() {
        let mut req = request("Paris", 1);
        req.preferences = Some("x".repeat(MAX_PREFERENCES_CHARS + 1));
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("preferences"));
    }

    #[test]
    fn test_date_parses_iso_format() {
        let req: TripRequest =
            serde_json::from_str(r#"{"destination": "Tokyo", "date": "2026-04-01"}"#).unwrap();
        assert_eq!(req.date, NaiveDate::from_ymd_opt(2026, 4, 1));
    }

    #[test]
    fn test_describe_includes_all_parts() {
        let req = TripRequest {
            destination: " Kyoto ".to_string(),
            duration_days: 2,
            date: NaiveDate::from_ymd_opt(2026, 11, 3),
            preferences: Some("temples and tea".to_string()),
        };
        assert_eq!(
            req.describe(),
            "Plan a 2-day trip to Kyoto starting 2026-11-03. Preferences: temples and tea"
        );
    }

    #[test]
    fn test_describe_skips_blank_preferences() {
        let mut req = request("Paris", 1);
        req.preferences = Some("  ".to_string());
        assert_eq!(req.describe(), "Plan a 1-day trip to Paris.");
    }

    #[test]
    fn test_trip_response_accepts_minimal_external_plan() {
        let json = r#"{
            "itinerary": [
                {"time": "9:00 AM", "activity": "Visit park", "description": "Walk around and relax."}
            ],
            "agent_message": "Here is your personalized 1-day trip plan!"
        }"#;
        let plan: TripResponse = serde_json::from_str(json).unwrap();
        assert_eq!(plan.itinerary[0].day, 1);
        assert!(plan.weather.is_none());
        assert!(!plan.fallback);
    }
}
