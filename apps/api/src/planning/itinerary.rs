//! Itinerary generation — one LLM call, reshaped into `ItineraryItem`s.
//!
//! Never fails: any upstream or parse problem yields the fallback outline.

use chrono::NaiveTime;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::llm_client::prompts::json_system;
use crate::llm_client::LlmClient;
use crate::planning::models::{ItineraryItem, TripRequest};
use crate::planning::prompts::{ITINERARY_PROMPT_TEMPLATE, PLANNER_SYSTEM};

/// Output of the generation step.
#[derive(Debug, Clone)]
pub struct GeneratedItinerary {
    pub items: Vec<ItineraryItem>,
    /// True when `items` is the generic outline rather than model output.
    pub fallback: bool,
}

/// One entry as the model returns it. Fields are optional; entries whose
/// fields have the wrong JSON type are dropped in `RawItinerary::into_items`.
#[derive(Debug, Deserialize)]
struct RawItem {
    day: Option<u32>,
    time: Option<String>,
    activity: Option<String>,
    description: Option<String>,
}

/// Entries are kept as untyped JSON so one malformed entry does not sink the rest.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawItinerary {
    Wrapped { itinerary: Vec<Value> },
    Bare(Vec<Value>),
}

impl RawItinerary {
    fn into_items(self) -> Vec<RawItem> {
        let entries = match self {
            RawItinerary::Wrapped { itinerary } => itinerary,
            RawItinerary::Bare(items) => items,
        };
        entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<RawItem>(entry) {
                Ok(item) => Some(item),
                Err(e) => {
                    debug!("Dropping itinerary entry with mistyped fields: {e}");
                    None
                }
            })
            .collect()
    }
}

pub fn build_prompt(request: &TripRequest) -> String {
    ITINERARY_PROMPT_TEMPLATE
        .replace("{request}", &request.describe())
        .replace("{duration_days}", &request.duration_days.to_string())
}

/// Asks the model for an itinerary and falls back to the generic outline on
/// any failure.
pub async fn generate_itinerary(request: &TripRequest, llm: &LlmClient) -> GeneratedItinerary {
    let prompt = build_prompt(request);
    let system = json_system(PLANNER_SYSTEM);

    let raw = match llm.call_json::<RawItinerary>(&prompt, &system).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!(
                destination = request.destination(),
                "Itinerary generation failed, using fallback: {e}"
            );
            return fallback(request.duration_days);
        }
    };

    let items = normalize_items(raw.into_items(), request.duration_days);
    if items.is_empty() {
        warn!(
            destination = request.destination(),
            "Model returned no usable itinerary entries, using fallback"
        );
        return fallback(request.duration_days);
    }

    GeneratedItinerary {
        items,
        fallback: false,
    }
}

fn fallback(duration_days: u32) -> GeneratedItinerary {
    GeneratedItinerary {
        items: fallback_itinerary(duration_days),
        fallback: true,
    }
}

/// Generic outline repeated for each day of the trip.
pub fn fallback_itinerary(duration_days: u32) -> Vec<ItineraryItem> {
    static OUTLINE: [(&str, &str, &str); 4] = [
        (
            "9:00 AM",
            "Morning Exploration",
            "Could not generate specific activity. Start your day by exploring the area around your accommodation.",
        ),
        ("1:00 PM", "Lunch", "Enjoy a local meal."),
        (
            "3:00 PM",
            "Afternoon Activity",
            "Engage in a popular local activity or visit a landmark.",
        ),
        (
            "7:00 PM",
            "Dinner",
            "Have dinner at a well-regarded local restaurant.",
        ),
    ];

    (1..=duration_days.max(1))
        .flat_map(|day| {
            OUTLINE
                .iter()
                .map(move |(time, activity, description)| ItineraryItem {
                    day,
                    time: time.to_string(),
                    activity: activity.to_string(),
                    description: description.to_string(),
                })
        })
        .collect()
}

/// Drops entries that do not fit the schema, normalizes times and orders the
/// rest by `(day, time)`.
fn normalize_items(raw: Vec<RawItem>, duration_days: u32) -> Vec<ItineraryItem> {
    let mut keyed: Vec<(u32, NaiveTime, ItineraryItem)> = raw
        .into_iter()
        .filter_map(|item| {
            let normalized = normalize_item(item, duration_days);
            if normalized.is_none() {
                debug!("Dropping itinerary entry that does not fit the schema");
            }
            normalized
        })
        .collect();

    keyed.sort_by_key(|(day, time, _)| (*day, *time));
    keyed.into_iter().map(|(_, _, item)| item).collect()
}

fn normalize_item(item: RawItem, duration_days: u32) -> Option<(u32, NaiveTime, ItineraryItem)> {
    let day = item.day.unwrap_or(1);
    if !(1..=duration_days).contains(&day) {
        return None;
    }
    let time = parse_clock_time(item.time.as_deref()?)?;
    let activity = non_blank(item.activity)?;
    let description = non_blank(item.description)?;

    Some((
        day,
        time,
        ItineraryItem {
            day,
            time: format_clock_time(time),
            activity,
            description,
        },
    ))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parses the clock times models tend to produce: `9:00 AM`, `9:00am`,
/// `9 a.m.`, `14:30`, and ranges such as `9:00 AM - 11:00 AM` (start wins).
pub fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    let start = raw.split(['-', '–']).next()?.trim();
    let mut text = start.replace('.', "").to_uppercase();

    let has_meridiem = text.ends_with("AM") || text.ends_with("PM");
    if has_meridiem && !text.contains(':') {
        let split_at = text.len() - 2;
        let hour = text[..split_at].trim().to_string();
        text = format!("{hour}:00 {}", &text[split_at..]);
    }

    const FORMATS: [&str; 4] = ["%I:%M %p", "%I:%M%p", "%H:%M", "%H:%M:%S"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&text, fmt).ok())
}

/// `9:00 AM`, `2:30 PM`.
pub fn format_clock_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}
