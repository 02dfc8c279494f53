//! Weather client — current conditions from the OpenWeatherMap API.
//!
//! Failures are returned as `WeatherError`; callers treat them as "no weather",
//! never as a failed request.

use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Weather response had no conditions")]
    MissingConditions,

    #[error("Weather response had an invalid timestamp: {0}")]
    InvalidTimestamp(i64),
}

/// Weather summary attached to a trip plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherInfo {
    /// Short condition, e.g. "Clouds".
    pub forecast: String,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Long description, first letter capitalized.
    pub details: String,
    /// Provider observation time. Absent on plans supplied by clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    #[serde(default)]
    weather: Vec<Condition>,
    main: MainReadings,
    dt: i64,
}

#[derive(Debug, Deserialize)]
struct Condition {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherError {
    message: String,
}

#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build weather HTTP client")?;
        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// Fetches current conditions for `city` in metric units.
    pub async fn current(&self, city: &str) -> Result<WeatherInfo, WeatherError> {
        let response = self
            .client
            .get(format!("{}/data/2.5/weather", self.base_url))
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenWeatherError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let current: CurrentWeather = response.json().await?;
        current.into_info()
    }
}

impl CurrentWeather {
    fn into_info(self) -> Result<WeatherInfo, WeatherError> {
        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or(WeatherError::MissingConditions)?;
        let observed_at = DateTime::<Utc>::from_timestamp(self.dt, 0)
            .ok_or(WeatherError::InvalidTimestamp(self.dt))?;

        Ok(WeatherInfo {
            forecast: condition.main,
            temperature: self.main.temp,
            details: capitalize(&condition.description),
            observed_at: Some(observed_at),
        })
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const PARIS_BODY: &str = r#"{
        "name": "Paris",
        "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
        "main": {"temp": 18.4, "feels_like": 17.9, "humidity": 62},
        "dt": 1700000000
    }"#;

    fn client_for(base_url: String) -> WeatherClient {
        WeatherClient::new("w-key".into(), base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("scattered clouds"), "Scattered clouds");
        assert_eq!(capitalize(""), "");
    }

    #[tokio::test]
    async fn test_current_maps_openweather_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/data/2.5/weather")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "Paris".into()),
                Matcher::UrlEncoded("appid".into(), "w-key".into()),
                Matcher::UrlEncoded("units".into(), "metric".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(PARIS_BODY)
            .create_async()
            .await;

        let info = client_for(server.url()).current("Paris").await.unwrap();
        assert_eq!(info.forecast, "Clouds");
        assert_eq!(info.details, "Scattered clouds");
        assert!((info.temperature - 18.4).abs() < f64::EPSILON);
        assert_eq!(info.observed_at.unwrap().timestamp(), 1_700_000_000);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unknown_city_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/data/2.5/weather")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body(r#"{"cod":"404","message":"city not found"}"#)
            .create_async()
            .await;

        let err = client_for(server.url()).current("Atlantis").await.unwrap_err();
        match err {
            WeatherError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "city not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_conditions_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/data/2.5/weather")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"weather": [], "main": {"temp": 10.0}, "dt": 1700000000}"#)
            .create_async()
            .await;

        let err = client_for(server.url()).current("Paris").await.unwrap_err();
        assert!(matches!(err, WeatherError::MissingConditions));
    }

    #[tokio::test]
    async fn test_out_of_range_timestamp_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/data/2.5/weather")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(PARIS_BODY.replace("1700000000", &i64::MAX.to_string()))
            .create_async()
            .await;

        let err = client_for(server.url()).current("Paris").await.unwrap_err();
        assert!(matches!(err, WeatherError::InvalidTimestamp(i64::MAX)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        // Port 1 is never listening in the test environment.
        let err = client_for("http://127.0.0.1:1".into())
            .current("Paris")
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::Http(_)));
    }
}
