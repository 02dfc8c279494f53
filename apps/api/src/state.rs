use std::time::Duration;

use anyhow::Result;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::weather_client::WeatherClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Holds only immutable clients; nothing is shared between requests beyond them.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub weather: WeatherClient,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(config.http_timeout_secs);
        Ok(Self {
            llm: LlmClient::new(
                config.gemini_api_key.clone(),
                config.gemini_api_base.clone(),
                timeout,
            )?,
            weather: WeatherClient::new(
                config.weather_api_key.clone(),
                config.weather_api_base.clone(),
                timeout,
            )?,
        })
    }
}
