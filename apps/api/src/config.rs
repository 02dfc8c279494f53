use anyhow::{bail, Context, Result};

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_WEATHER_API_BASE: &str = "https://api.openweathermap.org";

/// Application configuration loaded from environment variables.
/// Startup fails if either API key is missing, so no request ever runs without them.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub weather_api_key: String,
    pub gemini_api_base: String,
    pub weather_api_base: String,
    pub http_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the
    /// process environment; tests pass a map.
    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_timeout_secs = lookup("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|| "60".to_string())
            .parse::<u64>()
            .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?;
        if http_timeout_secs == 0 {
            bail!("HTTP_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            gemini_api_key: require(&lookup, "GEMINI_API_KEY")?,
            weather_api_key: require(&lookup, "WEATHER_API_KEY")?,
            gemini_api_base: base_url(&lookup, "GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
            weather_api_base: base_url(&lookup, "WEATHER_API_BASE", DEFAULT_WEATHER_API_BASE),
            http_timeout_secs,
            port: lookup("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn base_url<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
        .trim_end_matches('/')
        .to_string()
}
