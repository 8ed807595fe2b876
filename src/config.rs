//! Process configuration, read once at startup.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_OPENWEATHERMAP_URL: &str = "http://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_WEATHERUNDERGROUND_URL: &str = "http://api.wunderground.com/api";
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_LOG_FILE_PATH: &str = "logs/multiweather.log";

/// Endpoint and credential for one upstream provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub endpoint: Url,
    /// `None` when the key is unset or empty; the provider is then disabled.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub openweathermap: ProviderConfig,
    pub weatherunderground: ProviderConfig,
    pub provider_timeout: Duration,
    pub log_file_path: String,
}

impl Config {
    /// Reads the configuration from the process environment. Call
    /// `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = lookup("WEATHER_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .context("Invalid WEATHER_LISTEN_ADDR")?;

        let provider_timeout = match lookup("PROVIDER_TIMEOUT_MS") {
            Some(ms) => {
                let ms: u64 = ms.parse().context("Invalid PROVIDER_TIMEOUT_MS")?;
                anyhow::ensure!(ms > 0, "PROVIDER_TIMEOUT_MS must be greater than zero");
                Duration::from_millis(ms)
            }
            None => Duration::from_millis(DEFAULT_PROVIDER_TIMEOUT_MS),
        };

        let openweathermap = ProviderConfig {
            endpoint: endpoint(&lookup, "OPENWEATHERMAP_URL", DEFAULT_OPENWEATHERMAP_URL)?,
            api_key: api_key(&lookup, "API_KEY_OpenWeatherMap"),
        };
        let weatherunderground = ProviderConfig {
            endpoint: endpoint(
                &lookup,
                "WEATHERUNDERGROUND_URL",
                DEFAULT_WEATHERUNDERGROUND_URL,
            )?,
            api_key: api_key(&lookup, "API_KEY_WeatherUnderground"),
        };

        let log_file_path =
            lookup("LOG_FILE_PATH").unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string());

        Ok(Self {
            listen_addr,
            openweathermap,
            weatherunderground,
            provider_timeout,
            log_file_path,
        })
    }
}

fn endpoint<F>(lookup: &F, key: &str, default: &str) -> Result<Url>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    let url: Url = raw
        .parse()
        .with_context(|| format!("Invalid {key}: '{raw}'"))?;
    anyhow::ensure!(
        matches!(url.scheme(), "http" | "https"),
        "{key} must be an http(s) URL, got '{raw}'"
    );
    Ok(url)
}

fn api_key<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.provider_timeout, Duration::from_secs(10));
        assert_eq!(config.openweathermap.endpoint.as_str(), DEFAULT_OPENWEATHERMAP_URL);
        assert_eq!(
            config.weatherunderground.endpoint.as_str(),
            DEFAULT_WEATHERUNDERGROUND_URL
        );
        assert!(config.openweathermap.api_key.is_none());
        assert!(config.weatherunderground.api_key.is_none());
        assert_eq!(config.log_file_path, DEFAULT_LOG_FILE_PATH);
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("WEATHER_LISTEN_ADDR", "127.0.0.1:9000"),
            ("PROVIDER_TIMEOUT_MS", "250"),
            ("OPENWEATHERMAP_URL", "http://localhost:1234/owm"),
            ("API_KEY_OpenWeatherMap", "owm"),
            ("API_KEY_WeatherUnderground", " wu "),
        ])
        .unwrap();
        assert_eq!(config.listen_addr.port(), 9000);
        assert_eq!(config.provider_timeout, Duration::from_millis(250));
        assert_eq!(config.openweathermap.endpoint.path(), "/owm");
        assert_eq!(config.openweathermap.api_key.as_deref(), Some("owm"));
        assert_eq!(config.weatherunderground.api_key.as_deref(), Some("wu"));
    }

    #[test]
    fn test_empty_key_disables_provider() {
        let config = from_pairs(&[("API_KEY_OpenWeatherMap", "  ")]).unwrap();
        assert!(config.openweathermap.api_key.is_none());
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(from_pairs(&[("WEATHER_LISTEN_ADDR", "nope")]).is_err());
        assert!(from_pairs(&[("PROVIDER_TIMEOUT_MS", "soon")]).is_err());
        assert!(from_pairs(&[("PROVIDER_TIMEOUT_MS", "0")]).is_err());
        assert!(from_pairs(&[("WEATHERUNDERGROUND_URL", "not a url")]).is_err());
        assert!(from_pairs(&[("OPENWEATHERMAP_URL", "ftp://example.test/x")]).is_err());
    }
}
