//! Upstream weather providers.
//!
//! Every provider answers the same question: the current temperature of a
//! city in degrees Celsius. [`configured`] builds the set that the
//! [`Aggregator`](crate::aggregator::Aggregator) fans out to.

mod openweathermap;
mod weatherunderground;

pub use openweathermap::OpenWeatherMap;
pub use weatherunderground::WeatherUnderground;

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::warn;

use crate::city::City;
use crate::config::Config;
use crate::error::WeatherError;
use crate::fetch::BasicClient;

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Stable name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Current temperature of `city` in degrees Celsius.
    async fn temperature(&self, city: &City) -> Result<f64, WeatherError>;
}

/// Builds every provider that has a credential in `config`.
///
/// Providers without a key are skipped with a warning. An empty result is
/// returned as is; rejecting it is the aggregator's job.
pub fn configured(config: &Config) -> Result<Vec<Arc<dyn WeatherProvider>>> {
    let client = BasicClient::with_backstop(config.provider_timeout)
        .context("Failed to build HTTP client for weather providers")?;

    let mut providers: Vec<Arc<dyn WeatherProvider>> = Vec::new();

    match &config.openweathermap.api_key {
        Some(key) => providers.push(Arc::new(OpenWeatherMap::new(
            client.clone(),
            config.openweathermap.endpoint.clone(),
            key.clone(),
        ))),
        None => warn!(
            provider = OpenWeatherMap::<BasicClient>::NAME,
            "No API key configured, provider disabled"
        ),
    }

    match &config.weatherunderground.api_key {
        Some(key) => providers.push(Arc::new(WeatherUnderground::new(
            client,
            config.weatherunderground.endpoint.clone(),
            key.clone(),
        )?)),
        None => warn!(
            provider = WeatherUnderground::<BasicClient>::NAME,
            "No API key configured, provider disabled"
        ),
    }

    Ok(providers)
}
