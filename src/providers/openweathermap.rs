use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::info;

use super::WeatherProvider;
use crate::city::City;
use crate::error::WeatherError;
use crate::fetch::{BasicClient, HttpClient, auth::UrlParam, fetch_json};
use crate::units::kelvin_to_celsius;

#[derive(Deserialize)]
struct CurrentWeather {
    main: MainReadings,
}

#[derive(Deserialize)]
struct MainReadings {
    /// Kelvin.
    temp: f64,
}

/// OpenWeatherMap current-weather API.
///
/// `GET <endpoint>?q=<city>&APPID=<key>`, answering in Kelvin.
pub struct OpenWeatherMap<C = BasicClient> {
    client: UrlParam<C>,
    endpoint: Url,
}

impl<C: HttpClient> OpenWeatherMap<C> {
    pub const NAME: &'static str = "openweathermap";

    pub fn new(inner: C, endpoint: Url, api_key: String) -> Self {
        Self {
            client: UrlParam::new(inner, "APPID", api_key),
            endpoint,
        }
    }

    fn request_url(&self, city: &City) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("q", city.as_str());
        url
    }
}

#[async_trait]
impl<C: HttpClient> WeatherProvider for OpenWeatherMap<C> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn temperature(&self, city: &City) -> Result<f64, WeatherError> {
        let url = self.request_url(city);
        let body: CurrentWeather = fetch_json(&self.client, Self::NAME, url).await?;
        let celsius = kelvin_to_celsius(body.main.temp);

        info!(provider = Self::NAME, city = %city, celsius, "Temperature reading");
        Ok(celsius)
    }
}
