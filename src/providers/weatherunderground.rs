use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::info;

use super::WeatherProvider;
use crate::city::City;
use crate::error::WeatherError;
use crate::fetch::{BasicClient, HttpClient, fetch_json};

#[derive(Deserialize)]
struct Conditions {
    current_observation: Observation,
}

#[derive(Deserialize)]
struct Observation {
    temp_c: f64,
}

/// Weather Underground conditions API.
///
/// `GET <endpoint>/<key>/conditions/q/<city>.json`, answering in Celsius.
/// The key travels in the path, so no auth wrapper is involved.
pub struct WeatherUnderground<C = BasicClient> {
    client: C,
    endpoint: Url,
    api_key: String,
}

impl<C: HttpClient> WeatherUnderground<C> {
    pub const NAME: &'static str = "weatherunderground";

    /// Fails if `endpoint` cannot have path segments appended (e.g. `data:` URLs).
    pub fn new(client: C, endpoint: Url, api_key: String) -> Result<Self, WeatherError> {
        if endpoint.cannot_be_a_base() {
            return Err(WeatherError::InvalidEndpoint {
                provider: Self::NAME,
                endpoint: endpoint.to_string(),
            });
        }
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    fn request_url(&self, city: &City) -> Result<Url, WeatherError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| WeatherError::InvalidEndpoint {
                provider: Self::NAME,
                endpoint: self.endpoint.to_string(),
            })?
            .pop_if_empty()
            .extend([
                self.api_key.as_str(),
                "conditions",
                "q",
                format!("{city}.json").as_str(),
            ]);
        Ok(url)
    }
}

#[async_trait]
impl<C: HttpClient> WeatherProvider for WeatherUnderground<C> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn temperature(&self, city: &City) -> Result<f64, WeatherError> {
        let url = self.request_url(city)?;
        let body: Conditions = fetch_json(&self.client, Self::NAME, url).await?;
        let celsius = body.current_observation.temp_c;

        info!(provider = Self::NAME, city = %city, celsius, "Temperature reading");
        Ok(celsius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(endpoint: &str) -> WeatherUnderground {
        WeatherUnderground::new(
            BasicClient::new(),
            endpoint.parse().unwrap(),
            "wu-key".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn test_request_url_layout() {
        let wu = provider("http://example.test/api/");
        let url = wu.request_url(&City::parse("San Francisco").unwrap()).unwrap();
        assert_eq!(
            url.as_str(),
            "http://example.test/api/wu-key/conditions/q/San%20Francisco.json"
        );
    }

    #[test]
    fn test_request_url_escapes_slashes() {
        let wu = provider("http://example.test/api");
        let url = wu.request_url(&City::parse("a/../b").unwrap()).unwrap();
        assert_eq!(url.path(), "/api/wu-key/conditions/q/a%2F..%2Fb.json");
    }

    #[test]
    fn test_new_rejects_opaque_endpoint() {
        let result = WeatherUnderground::new(
            BasicClient::new(),
            "mailto:weather@example.test".parse().unwrap(),
            "k".to_string(),
        );
        assert!(matches!(result, Err(WeatherError::InvalidEndpoint { .. })));
    }

    #[tokio::test]
    async fn test_celsius_passes_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/wu-key/conditions/q/Tokyo.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "current_observation": { "temp_c": 20.0, "temp_f": 68.0 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let wu = provider(&format!("{}/api", server.uri()));
        let celsius = wu.temperature(&City::parse("Tokyo").unwrap()).await.unwrap();
        assert_eq!(celsius, 20.0);
    }

    #[tokio::test]
    async fn test_error_payload_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": { "error": { "type": "keynotfound" } }
            })))
            .mount(&server)
            .await;

        let wu = provider(&format!("{}/api", server.uri()));
        let err = wu.temperature(&City::parse("Tokyo").unwrap()).await.unwrap_err();
        assert!(matches!(err, WeatherError::Decode { provider: "weatherunderground", .. }));
    }
}
