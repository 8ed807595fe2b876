mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::error::WeatherError;

/// Issues a GET for `url` and returns the body of a successful response.
///
/// `provider` only labels the error; a non-2xx status is a failure.
pub async fn fetch_bytes<C: HttpClient + ?Sized>(
    client: &C,
    provider: &'static str,
    url: Url,
) -> Result<Vec<u8>, WeatherError> {
    let req = reqwest::Request::new(reqwest::Method::GET, url);

    let resp = client
        .execute(req)
        .await
        .map_err(|e| WeatherError::transport(provider, e))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(WeatherError::Status { provider, status });
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| WeatherError::transport(provider, e))?;
    Ok(bytes.to_vec())
}

/// [`fetch_bytes`] followed by decoding the body as `T`.
pub async fn fetch_json<C, T>(
    client: &C,
    provider: &'static str,
    url: Url,
) -> Result<T, WeatherError>
where
    C: HttpClient + ?Sized,
    T: DeserializeOwned,
{
    let bytes = fetch_bytes(client, provider, url).await?;
    serde_json::from_slice(&bytes).map_err(|source| WeatherError::Decode { provider, source })
}
