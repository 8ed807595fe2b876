//! Error type shared by providers, the aggregator and the HTTP layer.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("at least one weather provider must be configured")]
    NoProviders,

    #[error("invalid city: {0}")]
    InvalidCity(String),

    /// Transport-level failure. The request URL is stripped from `source`
    /// because it can carry the provider credential.
    #[error("{provider}: request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider}: upstream returned status {status}")]
    Status {
        provider: &'static str,
        status: StatusCode,
    },

    #[error("{provider}: could not decode response: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{provider}: no response within {after:?}")]
    Timeout {
        provider: &'static str,
        after: Duration,
    },

    #[error("{provider}: endpoint {endpoint} cannot take path segments")]
    InvalidEndpoint {
        provider: &'static str,
        endpoint: String,
    },

    #[error("provider readings do not average to a finite temperature")]
    NonFiniteAverage,

    #[error("only {received} of {expected} providers reported a reading")]
    Incomplete { expected: usize, received: usize },
}

impl WeatherError {
    pub(crate) fn transport(provider: &'static str, source: reqwest::Error) -> Self {
        WeatherError::Transport {
            provider,
            source: source.without_url(),
        }
    }

    /// `true` when the failure originates from an upstream provider rather
    /// than from the caller or from this service.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            WeatherError::Transport { .. }
                | WeatherError::Status { .. }
                | WeatherError::Decode { .. }
                | WeatherError::Timeout { .. }
                | WeatherError::NonFiniteAverage
        )
    }
}
