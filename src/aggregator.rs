//! Concurrent fan-out to every provider with first-error-wins fan-in.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, warn};

use crate::city::City;
use crate::error::WeatherError;
use crate::providers::WeatherProvider;

/// Averages the readings of a fixed set of providers.
///
/// The set is decided at construction and never changes afterwards.
pub struct Aggregator {
    providers: Vec<Arc<dyn WeatherProvider>>,
    call_timeout: Duration,
}

impl Aggregator {
    /// Rejects an empty provider set, which has no meaningful average.
    pub fn new(
        providers: Vec<Arc<dyn WeatherProvider>>,
        call_timeout: Duration,
    ) -> Result<Self, WeatherError> {
        if providers.is_empty() {
            return Err(WeatherError::NoProviders);
        }
        Ok(Self {
            providers,
            call_timeout,
        })
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Queries every provider concurrently and returns the mean Celsius value.
    ///
    /// Returns the first failure to arrive without waiting for the others.
    /// Calls still in flight at that point, or when this future is dropped,
    /// are cancelled and never report.
    #[tracing::instrument(skip(self, city), fields(city = %city, providers = self.providers.len()))]
    pub async fn temperature(&self, city: &City) -> Result<f64, WeatherError> {
        let expected = self.providers.len();
        let (tx, mut rx) = mpsc::channel(expected);

        let cancel = CancellationToken::new();
        let _cancel_on_exit = cancel.clone().drop_guard();

        for provider in &self.providers {
            let provider = Arc::clone(provider);
            let tx = tx.clone();
            let city = city.clone();
            let cancel = cancel.clone();
            let call_timeout = self.call_timeout;

            let span = tracing::debug_span!("provider_call", provider = provider.name());

            tokio::spawn(
                async move {
                    let name = provider.name();
                    let call = tokio::time::timeout(call_timeout, provider.temperature(&city));
                    let reading = tokio::select! {
                        _ = cancel.cancelled() => {
                            debug!("Provider call cancelled");
                            return;
                        }
                        result = call => {
                            result.unwrap_or(Err(WeatherError::Timeout {
                                provider: name,
                                after: call_timeout,
                            }))
                        }
                    };
                    // The receiver is gone once the aggregator has returned.
                    let _ = tx.send(reading).await;
                }
                .instrument(span),
            );
        }
        drop(tx);

        let mut sum = 0.0;
        let mut received = 0;

        while received < expected {
            match rx.recv().await {
                Some(Ok(celsius)) => {
                    sum += celsius;
                    received += 1;
                }
                Some(Err(e)) => {
                    warn!(error = %e, received, expected, "Provider failed, abandoning request");
                    return Err(e);
                }
                // Every sender dropped early: a provider task panicked.
                None => return Err(WeatherError::Incomplete { expected, received }),
            }
        }

        let average = sum / expected as f64;
        if !average.is_finite() {
            warn!(sum, expected, "Readings overflow to a non-finite average");
            return Err(WeatherError::NonFiniteAverage);
        }
        debug!(average, "All providers reported");
        Ok(average)
    }
}
