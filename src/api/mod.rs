//! HTTP surface of the service.

mod error;
mod weather;

pub use error::{ApiError, ApiResult};
pub use weather::WeatherReport;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::aggregator::Aggregator;

pub struct AppState {
    pub aggregator: Aggregator,
}

pub fn app_router(state: Arc<AppState>) -> Router {
    weather::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
