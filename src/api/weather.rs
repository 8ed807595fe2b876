use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use super::error::{ApiError, ApiResult};
use crate::city::City;

/// Body of a successful `/weather/{city}` response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub celsius: f64,
    /// Wall-clock time spent on the aggregation, e.g. `"812.4ms"`.
    pub took: String,
}

async fn hello() -> &'static str {
    "hello"
}

#[tracing::instrument(skip(state))]
async fn get_weather(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
) -> ApiResult<Json<WeatherReport>> {
    let begin = Instant::now();
    let city = City::parse(&city)?;

    let celsius = state.aggregator.temperature(&city).await?;

    Ok(Json(WeatherReport {
        city: city.to_string(),
        celsius,
        took: format!("{:?}", begin.elapsed()),
    }))
}

async fn missing_city() -> ApiError {
    ApiError::MissingCity
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/hello", get(hello))
        .route("/weather", get(missing_city))
        .route("/weather/", get(missing_city))
        .route("/weather/{city}", get(get_weather))
}
