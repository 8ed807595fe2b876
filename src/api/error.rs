use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::error::WeatherError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("missing city in request path, expected /weather/{{city}}")]
    MissingCity,
    #[error(transparent)]
    Weather(#[from] WeatherError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingCity => StatusCode::BAD_REQUEST,
            ApiError::Weather(e) => match e {
                WeatherError::InvalidCity(_) => StatusCode::BAD_REQUEST,
                WeatherError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                e if e.is_upstream() => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

/// Errors are returned as `text/plain` with the error message as body.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }
        (status, self.to_string()).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
