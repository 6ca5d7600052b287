use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Structured error types for the weather server.
///
/// Only `UnknownLocation` and `RateLimited` cross the API boundary as
/// caller-visible failures; the upstream variants are absorbed by the
/// refresh path, which serves the last good snapshot instead.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Location not found: {0}")]
    UnknownLocation(String),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("Timeout error: {0}")]
    TimeoutError(String),

    #[error("HTTP error: {status} - {message}")]
    HttpError { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl AppError {
    pub fn unknown_location(city: impl Into<String>) -> Self {
        Self::UnknownLocation(city.into())
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::HttpError {
            status,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::TimeoutError(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::UnknownLocation(_) => {
                (StatusCode::NOT_FOUND, "Location not found".to_string())
            }
            AppError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, self.to_string()),
            AppError::TimeoutError(_) => (StatusCode::GATEWAY_TIMEOUT, self.to_string()),
            AppError::HttpError { status, .. } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                self.to_string(),
            ),
            AppError::NetworkError(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            AppError::ParseError(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            AppError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(ErrorResponse { error: message });

        (status, body).into_response()
    }
}
