use axum::{
    extract::{Path, State},
    response::Json,
};
use common::errors::AppError;
use common::models::{ForecastResponse, WeatherReport};
use std::sync::Arc;
use tracing::info;

use crate::service::WeatherService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WeatherService>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check")
    )
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "weather-server" }))
}

#[utoipa::path(
    get,
    path = "/api/weather/{city}",
    params(
        ("city" = String, Path, description = "City key, e.g. zagreb")
    ),
    responses(
        (status = 200, description = "Current conditions with trend and forecast", body = WeatherReport),
        (status = 404, description = "Location not found"),
        (status = 429, description = "Rate limit exceeded")
    ),
    tag = "weather"
)]
pub async fn current_weather(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<WeatherReport>, AppError> {
    let city = city.to_lowercase();
    info!(city = %city, "Weather request received");

    let report = state.service.current(&city).await?;

    Ok(Json(report))
}

#[utoipa::path(
    get,
    path = "/api/forecast/{city}",
    params(
        ("city" = String, Path, description = "City key, e.g. zagreb")
    ),
    responses(
        (status = 200, description = "Five-day forecast", body = ForecastResponse),
        (status = 404, description = "Location not found"),
        (status = 429, description = "Rate limit exceeded")
    ),
    tag = "weather"
)]
pub async fn forecast(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<ForecastResponse>, AppError> {
    let city = city.to_lowercase();
    info!(city = %city, "Forecast request received");

    let response = state.service.forecast(&city).await?;

    Ok(Json(response))
}
